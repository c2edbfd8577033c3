//! Shared library for the AyuSetu service clients
//!
//! This library contains functionality used by every domain service:
//! - Configuration and mode selection
//! - The error type surfaced to callers
//! - The HTTP client wrapper used by live implementations
//! - Common types and mock helpers

pub mod config;
pub mod error;
pub mod service_client;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, Environment};
pub use error::{AppError, OperationContext, Result};
pub use service_client::ServiceClient;
pub use types::*;
pub use utils::MockLatency;
