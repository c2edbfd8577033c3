//! AyuSetu patient-app service clients
//!
//! Every domain exposes an async trait with two implementations: a live one
//! that calls the ABDM gateway and a mock one that fabricates responses in
//! memory. [`state::AppServices`] picks one set based on [`shared::Config`].

pub mod domains;
pub mod state;

pub use domains::*;
pub use shared::{AppError, Config, Environment, Result};
pub use state::{AppServices, ServiceMode};
