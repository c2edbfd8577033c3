//! Health-record uploads and provider auto-sync
//!
//! `bulk_upload` is not the same operation in both implementations: the live
//! client sends one multipart request for all files, while the in-memory fake
//! runs `upload_file` once per file, in order, and stops at the first failure
//! (earlier files stay uploaded).

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveIngestionService;
pub use mock::MockIngestionService;
pub use models::*;

use async_trait::async_trait;
use shared::{Acknowledgement, Result};

#[async_trait]
pub trait IngestionApi: Send + Sync {
    async fn upload_file(&self, file: UploadFile) -> Result<UploadedRecord>;

    async fn bulk_upload(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedRecord>>;

    async fn get_uploaded_records(&self, query: RecordQuery) -> Result<Vec<UploadedRecord>>;

    async fn get_record(&self, record_id: &str) -> Result<UploadedRecord>;

    async fn delete_record(&self, record_id: &str) -> Result<Acknowledgement>;

    async fn get_sync_providers(&self) -> Result<Vec<SyncProvider>>;

    async fn set_auto_sync(&self, provider_id: &str, enabled: bool) -> Result<SyncProvider>;

    async fn sync_now(&self, provider_id: &str) -> Result<SyncResult>;
}
