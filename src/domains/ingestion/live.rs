use super::models::*;
use super::IngestionApi;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use shared::{Acknowledgement, OperationContext, Result, ServiceClient};
use tracing::debug;

pub struct LiveIngestionService {
    client: ServiceClient,
}

impl LiveIngestionService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

fn file_part(file: UploadFile) -> Result<Part> {
    Ok(Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime_type)?)
}

fn single_upload_form(file: UploadFile) -> Result<Form> {
    let metadata = serde_json::to_string(&file.metadata())?;
    Ok(Form::new()
        .text("metadata", metadata)
        .part("file", file_part(file)?))
}

fn bulk_upload_form(files: Vec<UploadFile>) -> Result<Form> {
    let metadata: Vec<UploadMetadata> = files.iter().map(UploadFile::metadata).collect();
    let mut form = Form::new().text("metadata", serde_json::to_string(&metadata)?);
    for file in files {
        form = form.part("files", file_part(file)?);
    }
    Ok(form)
}

#[async_trait]
impl IngestionApi for LiveIngestionService {
    async fn upload_file(&self, file: UploadFile) -> Result<UploadedRecord> {
        debug!(file_name = %file.file_name, size = file.bytes.len(), "uploading record");
        let form = single_upload_form(file).or_fail("Failed to upload file")?;
        self.client
            .post_multipart("/ingestion/upload", form)
            .await
            .or_fail("Failed to upload file")
    }

    async fn bulk_upload(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedRecord>> {
        debug!(count = files.len(), "bulk uploading records");
        let form = bulk_upload_form(files).or_fail("Failed to upload files")?;
        self.client
            .post_multipart("/ingestion/bulk-upload", form)
            .await
            .or_fail("Failed to upload files")
    }

    async fn get_uploaded_records(&self, query: RecordQuery) -> Result<Vec<UploadedRecord>> {
        self.client
            .get_query("/ingestion/records", &query)
            .await
            .or_fail("Failed to fetch records")
    }

    async fn get_record(&self, record_id: &str) -> Result<UploadedRecord> {
        let endpoint = ServiceClient::endpoint(&["ingestion", "records", record_id])
            .or_fail("Failed to fetch record")?;
        self.client
            .get(&endpoint)
            .await
            .or_fail("Failed to fetch record")
    }

    async fn delete_record(&self, record_id: &str) -> Result<Acknowledgement> {
        let endpoint = ServiceClient::endpoint(&["ingestion", "records", record_id])
            .or_fail("Failed to delete record")?;
        self.client
            .delete(&endpoint)
            .await
            .or_fail("Failed to delete record")
    }

    async fn get_sync_providers(&self) -> Result<Vec<SyncProvider>> {
        self.client
            .get("/ingestion/providers")
            .await
            .or_fail("Failed to fetch sync providers")
    }

    async fn set_auto_sync(&self, provider_id: &str, enabled: bool) -> Result<SyncProvider> {
        let endpoint = ServiceClient::endpoint(&["ingestion", "providers", provider_id])
            .or_fail("Failed to update auto-sync")?;
        self.client
            .patch(
                &endpoint,
                &AutoSyncUpdate {
                    auto_sync_enabled: enabled,
                },
            )
            .await
            .or_fail("Failed to update auto-sync")
    }

    async fn sync_now(&self, provider_id: &str) -> Result<SyncResult> {
        let endpoint = ServiceClient::endpoint(&["ingestion", "providers", provider_id, "sync"])
            .or_fail("Failed to sync provider")?;
        self.client
            .post(&endpoint, &json!({}))
            .await
            .or_fail("Failed to sync provider")
    }
}
