use super::models::*;
use super::IngestionApi;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use shared::utils::{generate_mock_id, random_between};
use shared::{Acknowledgement, AppError, MockLatency, OperationContext, Result};
use tracing::info;

/// Emulated server-side processing time for one file.
const PROCESSING_DELAY_MS: u64 = 1500;

pub struct MockIngestionService {
    latency: MockLatency,
    records: Mutex<Vec<UploadedRecord>>,
    providers: Mutex<Vec<SyncProvider>>,
}

impl MockIngestionService {
    pub fn new(latency: MockLatency) -> Self {
        let now = Utc::now();
        let provider = |id: &str, name: &str, kind: ProviderKind, auto_sync_enabled: bool, linked_days_ago: i64| SyncProvider {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            auto_sync_enabled,
            linked_at: now - Duration::days(linked_days_ago),
            last_synced_at: auto_sync_enabled.then(|| now - Duration::hours(6)),
        };

        Self {
            latency,
            records: Mutex::new(Vec::new()),
            providers: Mutex::new(vec![
                provider("hip-aiims", "AIIMS New Delhi", ProviderKind::Hospital, true, 90),
                provider("hip-city-diagnostics", "City Diagnostics", ProviderKind::Laboratory, false, 30),
                provider("hip-medplus", "MedPlus Pharmacy", ProviderKind::Pharmacy, false, 12),
            ]),
        }
    }
}

fn validate(file: &UploadFile) -> Result<()> {
    if file.bytes.is_empty() {
        return Err(AppError::rejected(format!("{} is empty", file.file_name)));
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::rejected(format!(
            "{} exceeds {} bytes",
            file.file_name, MAX_UPLOAD_BYTES
        )));
    }
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(AppError::rejected(format!("unsupported type {}", file.mime_type)));
    }
    Ok(())
}

#[async_trait]
impl IngestionApi for MockIngestionService {
    async fn upload_file(&self, file: UploadFile) -> Result<UploadedRecord> {
        validate(&file).or_fail("Failed to upload file")?;
        self.latency.pause(PROCESSING_DELAY_MS).await;

        let record = UploadedRecord {
            id: generate_mock_id("rec"),
            title: file.title.clone().unwrap_or_else(|| file.file_name.clone()),
            size_bytes: file.bytes.len() as u64,
            file_name: file.file_name,
            mime_type: file.mime_type,
            record_type: file.record_type,
            status: ProcessingStatus::Processed,
            source: RecordSource::Upload,
            uploaded_at: Utc::now(),
            record_date: file.record_date,
        };
        info!(record_id = %record.id, record_type = record.record_type.as_str(), "🧪 mock record uploaded");
        self.records.lock().push(record.clone());
        Ok(record)
    }

    async fn bulk_upload(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedRecord>> {
        let mut uploaded = Vec::with_capacity(files.len());
        for file in files {
            uploaded.push(self.upload_file(file).await?);
        }
        Ok(uploaded)
    }

    async fn get_uploaded_records(&self, query: RecordQuery) -> Result<Vec<UploadedRecord>> {
        self.latency.pause(500).await;
        let matches: Vec<UploadedRecord> = self
            .records
            .lock()
            .iter()
            .filter(|r| query.record_type.map_or(true, |t| r.record_type == t))
            .filter(|r| query.status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        Ok(query.page().apply(&matches))
    }

    async fn get_record(&self, record_id: &str) -> Result<UploadedRecord> {
        self.latency.pause(300).await;
        self.records
            .lock()
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("record {}", record_id)))
            .or_fail("Failed to fetch record")
    }

    async fn delete_record(&self, record_id: &str) -> Result<Acknowledgement> {
        self.latency.pause(400).await;
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(AppError::not_found(format!("record {}", record_id)))
                .or_fail("Failed to delete record");
        }
        Ok(Acknowledgement::ok(format!("record {} deleted", record_id)))
    }

    async fn get_sync_providers(&self) -> Result<Vec<SyncProvider>> {
        self.latency.pause(400).await;
        Ok(self.providers.lock().clone())
    }

    async fn set_auto_sync(&self, provider_id: &str, enabled: bool) -> Result<SyncProvider> {
        self.latency.pause(400).await;
        let mut providers = self.providers.lock();
        let provider = providers
            .iter_mut()
            .find(|p| p.id == provider_id)
            .ok_or_else(|| AppError::not_found(format!("provider {}", provider_id)))
            .or_fail("Failed to update auto-sync")?;
        provider.auto_sync_enabled = enabled;
        info!(provider_id, enabled, "🧪 mock auto-sync toggled");
        Ok(provider.clone())
    }

    async fn sync_now(&self, provider_id: &str) -> Result<SyncResult> {
        let started_at = Utc::now();
        let kind = self
            .providers
            .lock()
            .iter()
            .find(|p| p.id == provider_id)
            .map(|p| p.kind)
            .ok_or_else(|| AppError::not_found(format!("provider {}", provider_id)))
            .or_fail("Failed to sync provider")?;

        self.latency.pause(3000).await;

        let fetched = random_between(0, 3);
        let completed_at = Utc::now();
        let record_type = match kind {
            ProviderKind::Hospital => RecordType::DischargeSummary,
            ProviderKind::Laboratory => RecordType::LabReport,
            ProviderKind::Pharmacy => RecordType::Prescription,
        };

        {
            let mut records = self.records.lock();
            for n in 0..fetched {
                records.push(UploadedRecord {
                    id: generate_mock_id("rec"),
                    file_name: format!("{}-{}.pdf", provider_id, n + 1),
                    mime_type: "application/pdf".to_string(),
                    size_bytes: 48_000,
                    record_type,
                    title: format!("{} from {}", record_type.as_str(), provider_id),
                    status: ProcessingStatus::Processed,
                    source: RecordSource::ProviderSync,
                    uploaded_at: completed_at,
                    record_date: Some(completed_at.date_naive()),
                });
            }
        }

        if let Some(p) = self.providers.lock().iter_mut().find(|p| p.id == provider_id) {
            p.last_synced_at = Some(completed_at);
        }

        Ok(SyncResult {
            provider_id: provider_id.to_string(),
            records_fetched: fetched,
            started_at,
            completed_at,
        })
    }
}
