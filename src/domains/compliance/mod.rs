//! Consent management and audit trail
//!
//! Consent requests originate from HIUs (Health Information Users); the audit
//! log records which HIP/HIU touched which record and when.

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveComplianceService;
pub use mock::MockComplianceService;
pub use models::*;

use async_trait::async_trait;
use shared::Result;

#[async_trait]
pub trait ComplianceApi: Send + Sync {
    async fn get_consents(&self, status: Option<ConsentStatus>) -> Result<Vec<ConsentArtefact>>;

    async fn respond_to_consent(&self, consent_id: &str, decision: ConsentDecision) -> Result<ConsentArtefact>;

    async fn revoke_consent(&self, consent_id: &str) -> Result<ConsentArtefact>;

    async fn get_audit_logs(&self, query: AuditLogQuery) -> Result<Vec<AuditLogEntry>>;

    async fn get_compliance_report(&self) -> Result<ComplianceReport>;

    async fn request_data_export(&self, format: ExportFormat) -> Result<DataExportJob>;
}
