use super::models::*;
use super::ComplianceApi;
use async_trait::async_trait;
use serde_json::json;
use shared::{OperationContext, Result, ServiceClient};

pub struct LiveComplianceService {
    client: ServiceClient,
}

impl LiveComplianceService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ComplianceApi for LiveComplianceService {
    async fn get_consents(&self, status: Option<ConsentStatus>) -> Result<Vec<ConsentArtefact>> {
        self.client
            .get_query("/compliance/consents", &ConsentFilter { status })
            .await
            .or_fail("Failed to fetch consents")
    }

    async fn respond_to_consent(&self, consent_id: &str, decision: ConsentDecision) -> Result<ConsentArtefact> {
        let endpoint = ServiceClient::endpoint(&["compliance", "consents", consent_id, "respond"])
            .or_fail("Failed to respond to consent request")?;
        self.client
            .post(&endpoint, &decision)
            .await
            .or_fail("Failed to respond to consent request")
    }

    async fn revoke_consent(&self, consent_id: &str) -> Result<ConsentArtefact> {
        let endpoint = ServiceClient::endpoint(&["compliance", "consents", consent_id, "revoke"])
            .or_fail("Failed to revoke consent")?;
        self.client
            .post(&endpoint, &json!({}))
            .await
            .or_fail("Failed to revoke consent")
    }

    async fn get_audit_logs(&self, query: AuditLogQuery) -> Result<Vec<AuditLogEntry>> {
        self.client
            .get_query("/compliance/audit-logs", &query)
            .await
            .or_fail("Failed to fetch audit logs")
    }

    async fn get_compliance_report(&self) -> Result<ComplianceReport> {
        self.client
            .get("/compliance/report")
            .await
            .or_fail("Failed to fetch compliance report")
    }

    async fn request_data_export(&self, format: ExportFormat) -> Result<DataExportJob> {
        self.client
            .post("/compliance/data-export", &DataExportRequest { format })
            .await
            .or_fail("Failed to request data export")
    }
}
