use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::PageRequest;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    Requested,
    Granted,
    Denied,
    Revoked,
    Expired,
}

/// ABDM purpose-of-use codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConsentPurpose {
    #[serde(rename = "CAREMGT")]
    CareManagement,
    #[serde(rename = "BTG")]
    BreakTheGlass,
    #[serde(rename = "PUBHLTH")]
    PublicHealth,
    #[serde(rename = "HPAYMT")]
    HealthcarePayment,
    #[serde(rename = "PATRQT")]
    SelfRequested,
}

/// Health-information types a consent can cover.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HiType {
    Prescription,
    DiagnosticReport,
    #[serde(rename = "OPConsultation")]
    OpConsultation,
    DischargeSummary,
    ImmunizationRecord,
    HealthDocumentRecord,
    WellnessRecord,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentArtefact {
    pub id: String,
    pub requester_name: String,
    pub hiu_id: String,
    pub hiu_name: String,
    pub purpose: ConsentPurpose,
    pub status: ConsentStatus,
    pub hi_types: Vec<HiType>,
    pub date_range: DateRange,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConsentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentDecision {
    pub approve: bool,
    /// Narrows the requested types on approval; `None` grants all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi_types: Option<Vec<HiType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ConsentDecision {
    pub fn approve() -> Self {
        Self {
            approve: true,
            hi_types: None,
            expires_at: None,
        }
    }

    pub fn deny() -> Self {
        Self {
            approve: false,
            hi_types: None,
            expires_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    Patient,
    Hip,
    Hiu,
    System,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Login,
    ConsentGranted,
    ConsentDenied,
    ConsentRevoked,
    RecordAccessed,
    RecordShared,
    RecordUploaded,
    DataExported,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub actor_role: ActorRole,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub outcome: AuditOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AuditAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl AuditLogQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest {
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.from.map_or(true, |from| entry.timestamp >= from)
            && self.to.map_or(true, |to| entry.timestamp <= to)
            && self.action.map_or(true, |action| entry.action == action)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub generated_at: DateTime<Utc>,
    pub total_consents: u32,
    pub active_consents: u32,
    pub pending_requests: u32,
    pub revoked_consents: u32,
    pub data_access_events: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Fhir,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json | ExportFormat::Fhir => "json",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataExportRequest {
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Queued,
    Processing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataExportJob {
    pub id: String,
    pub format: ExportFormat,
    pub status: ExportStatus,
    pub requested_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}
