use super::models::*;
use super::ComplianceApi;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use shared::utils::generate_mock_id;
use shared::{AppError, MockLatency, OperationContext, Result};
use tracing::info;

struct ComplianceState {
    consents: Vec<ConsentArtefact>,
    audit: Vec<AuditLogEntry>,
    /// Report timestamp; moves only when consents or audit entries change.
    changed_at: DateTime<Utc>,
}

impl ComplianceState {
    fn record(&mut self, actor: &str, role: ActorRole, action: AuditAction, resource_id: &str) {
        let now = Utc::now();
        self.audit.push(AuditLogEntry {
            id: generate_mock_id("aud"),
            timestamp: now,
            actor: actor.to_string(),
            actor_role: role,
            action,
            resource_type: "consent".to_string(),
            resource_id: resource_id.to_string(),
            outcome: AuditOutcome::Success,
        });
        self.changed_at = now;
    }
}

pub struct MockComplianceService {
    latency: MockLatency,
    state: Mutex<ComplianceState>,
}

impl MockComplianceService {
    pub fn new(latency: MockLatency) -> Self {
        let now = Utc::now();
        Self {
            latency,
            state: Mutex::new(ComplianceState {
                consents: seed_consents(now),
                audit: seed_audit(now),
                changed_at: now,
            }),
        }
    }
}

fn consent(
    id: &str,
    hiu: (&str, &str),
    requester: &str,
    purpose: ConsentPurpose,
    status: ConsentStatus,
    hi_types: Vec<HiType>,
    created_at: DateTime<Utc>,
) -> ConsentArtefact {
    ConsentArtefact {
        id: id.to_string(),
        requester_name: requester.to_string(),
        hiu_id: hiu.0.to_string(),
        hiu_name: hiu.1.to_string(),
        purpose,
        status,
        hi_types,
        date_range: DateRange {
            from: created_at - Duration::days(365),
            to: created_at,
        },
        expires_at: created_at + Duration::days(30),
        created_at,
        updated_at: created_at,
    }
}

fn seed_consents(now: DateTime<Utc>) -> Vec<ConsentArtefact> {
    vec![
        consent(
            "consent-001",
            ("hiu-apollo", "Apollo Hospitals"),
            "Dr. Rajesh Iyer",
            ConsentPurpose::CareManagement,
            ConsentStatus::Requested,
            vec![HiType::Prescription, HiType::DiagnosticReport],
            now - Duration::hours(2),
        ),
        consent(
            "consent-002",
            ("hiu-aiims", "AIIMS New Delhi"),
            "Dr. Priya Sharma",
            ConsentPurpose::CareManagement,
            ConsentStatus::Granted,
            vec![HiType::OpConsultation, HiType::DischargeSummary],
            now - Duration::days(5),
        ),
        consent(
            "consent-003",
            ("hiu-star-health", "Star Health Insurance"),
            "Claims Desk",
            ConsentPurpose::HealthcarePayment,
            ConsentStatus::Revoked,
            vec![HiType::DischargeSummary],
            now - Duration::days(40),
        ),
    ]
}

fn seed_audit(now: DateTime<Utc>) -> Vec<AuditLogEntry> {
    let entry = |days_ago: i64, actor: &str, role, action, resource_type: &str, resource_id: &str| AuditLogEntry {
        id: format!("aud-seed-{}", days_ago),
        timestamp: now - Duration::days(days_ago),
        actor: actor.to_string(),
        actor_role: role,
        action,
        resource_type: resource_type.to_string(),
        resource_id: resource_id.to_string(),
        outcome: AuditOutcome::Success,
    };

    vec![
        entry(1, "AIIMS New Delhi", ActorRole::Hiu, AuditAction::RecordAccessed, "record", "rec-opd-2024-11"),
        entry(3, "self", ActorRole::Patient, AuditAction::RecordUploaded, "record", "rec-lab-cbc"),
        entry(5, "self", ActorRole::Patient, AuditAction::ConsentGranted, "consent", "consent-002"),
        entry(7, "City Diagnostics", ActorRole::Hip, AuditAction::RecordShared, "record", "rec-lab-cbc"),
        entry(10, "self", ActorRole::Patient, AuditAction::Login, "session", "sess-android"),
        entry(38, "self", ActorRole::Patient, AuditAction::ConsentRevoked, "consent", "consent-003"),
    ]
}

#[async_trait]
impl ComplianceApi for MockComplianceService {
    async fn get_consents(&self, status: Option<ConsentStatus>) -> Result<Vec<ConsentArtefact>> {
        self.latency.pause(500).await;
        Ok(self
            .state
            .lock()
            .consents
            .iter()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect())
    }

    async fn respond_to_consent(&self, consent_id: &str, decision: ConsentDecision) -> Result<ConsentArtefact> {
        self.latency.pause(800).await;
        let mut state = self.state.lock();
        let now = Utc::now();

        let updated = match state.consents.iter_mut().find(|c| c.id == consent_id) {
            None => Err(AppError::not_found(format!("consent {}", consent_id))),
            Some(c) if c.status != ConsentStatus::Requested => {
                Err(AppError::rejected(format!("consent {} is {:?}", consent_id, c.status)))
            }
            Some(c) => {
                if decision.approve {
                    c.status = ConsentStatus::Granted;
                    if let Some(types) = decision.hi_types {
                        c.hi_types.retain(|t| types.contains(t));
                    }
                    if let Some(expires_at) = decision.expires_at {
                        c.expires_at = expires_at;
                    }
                } else {
                    c.status = ConsentStatus::Denied;
                }
                c.updated_at = now;
                Ok(c.clone())
            }
        }
        .or_fail("Failed to respond to consent request")?;

        let action = if decision.approve {
            AuditAction::ConsentGranted
        } else {
            AuditAction::ConsentDenied
        };
        state.record("self", ActorRole::Patient, action, consent_id);
        info!(consent_id, approved = decision.approve, "🧪 mock consent decided");
        Ok(updated)
    }

    async fn revoke_consent(&self, consent_id: &str) -> Result<ConsentArtefact> {
        self.latency.pause(800).await;
        let mut state = self.state.lock();

        let updated = match state.consents.iter_mut().find(|c| c.id == consent_id) {
            None => Err(AppError::not_found(format!("consent {}", consent_id))),
            Some(c) if c.status != ConsentStatus::Granted => {
                Err(AppError::rejected(format!("consent {} is {:?}", consent_id, c.status)))
            }
            Some(c) => {
                c.status = ConsentStatus::Revoked;
                c.updated_at = Utc::now();
                Ok(c.clone())
            }
        }
        .or_fail("Failed to revoke consent")?;

        state.record("self", ActorRole::Patient, AuditAction::ConsentRevoked, consent_id);
        info!(consent_id, "🧪 mock consent revoked");
        Ok(updated)
    }

    async fn get_audit_logs(&self, query: AuditLogQuery) -> Result<Vec<AuditLogEntry>> {
        self.latency.pause(600).await;
        let mut entries: Vec<AuditLogEntry> = self
            .state
            .lock()
            .audit
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(query.page().apply(&entries))
    }

    async fn get_compliance_report(&self) -> Result<ComplianceReport> {
        self.latency.pause(700).await;
        let state = self.state.lock();
        let count = |status: ConsentStatus| state.consents.iter().filter(|c| c.status == status).count() as u32;
        let accesses: Vec<&AuditLogEntry> = state
            .audit
            .iter()
            .filter(|e| matches!(e.action, AuditAction::RecordAccessed | AuditAction::RecordShared))
            .collect();

        Ok(ComplianceReport {
            generated_at: state.changed_at,
            total_consents: state.consents.len() as u32,
            active_consents: count(ConsentStatus::Granted),
            pending_requests: count(ConsentStatus::Requested),
            revoked_consents: count(ConsentStatus::Revoked),
            data_access_events: accesses.len() as u32,
            last_access_at: accesses.iter().map(|e| e.timestamp).max(),
        })
    }

    async fn request_data_export(&self, format: ExportFormat) -> Result<DataExportJob> {
        self.latency.pause(2000).await;
        let id = generate_mock_id("export");
        let job = DataExportJob {
            download_url: Some(format!("https://dev.ayusetu.in/exports/{}.{}", id, format.extension())),
            id,
            format,
            status: ExportStatus::Ready,
            requested_at: Utc::now(),
        };
        let mut state = self.state.lock();
        state.record("self", ActorRole::Patient, AuditAction::DataExported, &job.id);
        Ok(job)
    }
}
