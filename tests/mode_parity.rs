//! Mock results served through a fake gateway must decode, through the live
//! implementation, into exactly the same values.

use ayusetu::domains::compliance::{AuditLogQuery, ConsentStatus};
use ayusetu::domains::ingestion::RecordQuery;
use ayusetu::domains::insurance::{ClaimQuery, PolicyQuery};
use ayusetu::domains::notifications::NotificationQuery;
use ayusetu::{AppServices, Config};
use serde::Serialize;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    mock: AppServices,
    live: AppServices,
}

impl Harness {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let live = AppServices::live(&Config::live(server.uri())).unwrap();
        let mock = AppServices::mock(&Config::developer().without_latency());
        Self { server, mock, live }
    }

    async fn serve<T: Serialize>(&self, verb: &str, route: &str, body: &T) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

#[tokio::test]
async fn otp_chain_parity() {
    let h = Harness::start().await;

    let txn = h.mock.abdm.generate_email_otp("dev.user@ayusetu.in").await.unwrap();
    h.serve("POST", "/v2/registration/email/generateOtp", &txn).await;
    assert_eq!(h.live.abdm.generate_email_otp("dev.user@ayusetu.in").await.unwrap(), txn);

    let verified = h.mock.abdm.verify_email_otp("000000", &txn.txn_id).await.unwrap();
    h.serve("POST", "/v2/registration/email/verifyOTP", &verified).await;
    assert_eq!(
        h.live.abdm.verify_email_otp("000000", &txn.txn_id).await.unwrap(),
        verified
    );

    let request = ayusetu::domains::abdm::CreateHealthIdRequest::new(&verified.txn_id);
    let profile = h
        .mock
        .abdm
        .create_health_id_with_email(request.clone())
        .await
        .unwrap();
    h.serve("POST", "/v2/registration/email/createHealthId", &profile).await;
    assert_eq!(
        h.live.abdm.create_health_id_with_email(request).await.unwrap(),
        profile
    );
}

#[tokio::test]
async fn accessibility_parity() {
    let h = Harness::start().await;

    let languages = h.mock.accessibility.get_languages().await.unwrap();
    h.serve("GET", "/accessibility/languages", &languages).await;
    assert_eq!(h.live.accessibility.get_languages().await.unwrap(), languages);

    let bundle = h.mock.accessibility.get_translations("hi-IN").await.unwrap();
    h.serve("GET", "/accessibility/translations/hi-IN", &bundle).await;
    assert_eq!(h.live.accessibility.get_translations("hi-IN").await.unwrap(), bundle);
}

#[tokio::test]
async fn appointments_parity() {
    let h = Harness::start().await;

    let specialties = h.mock.appointments.get_specialties().await.unwrap();
    h.serve("GET", "/appointments/specialties", &specialties).await;
    assert_eq!(h.live.appointments.get_specialties().await.unwrap(), specialties);

    let appointments = h
        .mock
        .appointments
        .get_appointments(Default::default())
        .await
        .unwrap();
    h.serve("GET", "/appointments", &appointments).await;
    assert_eq!(
        h.live.appointments.get_appointments(Default::default()).await.unwrap(),
        appointments
    );
}

#[tokio::test]
async fn compliance_parity() {
    let h = Harness::start().await;

    let consents = h
        .mock
        .compliance
        .get_consents(Some(ConsentStatus::Granted))
        .await
        .unwrap();
    h.serve("GET", "/compliance/consents", &consents).await;
    assert_eq!(
        h.live
            .compliance
            .get_consents(Some(ConsentStatus::Granted))
            .await
            .unwrap(),
        consents
    );

    let logs = h
        .mock
        .compliance
        .get_audit_logs(AuditLogQuery::default())
        .await
        .unwrap();
    h.serve("GET", "/compliance/audit-logs", &logs).await;
    assert_eq!(
        h.live.compliance.get_audit_logs(AuditLogQuery::default()).await.unwrap(),
        logs
    );

    let report = h.mock.compliance.get_compliance_report().await.unwrap();
    h.serve("GET", "/compliance/report", &report).await;
    assert_eq!(h.live.compliance.get_compliance_report().await.unwrap(), report);
}

#[tokio::test]
async fn emergency_parity() {
    let h = Harness::start().await;

    let contacts = h.mock.emergency.get_emergency_contacts().await.unwrap();
    h.serve("GET", "/emergency/contacts", &contacts).await;
    assert_eq!(h.live.emergency.get_emergency_contacts().await.unwrap(), contacts);

    let profile = h.mock.emergency.get_emergency_profile().await.unwrap();
    h.serve("GET", "/emergency/profile", &profile).await;
    assert_eq!(h.live.emergency.get_emergency_profile().await.unwrap(), profile);
}

#[tokio::test]
async fn ingestion_parity() {
    let h = Harness::start().await;

    let providers = h.mock.ingestion.get_sync_providers().await.unwrap();
    h.serve("GET", "/ingestion/providers", &providers).await;
    assert_eq!(h.live.ingestion.get_sync_providers().await.unwrap(), providers);

    let records = h
        .mock
        .ingestion
        .get_uploaded_records(RecordQuery::default())
        .await
        .unwrap();
    h.serve("GET", "/ingestion/records", &records).await;
    assert_eq!(
        h.live
            .ingestion
            .get_uploaded_records(RecordQuery::default())
            .await
            .unwrap(),
        records
    );
}

#[tokio::test]
async fn insurance_parity() {
    let h = Harness::start().await;
    let current = PolicyQuery {
        include_expired: false,
        policy_type: None,
    };

    let policies = h.mock.insurance.get_policies(current.clone()).await.unwrap();
    h.serve("GET", "/insurance/policies", &policies).await;
    assert_eq!(h.live.insurance.get_policies(current).await.unwrap(), policies);

    let claims = h.mock.insurance.get_claims(ClaimQuery::default()).await.unwrap();
    h.serve("GET", "/insurance/claims", &claims).await;
    assert_eq!(h.live.insurance.get_claims(ClaimQuery::default()).await.unwrap(), claims);

    let coverage = h
        .mock
        .insurance
        .check_coverage("pol-001", "Cataract surgery")
        .await
        .unwrap();
    h.serve("GET", "/insurance/policies/pol-001/coverage", &coverage).await;
    assert_eq!(
        h.live
            .insurance
            .check_coverage("pol-001", "Cataract surgery")
            .await
            .unwrap(),
        coverage
    );
}

#[tokio::test]
async fn notifications_parity() {
    let h = Harness::start().await;

    let notifications = h
        .mock
        .notifications
        .get_notifications(NotificationQuery::default())
        .await
        .unwrap();
    h.serve("GET", "/notifications", &notifications).await;
    assert_eq!(
        h.live
            .notifications
            .get_notifications(NotificationQuery::default())
            .await
            .unwrap(),
        notifications
    );

    let preferences = h.mock.notifications.get_preferences().await.unwrap();
    h.serve("GET", "/notifications/preferences", &preferences).await;
    assert_eq!(h.live.notifications.get_preferences().await.unwrap(), preferences);
}

#[tokio::test]
async fn security_parity() {
    let h = Harness::start().await;

    let sessions = h.mock.security.get_active_sessions().await.unwrap();
    h.serve("GET", "/security/sessions", &sessions).await;
    assert_eq!(h.live.security.get_active_sessions().await.unwrap(), sessions);

    let privacy = h.mock.security.get_privacy_settings().await.unwrap();
    h.serve("GET", "/security/privacy", &privacy).await;
    assert_eq!(h.live.security.get_privacy_settings().await.unwrap(), privacy);

    let events = h.mock.security.get_security_events(10).await.unwrap();
    h.serve("GET", "/security/events", &events).await;
    assert_eq!(h.live.security.get_security_events(10).await.unwrap(), events);
}

#[tokio::test]
async fn reads_are_idempotent_in_mock_mode() {
    let services = AppServices::mock(&Config::developer().without_latency());

    let first = services.compliance.get_compliance_report().await.unwrap();
    let second = services.compliance.get_compliance_report().await.unwrap();
    assert_eq!(first, second);

    let first = services.insurance.get_policies(PolicyQuery::default()).await.unwrap();
    let second = services.insurance.get_policies(PolicyQuery::default()).await.unwrap();
    assert_eq!(first, second);

    let first = services.security.get_active_sessions().await.unwrap();
    let second = services.security.get_active_sessions().await.unwrap();
    assert_eq!(first, second);
}
