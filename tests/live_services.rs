use ayusetu::domains::abdm::CreateHealthIdRequest;
use ayusetu::domains::ingestion::{RecordType, UploadFile};
use ayusetu::domains::insurance::PolicyQuery;
use ayusetu::{AppError, AppServices, Config};
use serde_json::json;
use shared::service_client::REQUEST_ID_HEADER;
use std::time::Duration;
use wiremock::matchers::{
    body_partial_json, body_string_contains, header, header_exists, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn live(server: &MockServer) -> AppServices {
    AppServices::live(&Config::live(server.uri())).unwrap()
}

#[tokio::test]
async fn aadhaar_otp_chain_carries_txn_id_through_every_step() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/registration/aadhaar/generateOtp"))
        .and(body_partial_json(json!({ "aadhaar": "123456789012" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "txnId": "txn-42" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/registration/aadhaar/verifyOTP"))
        .and(body_partial_json(json!({ "otp": "000000", "txnId": "txn-42" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "txnId": "txn-42",
            "mobileNumber": "9876543210"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/registration/aadhaar/createHealthId"))
        .and(body_partial_json(json!({ "txnId": "txn-42", "healthId": "asha.verma@sbx" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "healthIdNumber": "91-5555-6666-7777",
            "healthId": "asha.verma@sbx",
            "name": "Asha Verma",
            "kycVerified": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let abdm = live(&server).abdm;
    let txn = abdm.generate_aadhaar_otp("123456789012").await.unwrap();
    let verified = abdm.verify_aadhaar_otp("000000", &txn.txn_id).await.unwrap();
    assert_eq!(verified.mobile_number.as_deref(), Some("9876543210"));

    let profile = abdm
        .create_health_id_with_aadhaar(
            CreateHealthIdRequest::new(&verified.txn_id).with_health_id("asha.verma@sbx"),
        )
        .await
        .unwrap();
    assert_eq!(profile.health_id_number, "91-5555-6666-7777");
    assert!(profile.kyc_verified);
}

#[tokio::test]
async fn unknown_txn_id_surfaces_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/registration/mobile/verifyOTP"))
        .and(body_partial_json(json!({ "txnId": "forged-txn" })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "HIS-400",
            "message": "Invalid transaction id"
        })))
        .mount(&server)
        .await;

    let abdm = live(&server).abdm;
    let err = abdm.verify_mobile_otp("123456", "forged-txn").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to verify OTP");
    match err.root_cause() {
        AppError::ExternalService { message, .. } => assert!(message.contains("400")),
        other => panic!("unexpected cause: {:?}", other),
    }

    let err = abdm
        .create_health_id_with_mobile(CreateHealthIdRequest::new("forged-txn"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to create health ID");
}

#[tokio::test]
async fn session_token_is_attached_to_other_domains() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/init"))
        .and(body_partial_json(json!({ "clientId": "SBX_AYUSETU_DEV" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "gateway-token",
            "expiresIn": 1800,
            "tokenType": "bearer"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notifications/unread-count"))
        .and(header("authorization", "Bearer gateway-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let services = live(&server);
    let token = services.abdm.get_session_token().await.unwrap();
    assert_eq!(token.access_token, "gateway-token");

    let unread = services.notifications.get_unread_count().await.unwrap();
    assert_eq!(unread.count, 4);
}

#[tokio::test]
async fn every_request_carries_a_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/security/settings"))
        .and(header_exists(REQUEST_ID_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "biometricEnabled": true,
            "pinEnabled": true,
            "twoFactorEnabled": false,
            "autoLockMinutes": 2,
            "loginAlerts": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = live(&server).security.get_security_settings().await.unwrap();
    assert_eq!(settings.auto_lock_minutes, 2);
}

#[tokio::test]
async fn server_errors_map_to_static_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compliance/report"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = live(&server)
        .compliance
        .get_compliance_report()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Operation { .. }));
    assert_eq!(err.to_string(), "Failed to fetch compliance report");
    assert_eq!(err.error_code(), "OPERATION_FAILED");
}

#[tokio::test]
async fn undecodable_body_is_an_operation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/insurance/claims/clm-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = live(&server).insurance.get_claim("clm-1").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch claim");
}

#[tokio::test]
async fn slow_gateway_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accessibility/languages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = Config::live(server.uri());
    config.request_timeout_seconds = 1;
    let services = AppServices::live(&config).unwrap();

    let err = services.accessibility.get_languages().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch languages");
    assert!(matches!(err.root_cause(), AppError::Timeout { .. }));
}

#[tokio::test]
async fn expired_policy_filter_is_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/insurance/policies"))
        .and(query_param("includeExpired", "false"))
        .and(query_param("policyType", "government"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let policies = live(&server)
        .insurance
        .get_policies(PolicyQuery {
            include_expired: false,
            policy_type: Some(ayusetu::domains::insurance::PolicyType::Government),
        })
        .await
        .unwrap();
    assert!(policies.is_empty());
}

#[tokio::test]
async fn upload_is_sent_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingestion/upload"))
        .and(body_string_contains("cbc-report.pdf"))
        .and(body_string_contains("\"recordType\":\"lab_report\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "rec-1",
            "fileName": "cbc-report.pdf",
            "mimeType": "application/pdf",
            "sizeBytes": 13,
            "recordType": "lab_report",
            "title": "CBC",
            "status": "processing",
            "source": "upload",
            "uploadedAt": "2026-10-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = UploadFile::new(
        "cbc-report.pdf",
        "application/pdf",
        b"%PDF-1.4 test".to_vec(),
        RecordType::LabReport,
    )
    .with_title("CBC");
    let record = live(&server).ingestion.upload_file(file).await.unwrap();
    assert_eq!(record.id, "rec-1");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .iter()
        .find(|(name, _)| name.as_str().eq_ignore_ascii_case("content-type"))
        .map(|(_, values)| values.as_str())
        .unwrap();
    let mime: mime::Mime = content_type.parse().unwrap();
    assert_eq!(mime.essence_str(), "multipart/form-data");
}

#[tokio::test]
async fn bulk_upload_is_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingestion/bulk-upload"))
        .and(body_string_contains("a.pdf"))
        .and(body_string_contains("b.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let files = ["a.pdf", "b.pdf"]
        .into_iter()
        .map(|name| UploadFile::new(name, "application/pdf", b"%PDF".to_vec(), RecordType::Other))
        .collect();
    live(&server).ingestion.bulk_upload(files).await.unwrap();
}

#[tokio::test]
async fn ids_are_escaped_into_a_single_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/security/sessions/sess-web-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/ingestion/records/..%2F..%2Fsecurity%2Fsessions%2Fsess-web-01"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such record"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/insurance/claims/clm%237"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "clm#7",
            "claimNumber": "CLM-2026-0007",
            "policyId": "pol-001",
            "hospitalName": "AIIMS New Delhi",
            "diagnosis": "Viral fever",
            "amountClaimed": 1200,
            "status": "submitted",
            "submittedAt": "2026-10-01T10:00:00Z",
            "documentIds": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let services = live(&server);
    let err = services
        .ingestion
        .delete_record("../../security/sessions/sess-web-01")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete record");

    let claim = services.insurance.get_claim("clm#7").await.unwrap();
    assert_eq!(claim.id, "clm#7");

    let err = services.ingestion.get_record("..").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch record");
    assert_eq!(err.root_cause().error_code(), "REJECTED");
}
