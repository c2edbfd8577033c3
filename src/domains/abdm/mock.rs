use super::models::*;
use super::AbdmApi;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::config::DeveloperProfile;
use shared::utils::{mask_identifier, timestamp_millis};
use shared::{MockLatency, Result};
use tracing::info;

/// In-memory ABDM fake.
///
/// Accepts any `txnId` and any OTP: chain integrity is only enforced by the
/// real gateway.
pub struct MockAbdmService {
    latency: MockLatency,
    developer: DeveloperProfile,
    registered: Mutex<Option<HealthIdProfile>>,
}

impl MockAbdmService {
    pub fn new(latency: MockLatency, developer: DeveloperProfile) -> Self {
        Self {
            latency,
            developer,
            registered: Mutex::new(None),
        }
    }

    fn developer_profile(&self) -> HealthIdProfile {
        let d = &self.developer;
        HealthIdProfile {
            health_id_number: d.abha_number.clone(),
            health_id: Some(d.abha_address.clone()),
            name: format!("{} {}", d.first_name, d.last_name),
            first_name: Some(d.first_name.clone()),
            last_name: Some(d.last_name.clone()),
            mobile: Some(d.mobile.clone()),
            email: Some(d.email.clone()),
            gender: Some("M".to_string()),
            year_of_birth: Some("1990".to_string()),
            kyc_verified: true,
            token: None,
        }
    }
}

#[async_trait]
impl AbdmApi for MockAbdmService {
    async fn get_session_token(&self) -> Result<SessionToken> {
        self.latency.pause(300).await;
        Ok(SessionToken {
            access_token: format!("dev-session-token-{}", timestamp_millis()),
            expires_in: Some(1800),
            token_type: Some("bearer".to_string()),
        })
    }

    async fn generate_otp(&self, flavor: OtpFlavor, identifier: &str) -> Result<OtpTransaction> {
        self.latency.pause(500).await;
        info!(%flavor, identifier = %mask_identifier(identifier), "🧪 mock OTP generated");
        Ok(OtpTransaction {
            txn_id: format!("dev-txn-{}-{}", flavor, timestamp_millis()),
        })
    }

    async fn verify_otp(&self, flavor: OtpFlavor, _otp: &str, txn_id: &str) -> Result<OtpVerification> {
        self.latency.pause(500).await;
        let d = &self.developer;
        Ok(OtpVerification {
            txn_id: txn_id.to_string(),
            mobile_number: Some(d.mobile.clone()),
            email: (flavor == OtpFlavor::Email).then(|| d.email.clone()),
            name: Some(format!("{} {}", d.first_name, d.last_name)),
            gender: Some("M".to_string()),
            year_of_birth: Some("1990".to_string()),
        })
    }

    async fn create_health_id(
        &self,
        flavor: OtpFlavor,
        request: CreateHealthIdRequest,
    ) -> Result<HealthIdProfile> {
        self.latency.pause(1000).await;

        let mut profile = self.developer_profile();
        if let Some(health_id) = request.health_id {
            profile.health_id = Some(health_id);
        }
        if request.first_name.is_some() || request.last_name.is_some() {
            profile.first_name = request.first_name;
            profile.last_name = request.last_name;
            profile.name = [profile.first_name.as_deref(), profile.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
        }
        if request.email.is_some() {
            profile.email = request.email;
        }
        profile.kyc_verified = flavor == OtpFlavor::Aadhaar;
        profile.token = Some(format!("dev-abha-token-{}", timestamp_millis()));

        info!(%flavor, health_id = ?profile.health_id, "🧪 mock ABHA created");
        *self.registered.lock() = Some(profile.clone());
        Ok(profile)
    }

    async fn get_profile(&self) -> Result<HealthIdProfile> {
        self.latency.pause(400).await;
        let registered = self.registered.lock().clone();
        Ok(registered.unwrap_or_else(|| self.developer_profile()))
    }
}
