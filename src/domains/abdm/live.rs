use super::models::*;
use super::AbdmApi;
use async_trait::async_trait;
use shared::config::ClientCredentials;
use shared::utils::mask_identifier;
use shared::{OperationContext, Result, ServiceClient};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct LiveAbdmService {
    client: ServiceClient,
    credentials: ClientCredentials,
}

impl LiveAbdmService {
    pub fn new(client: ServiceClient, credentials: ClientCredentials) -> Self {
        Self { client, credentials }
    }
}

#[async_trait]
impl AbdmApi for LiveAbdmService {
    async fn get_session_token(&self) -> Result<SessionToken> {
        let request = SessionRequest {
            client_id: self.credentials.client_id.clone(),
            client_secret: self.credentials.client_secret.clone(),
        };

        let token: SessionToken = self
            .client
            .post("/v1/auth/init", &request)
            .await
            .or_fail("Failed to fetch session token")?;

        self.client.set_session_token(&token.access_token);
        info!("🔐 ABDM gateway session established");
        Ok(token)
    }

    async fn generate_otp(&self, flavor: OtpFlavor, identifier: &str) -> Result<OtpTransaction> {
        debug!(%flavor, identifier = %mask_identifier(identifier), "generating OTP");
        let body = BTreeMap::from([(flavor.identifier_field(), identifier)]);

        self.client
            .post(&flavor.generate_otp_path(), &body)
            .await
            .or_fail("Failed to generate OTP")
    }

    async fn verify_otp(&self, flavor: OtpFlavor, otp: &str, txn_id: &str) -> Result<OtpVerification> {
        let body = VerifyOtpRequest {
            otp: otp.to_string(),
            txn_id: txn_id.to_string(),
        };

        self.client
            .post(&flavor.verify_otp_path(), &body)
            .await
            .or_fail("Failed to verify OTP")
    }

    async fn create_health_id(
        &self,
        flavor: OtpFlavor,
        request: CreateHealthIdRequest,
    ) -> Result<HealthIdProfile> {
        self.client
            .post(&flavor.create_health_id_path(), &request)
            .await
            .or_fail("Failed to create health ID")
    }

    async fn get_profile(&self) -> Result<HealthIdProfile> {
        self.client
            .get("/v1/account/profile")
            .await
            .or_fail("Failed to fetch profile")
    }
}
