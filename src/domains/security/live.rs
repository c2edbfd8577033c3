use super::models::*;
use super::SecurityApi;
use async_trait::async_trait;
use serde_json::json;
use shared::{Acknowledgement, OperationContext, Result, ServiceClient};

pub struct LiveSecurityService {
    client: ServiceClient,
}

impl LiveSecurityService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecurityApi for LiveSecurityService {
    async fn get_security_settings(&self) -> Result<SecuritySettings> {
        self.client
            .get("/security/settings")
            .await
            .or_fail("Failed to fetch security settings")
    }

    async fn update_security_settings(
        &self,
        update: SecuritySettingsUpdate,
    ) -> Result<SecuritySettings> {
        self.client
            .put("/security/settings", &update)
            .await
            .or_fail("Failed to update security settings")
    }

    async fn get_active_sessions(&self) -> Result<Vec<ActiveSession>> {
        self.client
            .get("/security/sessions")
            .await
            .or_fail("Failed to fetch active sessions")
    }

    async fn revoke_session(&self, session_id: &str) -> Result<Acknowledgement> {
        let endpoint = ServiceClient::endpoint(&["security", "sessions", session_id])
            .or_fail("Failed to revoke session")?;
        self.client
            .delete(&endpoint)
            .await
            .or_fail("Failed to revoke session")
    }

    async fn get_privacy_settings(&self) -> Result<PrivacySettings> {
        self.client
            .get("/security/privacy")
            .await
            .or_fail("Failed to fetch privacy settings")
    }

    async fn update_privacy_settings(
        &self,
        update: PrivacySettingsUpdate,
    ) -> Result<PrivacySettings> {
        self.client
            .put("/security/privacy", &update)
            .await
            .or_fail("Failed to update privacy settings")
    }

    async fn get_security_events(&self, limit: u32) -> Result<Vec<SecurityEvent>> {
        self.client
            .get_query("/security/events", &EventQuery { limit })
            .await
            .or_fail("Failed to fetch security events")
    }

    async fn enable_two_factor(&self) -> Result<TwoFactorSetup> {
        self.client
            .post("/security/two-factor/enable", &json!({}))
            .await
            .or_fail("Failed to enable two-factor authentication")
    }

    async fn change_pin(&self, request: ChangePinRequest) -> Result<Acknowledgement> {
        self.client
            .post("/security/pin/change", &request)
            .await
            .or_fail("Failed to change PIN")
    }
}
