//! Account security and privacy settings

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveSecurityService;
pub use mock::MockSecurityService;
pub use models::*;

use async_trait::async_trait;
use shared::{Acknowledgement, Result};

#[async_trait]
pub trait SecurityApi: Send + Sync {
    async fn get_security_settings(&self) -> Result<SecuritySettings>;

    async fn update_security_settings(
        &self,
        update: SecuritySettingsUpdate,
    ) -> Result<SecuritySettings>;

    async fn get_active_sessions(&self) -> Result<Vec<ActiveSession>>;

    /// The session making the call cannot be revoked.
    async fn revoke_session(&self, session_id: &str) -> Result<Acknowledgement>;

    async fn get_privacy_settings(&self) -> Result<PrivacySettings>;

    async fn update_privacy_settings(&self, update: PrivacySettingsUpdate)
        -> Result<PrivacySettings>;

    /// Most recent first, at most `limit` entries.
    async fn get_security_events(&self, limit: u32) -> Result<Vec<SecurityEvent>>;

    async fn enable_two_factor(&self) -> Result<TwoFactorSetup>;

    async fn change_pin(&self, request: ChangePinRequest) -> Result<Acknowledgement>;
}
