//! ABHA identity registration (Aadhaar, mobile and email OTP flows)
//!
//! Every flow is three calls long: `generate_*_otp` hands back a `txnId`,
//! which must be passed unchanged to `verify_*_otp` and then to
//! `create_health_id_with_*`. Sequencing is the caller's job; the client
//! keeps no flow state and never inspects the `txnId`.

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveAbdmService;
pub use mock::MockAbdmService;
pub use models::*;

use async_trait::async_trait;
use shared::Result;

#[async_trait]
pub trait AbdmApi: Send + Sync {
    /// Authenticates the client against the gateway.
    async fn get_session_token(&self) -> Result<SessionToken>;

    async fn generate_otp(&self, flavor: OtpFlavor, identifier: &str) -> Result<OtpTransaction>;

    async fn verify_otp(&self, flavor: OtpFlavor, otp: &str, txn_id: &str) -> Result<OtpVerification>;

    async fn create_health_id(
        &self,
        flavor: OtpFlavor,
        request: CreateHealthIdRequest,
    ) -> Result<HealthIdProfile>;

    async fn get_profile(&self) -> Result<HealthIdProfile>;

    async fn generate_aadhaar_otp(&self, aadhaar: &str) -> Result<OtpTransaction> {
        self.generate_otp(OtpFlavor::Aadhaar, aadhaar).await
    }

    async fn verify_aadhaar_otp(&self, otp: &str, txn_id: &str) -> Result<OtpVerification> {
        self.verify_otp(OtpFlavor::Aadhaar, otp, txn_id).await
    }

    async fn create_health_id_with_aadhaar(
        &self,
        request: CreateHealthIdRequest,
    ) -> Result<HealthIdProfile> {
        self.create_health_id(OtpFlavor::Aadhaar, request).await
    }

    async fn generate_mobile_otp(&self, mobile: &str) -> Result<OtpTransaction> {
        self.generate_otp(OtpFlavor::Mobile, mobile).await
    }

    async fn verify_mobile_otp(&self, otp: &str, txn_id: &str) -> Result<OtpVerification> {
        self.verify_otp(OtpFlavor::Mobile, otp, txn_id).await
    }

    async fn create_health_id_with_mobile(
        &self,
        request: CreateHealthIdRequest,
    ) -> Result<HealthIdProfile> {
        self.create_health_id(OtpFlavor::Mobile, request).await
    }

    async fn generate_email_otp(&self, email: &str) -> Result<OtpTransaction> {
        self.generate_otp(OtpFlavor::Email, email).await
    }

    async fn verify_email_otp(&self, otp: &str, txn_id: &str) -> Result<OtpVerification> {
        self.verify_otp(OtpFlavor::Email, otp, txn_id).await
    }

    async fn create_health_id_with_email(
        &self,
        request: CreateHealthIdRequest,
    ) -> Result<HealthIdProfile> {
        self.create_health_id(OtpFlavor::Email, request).await
    }
}
