//! Request/response contracts for ABHA registration against the ABDM gateway

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which identifier drives an OTP registration flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OtpFlavor {
    Aadhaar,
    Mobile,
    Email,
}

impl OtpFlavor {
    pub fn path_segment(&self) -> &'static str {
        match self {
            OtpFlavor::Aadhaar => "aadhaar",
            OtpFlavor::Mobile => "mobile",
            OtpFlavor::Email => "email",
        }
    }

    /// JSON field carrying the identifier in a `generateOtp` body.
    pub fn identifier_field(&self) -> &'static str {
        self.path_segment()
    }

    pub fn generate_otp_path(&self) -> String {
        format!("/v2/registration/{}/generateOtp", self.path_segment())
    }

    pub fn verify_otp_path(&self) -> String {
        format!("/v2/registration/{}/verifyOTP", self.path_segment())
    }

    pub fn create_health_id_path(&self) -> String {
        format!("/v2/registration/{}/createHealthId", self.path_segment())
    }
}

impl fmt::Display for OtpFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub client_id: String,
    pub client_secret: String,
}

/// Gateway session. Opaque to the client: no refresh or expiry tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Correlates the generate → verify → create steps of one flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OtpTransaction {
    pub txn_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub otp: String,
    pub txn_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    pub txn_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthIdRequest {
    pub txn_id: String,
    /// Desired ABHA address, e.g. `asha.verma@sbx`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CreateHealthIdRequest {
    pub fn new(txn_id: impl Into<String>) -> Self {
        Self {
            txn_id: txn_id.into(),
            ..Default::default()
        }
    }

    pub fn with_health_id(mut self, health_id: impl Into<String>) -> Self {
        self.health_id = Some(health_id.into());
        self
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }
}

/// ABHA account as returned after creation or by the profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthIdProfile {
    pub health_id_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<String>,
    #[serde(default)]
    pub kyc_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
