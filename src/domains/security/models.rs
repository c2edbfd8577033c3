use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PIN_LENGTH: usize = 4;
pub const MAX_PIN_LENGTH: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub biometric_enabled: bool,
    pub pin_enabled: bool,
    pub two_factor_enabled: bool,
    /// Minutes of inactivity before the app locks.
    pub auto_lock_minutes: u32,
    pub login_alerts: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            biometric_enabled: false,
            pin_enabled: true,
            two_factor_enabled: false,
            auto_lock_minutes: 5,
            login_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biometric_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_lock_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_alerts: Option<bool>,
}

impl SecuritySettings {
    pub fn apply(&mut self, update: SecuritySettingsUpdate) {
        if let Some(v) = update.biometric_enabled {
            self.biometric_enabled = v;
        }
        if let Some(v) = update.pin_enabled {
            self.pin_enabled = v;
        }
        if let Some(v) = update.auto_lock_minutes {
            self.auto_lock_minutes = v;
        }
        if let Some(v) = update.login_alerts {
            self.login_alerts = v;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub id: String,
    pub device_name: String,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub last_active_at: DateTime<Utc>,
    pub current: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileVisibility {
    Private,
    ProvidersOnly,
    Public,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub profile_visibility: ProfileVisibility,
    pub share_with_researchers: bool,
    pub analytics_opt_in: bool,
    /// Consent requests from these HIUs are granted without prompting.
    pub auto_approve_hius: Vec<String>,
    pub hide_sensitive_records: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visibility: ProfileVisibility::ProvidersOnly,
            share_with_researchers: false,
            analytics_opt_in: false,
            auto_approve_hius: Vec::new(),
            hide_sensitive_records: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_visibility: Option<ProfileVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_with_researchers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_opt_in: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approve_hius: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_sensitive_records: Option<bool>,
}

impl PrivacySettings {
    pub fn apply(&mut self, update: PrivacySettingsUpdate) {
        if let Some(v) = update.profile_visibility {
            self.profile_visibility = v;
        }
        if let Some(v) = update.share_with_researchers {
            self.share_with_researchers = v;
        }
        if let Some(v) = update.analytics_opt_in {
            self.analytics_opt_in = v;
        }
        if let Some(v) = update.auto_approve_hius {
            self.auto_approve_hius = v;
        }
        if let Some(v) = update.hide_sensitive_records {
            self.hide_sensitive_records = v;
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventKind {
    Login,
    FailedLogin,
    PinChanged,
    TwoFactorEnabled,
    SessionRevoked,
    SettingsChanged,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityEvent {
    pub id: String,
    pub kind: SecurityEventKind,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct EventQuery {
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorSetup {
    /// otpauth:// URI rendered as a QR code by the app.
    pub provisioning_uri: String,
    pub backup_codes: Vec<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePinRequest {
    pub current_pin: String,
    pub new_pin: String,
}

impl ChangePinRequest {
    pub fn new(current_pin: impl Into<String>, new_pin: impl Into<String>) -> Self {
        Self {
            current_pin: current_pin.into(),
            new_pin: new_pin.into(),
        }
    }
}

/// A PIN is 4 to 6 ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    (MIN_PIN_LENGTH..=MAX_PIN_LENGTH).contains(&pin.len()) && pin.bytes().all(|b| b.is_ascii_digit())
}
