use super::models::*;
use super::SecurityApi;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use shared::utils::{generate_mock_id, random_between};
use shared::{Acknowledgement, AppError, MockLatency, OperationContext, Result};
use tracing::info;
use uuid::Uuid;

/// PIN every fresh mock account starts with.
pub const DEFAULT_MOCK_PIN: &str = "1234";

const CURRENT_SESSION_ID: &str = "sess-current";

struct SecurityState {
    settings: SecuritySettings,
    privacy: PrivacySettings,
    sessions: Vec<ActiveSession>,
    events: Vec<SecurityEvent>,
    pin: String,
}

impl SecurityState {
    fn log(&mut self, kind: SecurityEventKind, description: impl Into<String>) {
        self.events.push(SecurityEvent {
            id: generate_mock_id("sev"),
            kind,
            description: description.into(),
            occurred_at: Utc::now(),
            device_name: Some("Pixel 7".to_string()),
        });
    }
}

pub struct MockSecurityService {
    latency: MockLatency,
    state: Mutex<SecurityState>,
}

impl MockSecurityService {
    pub fn new(latency: MockLatency) -> Self {
        let now = Utc::now();
        let session = |id: &str, device: &str, platform: &str, location: &str, minutes_ago: i64| ActiveSession {
            id: id.to_string(),
            device_name: device.to_string(),
            platform: platform.to_string(),
            location: Some(location.to_string()),
            ip_address: None,
            last_active_at: now - Duration::minutes(minutes_ago),
            current: id == CURRENT_SESSION_ID,
        };
        let event = |id: &str, kind: SecurityEventKind, description: &str, hours_ago: i64, device: &str| SecurityEvent {
            id: id.to_string(),
            kind,
            description: description.to_string(),
            occurred_at: now - Duration::hours(hours_ago),
            device_name: Some(device.to_string()),
        };

        Self {
            latency,
            state: Mutex::new(SecurityState {
                settings: SecuritySettings::default(),
                privacy: PrivacySettings::default(),
                sessions: vec![
                    session(CURRENT_SESSION_ID, "Pixel 7", "android", "New Delhi, IN", 0),
                    session("sess-web-01", "Chrome on Windows", "web", "Gurugram, IN", 180),
                    session("sess-ios-01", "iPad Air", "ios", "Jaipur, IN", 4320),
                ],
                events: vec![
                    event("sev-001", SecurityEventKind::Login, "Signed in with ABHA OTP", 72, "iPad Air"),
                    event("sev-002", SecurityEventKind::FailedLogin, "Incorrect PIN entered", 26, "Chrome on Windows"),
                    event("sev-003", SecurityEventKind::Login, "Signed in with ABHA OTP", 3, "Chrome on Windows"),
                    event("sev-004", SecurityEventKind::Login, "Signed in with biometrics", 0, "Pixel 7"),
                ],
                pin: DEFAULT_MOCK_PIN.to_string(),
            }),
        }
    }
}

/// Eight one-time codes formatted `1234-5678`.
fn backup_codes() -> Vec<String> {
    (0..8)
        .map(|_| format!("{:04}-{:04}", random_between(0, 9999), random_between(0, 9999)))
        .collect()
}

#[async_trait]
impl SecurityApi for MockSecurityService {
    async fn get_security_settings(&self) -> Result<SecuritySettings> {
        self.latency.pause(300).await;
        Ok(self.state.lock().settings.clone())
    }

    async fn update_security_settings(
        &self,
        update: SecuritySettingsUpdate,
    ) -> Result<SecuritySettings> {
        self.latency.pause(500).await;
        if update.auto_lock_minutes == Some(0) {
            return Err(AppError::rejected("auto-lock must be at least one minute"))
                .or_fail("Failed to update security settings");
        }
        let mut state = self.state.lock();
        state.settings.apply(update);
        state.log(SecurityEventKind::SettingsChanged, "Security settings updated");
        Ok(state.settings.clone())
    }

    async fn get_active_sessions(&self) -> Result<Vec<ActiveSession>> {
        self.latency.pause(400).await;
        let mut sessions = self.state.lock().sessions.clone();
        sessions.sort_by(|a, b| b.last_active_at.cmp(&a.last_active_at));
        Ok(sessions)
    }

    async fn revoke_session(&self, session_id: &str) -> Result<Acknowledgement> {
        self.latency.pause(500).await;
        let mut state = self.state.lock();
        let session = state
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("session {}", session_id)))
            .or_fail("Failed to revoke session")?;
        if session.current {
            return Err(AppError::rejected("cannot revoke the current session"))
                .or_fail("Failed to revoke session");
        }
        state.sessions.retain(|s| s.id != session_id);
        state.log(
            SecurityEventKind::SessionRevoked,
            format!("Signed out {}", session.device_name),
        );
        info!(session_id, "🧪 mock session revoked");
        Ok(Acknowledgement::ok(format!("session {} revoked", session_id)))
    }

    async fn get_privacy_settings(&self) -> Result<PrivacySettings> {
        self.latency.pause(300).await;
        Ok(self.state.lock().privacy.clone())
    }

    async fn update_privacy_settings(
        &self,
        update: PrivacySettingsUpdate,
    ) -> Result<PrivacySettings> {
        self.latency.pause(500).await;
        let mut state = self.state.lock();
        state.privacy.apply(update);
        state.log(SecurityEventKind::SettingsChanged, "Privacy settings updated");
        Ok(state.privacy.clone())
    }

    async fn get_security_events(&self, limit: u32) -> Result<Vec<SecurityEvent>> {
        self.latency.pause(400).await;
        // Events are appended in the order they occur.
        Ok(self
            .state
            .lock()
            .events
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn enable_two_factor(&self) -> Result<TwoFactorSetup> {
        self.latency.pause(800).await;
        let secret = Uuid::new_v4().simple().to_string().to_uppercase();
        let mut state = self.state.lock();
        state.settings.two_factor_enabled = true;
        state.log(SecurityEventKind::TwoFactorEnabled, "Two-factor authentication enabled");
        Ok(TwoFactorSetup {
            provisioning_uri: format!(
                "otpauth://totp/AyuSetu:dev.user@sbx?secret={}&issuer=AyuSetu",
                &secret[..16]
            ),
            backup_codes: backup_codes(),
            enabled: true,
        })
    }

    async fn change_pin(&self, request: ChangePinRequest) -> Result<Acknowledgement> {
        self.latency.pause(600).await;
        if !is_valid_pin(&request.new_pin) {
            return Err(AppError::rejected(format!(
                "PIN must be {} to {} digits",
                MIN_PIN_LENGTH, MAX_PIN_LENGTH
            )))
            .or_fail("Failed to change PIN");
        }
        let mut state = self.state.lock();
        if state.pin != request.current_pin {
            state.log(SecurityEventKind::FailedLogin, "Incorrect current PIN");
            return Err(AppError::rejected("current PIN does not match"))
                .or_fail("Failed to change PIN");
        }
        state.pin = request.new_pin;
        state.log(SecurityEventKind::PinChanged, "App PIN changed");
        info!("🧪 mock PIN changed");
        Ok(Acknowledgement::ok("PIN changed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockSecurityService {
        MockSecurityService::new(MockLatency::disabled())
    }

    #[tokio::test]
    async fn current_session_cannot_be_revoked() {
        let svc = service();
        let err = svc.revoke_session(CURRENT_SESSION_ID).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to revoke session");
        assert!(matches!(err.root_cause(), AppError::Rejected { .. }));

        svc.revoke_session("sess-web-01").await.unwrap();
        let sessions = svc.get_active_sessions().await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().any(|s| s.current));
        assert!(svc.revoke_session("sess-web-01").await.is_err());
    }

    #[tokio::test]
    async fn pin_change_validates_length_and_current_pin() {
        let svc = service();
        for bad in ["123", "1234567", "12ab"] {
            assert!(svc
                .change_pin(ChangePinRequest::new(DEFAULT_MOCK_PIN, bad))
                .await
                .is_err());
        }
        assert!(svc.change_pin(ChangePinRequest::new("0000", "5678")).await.is_err());

        svc.change_pin(ChangePinRequest::new(DEFAULT_MOCK_PIN, "567890"))
            .await
            .unwrap();
        svc.change_pin(ChangePinRequest::new("567890", "4321")).await.unwrap();

        let latest = svc.get_security_events(1).await.unwrap();
        assert_eq!(latest[0].kind, SecurityEventKind::PinChanged);
    }

    #[tokio::test]
    async fn events_respect_limit_and_order() {
        let svc = service();
        let events = svc.get_security_events(3).await.unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.windows(2).all(|w| w[0].occurred_at >= w[1].occurred_at));
        assert!(svc.get_security_events(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn two_factor_enrollment_updates_settings() {
        let svc = service();
        let setup = svc.enable_two_factor().await.unwrap();
        assert!(setup.provisioning_uri.starts_with("otpauth://totp/"));
        assert_eq!(setup.backup_codes.len(), 8);
        assert!(setup.backup_codes.iter().all(|c| c.len() == 9));
        assert!(svc.get_security_settings().await.unwrap().two_factor_enabled);
    }

    #[tokio::test]
    async fn settings_updates_are_partial() {
        let svc = service();
        let settings = svc
            .update_security_settings(SecuritySettingsUpdate {
                biometric_enabled: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(settings.biometric_enabled);
        assert_eq!(settings.auto_lock_minutes, 5);

        let privacy = svc
            .update_privacy_settings(PrivacySettingsUpdate {
                profile_visibility: Some(ProfileVisibility::Private),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(privacy.profile_visibility, ProfileVisibility::Private);
        assert!(privacy.hide_sensitive_records);
    }
}
