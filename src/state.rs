use crate::domains::abdm::{AbdmApi, LiveAbdmService, MockAbdmService};
use crate::domains::accessibility::{AccessibilityApi, LiveAccessibilityService, MockAccessibilityService};
use crate::domains::appointments::{AppointmentApi, LiveAppointmentService, MockAppointmentService};
use crate::domains::compliance::{ComplianceApi, LiveComplianceService, MockComplianceService};
use crate::domains::emergency::{EmergencyApi, LiveEmergencyService, MockEmergencyService};
use crate::domains::ingestion::{IngestionApi, LiveIngestionService, MockIngestionService};
use crate::domains::insurance::{InsuranceApi, LiveInsuranceService, MockInsuranceService};
use crate::domains::notifications::{LiveNotificationService, MockNotificationService, NotificationApi};
use crate::domains::security::{LiveSecurityService, MockSecurityService, SecurityApi};
use serde::Serialize;
use shared::{Config, MockLatency, Result, ServiceClient};
use std::fmt;
use std::sync::Arc;
use tracing::info;

pub const GATEWAY_SERVICE_NAME: &str = "abdm-gateway";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    Mock,
    Live,
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceMode::Mock => write!(f, "mock"),
            ServiceMode::Live => write!(f, "live"),
        }
    }
}

/// One implementation per domain, all in the same mode.
///
/// Cloning is cheap and clones share the underlying services, so mock state
/// and the live session token are seen by every holder.
#[derive(Clone)]
pub struct AppServices {
    pub mode: ServiceMode,
    pub abdm: Arc<dyn AbdmApi>,
    pub accessibility: Arc<dyn AccessibilityApi>,
    pub appointments: Arc<dyn AppointmentApi>,
    pub compliance: Arc<dyn ComplianceApi>,
    pub emergency: Arc<dyn EmergencyApi>,
    pub ingestion: Arc<dyn IngestionApi>,
    pub insurance: Arc<dyn InsuranceApi>,
    pub notifications: Arc<dyn NotificationApi>,
    pub security: Arc<dyn SecurityApi>,
}

impl AppServices {
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.developer_mode {
            Ok(Self::mock(config))
        } else {
            Self::live(config)
        }
    }

    pub fn mock(config: &Config) -> Self {
        let latency = MockLatency::from_flag(config.mock.simulate_latency);
        info!(simulate_latency = latency.is_enabled(), "🧪 Developer mode: using mock services");

        Self {
            mode: ServiceMode::Mock,
            abdm: Arc::new(MockAbdmService::new(latency, config.developer.clone())),
            accessibility: Arc::new(MockAccessibilityService::new(latency)),
            appointments: Arc::new(MockAppointmentService::new(latency)),
            compliance: Arc::new(MockComplianceService::new(latency)),
            emergency: Arc::new(MockEmergencyService::new(latency)),
            ingestion: Arc::new(MockIngestionService::new(latency)),
            insurance: Arc::new(MockInsuranceService::new(latency)),
            notifications: Arc::new(MockNotificationService::new(latency)),
            security: Arc::new(MockSecurityService::new(latency)),
        }
    }

    /// Live services share a single client, so the token obtained by
    /// `abdm.get_session_token` is attached to every domain's requests.
    pub fn live(config: &Config) -> Result<Self> {
        let client = ServiceClient::new(
            config.base_url(),
            GATEWAY_SERVICE_NAME.to_string(),
            config.request_timeout_seconds,
        )?;
        info!(
            base_url = client.base_url(),
            environment = %config.environment,
            "🌐 Live mode: using ABDM gateway"
        );

        Ok(Self {
            mode: ServiceMode::Live,
            abdm: Arc::new(LiveAbdmService::new(client.clone(), config.credentials.clone())),
            accessibility: Arc::new(LiveAccessibilityService::new(client.clone())),
            appointments: Arc::new(LiveAppointmentService::new(client.clone())),
            compliance: Arc::new(LiveComplianceService::new(client.clone())),
            emergency: Arc::new(LiveEmergencyService::new(client.clone())),
            ingestion: Arc::new(LiveIngestionService::new(client.clone())),
            insurance: Arc::new(LiveInsuranceService::new(client.clone())),
            notifications: Arc::new(LiveNotificationService::new(client.clone())),
            security: Arc::new(LiveSecurityService::new(client)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn developer_mode_selects_mock_services() {
        let services = AppServices::from_config(&Config::developer()).unwrap();
        assert_eq!(services.mode, ServiceMode::Mock);
    }

    #[test]
    fn live_mode_selects_live_services() {
        let services = AppServices::from_config(&Config::live("http://127.0.0.1:9")).unwrap();
        assert_eq!(services.mode, ServiceMode::Live);
        assert_eq!(services.mode.to_string(), "live");
    }

    #[tokio::test]
    async fn clones_share_mock_state() {
        let services = AppServices::mock(&Config::developer().without_latency());
        let other = services.clone();
        services.notifications.mark_all_as_read().await.unwrap();
        assert_eq!(other.notifications.get_unread_count().await.unwrap().count, 0);
    }
}
