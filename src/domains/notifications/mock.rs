use super::models::*;
use super::NotificationApi;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use shared::utils::{generate_mock_id, mask_identifier};
use shared::{Acknowledgement, AppError, MockLatency, OperationContext, Result};
use tracing::info;

pub struct MockNotificationService {
    latency: MockLatency,
    notifications: Mutex<Vec<Notification>>,
    preferences: Mutex<NotificationPreferences>,
}

fn seed(now: DateTime<Utc>) -> Vec<Notification> {
    let entry = |id: &str,
                 category: NotificationCategory,
                 priority: NotificationPriority,
                 title: &str,
                 body: &str,
                 read: bool,
                 hours_ago: i64,
                 action_url: Option<&str>| Notification {
        id: id.to_string(),
        category,
        priority,
        title: title.to_string(),
        body: body.to_string(),
        read,
        created_at: now - Duration::hours(hours_ago),
        action_url: action_url.map(str::to_string),
    };

    vec![
        entry(
            "notif-001",
            NotificationCategory::Consent,
            NotificationPriority::High,
            "New consent request",
            "Apollo Hospitals requests access to your prescriptions.",
            false,
            1,
            Some("/compliance/consents/consent-001"),
        ),
        entry(
            "notif-002",
            NotificationCategory::Appointment,
            NotificationPriority::Normal,
            "Appointment tomorrow",
            "Teleconsultation with Dr. Priya Sharma at 10:30.",
            false,
            5,
            Some("/appointments"),
        ),
        entry(
            "notif-003",
            NotificationCategory::Medication,
            NotificationPriority::Normal,
            "Medication reminder",
            "Time to take Metformin 500 mg.",
            false,
            9,
            None,
        ),
        entry(
            "notif-004",
            NotificationCategory::Record,
            NotificationPriority::Low,
            "Lab report available",
            "Your CBC report from City Diagnostics has been linked.",
            true,
            30,
            Some("/records"),
        ),
        entry(
            "notif-005",
            NotificationCategory::Insurance,
            NotificationPriority::Normal,
            "Claim settled",
            "Claim CLM-2024-000187 was settled for ₹61,500.",
            true,
            72,
            None,
        ),
        entry(
            "notif-006",
            NotificationCategory::System,
            NotificationPriority::Low,
            "Welcome to AyuSetu",
            "Your ABHA address is ready to use.",
            true,
            240,
            None,
        ),
    ]
}

impl MockNotificationService {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            latency,
            notifications: Mutex::new(seed(Utc::now())),
            preferences: Mutex::new(NotificationPreferences::default()),
        }
    }
}

#[async_trait]
impl NotificationApi for MockNotificationService {
    async fn get_notifications(&self, query: NotificationQuery) -> Result<Vec<Notification>> {
        self.latency.pause(400).await;
        let mut matches: Vec<Notification> = self
            .notifications
            .lock()
            .iter()
            .filter(|n| query.matches(n))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(query.page().apply(&matches))
    }

    async fn get_unread_count(&self) -> Result<UnreadCount> {
        self.latency.pause(200).await;
        let count = self.notifications.lock().iter().filter(|n| !n.read).count();
        Ok(UnreadCount {
            count: count as u32,
        })
    }

    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification> {
        self.latency.pause(300).await;
        let mut notifications = self.notifications.lock();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| AppError::not_found(format!("notification {}", notification_id)))
            .or_fail("Failed to mark notification as read")?;
        notification.read = true;
        Ok(notification.clone())
    }

    async fn mark_all_as_read(&self) -> Result<MarkAllReadResult> {
        self.latency.pause(400).await;
        let mut updated = 0;
        for notification in self.notifications.lock().iter_mut().filter(|n| !n.read) {
            notification.read = true;
            updated += 1;
        }
        info!(updated, "🧪 mock notifications marked read");
        Ok(MarkAllReadResult { updated })
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<Acknowledgement> {
        self.latency.pause(300).await;
        let mut notifications = self.notifications.lock();
        let before = notifications.len();
        notifications.retain(|n| n.id != notification_id);
        if notifications.len() == before {
            return Err(AppError::not_found(format!("notification {}", notification_id)))
                .or_fail("Failed to delete notification");
        }
        Ok(Acknowledgement::ok("notification deleted"))
    }

    async fn get_preferences(&self) -> Result<NotificationPreferences> {
        self.latency.pause(300).await;
        Ok(self.preferences.lock().clone())
    }

    async fn update_preferences(
        &self,
        update: NotificationPreferencesUpdate,
    ) -> Result<NotificationPreferences> {
        self.latency.pause(500).await;
        if let Some(quiet) = &update.quiet_hours {
            if quiet.start == quiet.end {
                return Err(AppError::rejected("quiet hours must not be empty"))
                    .or_fail("Failed to update notification preferences");
            }
        }
        let mut preferences = self.preferences.lock();
        preferences.apply(update);
        Ok(preferences.clone())
    }

    async fn register_device(&self, device: DeviceRegistration) -> Result<RegisteredDevice> {
        self.latency.pause(500).await;
        if device.device_token.trim().is_empty() {
            return Err(AppError::rejected("device token is required"))
                .or_fail("Failed to register device");
        }
        let registered = RegisteredDevice {
            device_id: generate_mock_id("dev"),
            platform: device.platform,
            registered_at: Utc::now(),
        };
        info!(
            device_id = %registered.device_id,
            token = %mask_identifier(&device.device_token),
            "🧪 mock device registered"
        );
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn service() -> MockNotificationService {
        MockNotificationService::new(MockLatency::disabled())
    }

    #[tokio::test]
    async fn notifications_are_newest_first_and_filterable() {
        let svc = service();
        let all = svc.get_notifications(NotificationQuery::default()).await.unwrap();
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let unread = svc.get_notifications(NotificationQuery::unread()).await.unwrap();
        assert!(unread.iter().all(|n| !n.read));
        assert_eq!(unread.len() as u32, svc.get_unread_count().await.unwrap().count);
    }

    #[tokio::test]
    async fn marking_read_updates_unread_count() {
        let svc = service();
        let before = svc.get_unread_count().await.unwrap().count;
        let marked = svc.mark_as_read("notif-001").await.unwrap();
        assert!(marked.read);
        assert_eq!(svc.get_unread_count().await.unwrap().count, before - 1);

        let result = svc.mark_all_as_read().await.unwrap();
        assert_eq!(result.updated, before - 1);
        assert_eq!(svc.get_unread_count().await.unwrap().count, 0);
        assert_eq!(svc.mark_all_as_read().await.unwrap().updated, 0);
    }

    #[tokio::test]
    async fn delete_unknown_notification_fails() {
        let svc = service();
        svc.delete_notification("notif-006").await.unwrap();
        let err = svc.delete_notification("notif-006").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete notification");
        assert!(svc.mark_as_read("notif-006").await.is_err());
    }

    #[tokio::test]
    async fn preference_update_is_partial() {
        let svc = service();
        let updated = svc
            .update_preferences(NotificationPreferencesUpdate {
                email_enabled: Some(true),
                quiet_hours: Some(QuietHours {
                    start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                    end: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                }),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(updated.email_enabled);
        assert!(updated.push_enabled);
        assert_eq!(svc.get_preferences().await.unwrap(), updated);
    }

    #[tokio::test]
    async fn device_registration_requires_token() {
        let svc = service();
        let device = svc
            .register_device(DeviceRegistration {
                device_token: "fcm-token-abcdef123456".to_string(),
                platform: DevicePlatform::Android,
                app_version: Some("1.4.0".to_string()),
            })
            .await
            .unwrap();
        assert!(device.device_id.starts_with("dev-"));

        assert!(svc
            .register_device(DeviceRegistration {
                device_token: "  ".to_string(),
                platform: DevicePlatform::Ios,
                app_version: None,
            })
            .await
            .is_err());
    }
}
