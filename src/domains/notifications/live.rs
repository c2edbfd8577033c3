use super::models::*;
use super::NotificationApi;
use async_trait::async_trait;
use serde_json::json;
use shared::{Acknowledgement, OperationContext, Result, ServiceClient};

pub struct LiveNotificationService {
    client: ServiceClient,
}

impl LiveNotificationService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationApi for LiveNotificationService {
    async fn get_notifications(&self, query: NotificationQuery) -> Result<Vec<Notification>> {
        self.client
            .get_query("/notifications", &query)
            .await
            .or_fail("Failed to fetch notifications")
    }

    async fn get_unread_count(&self) -> Result<UnreadCount> {
        self.client
            .get("/notifications/unread-count")
            .await
            .or_fail("Failed to fetch unread count")
    }

    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification> {
        let endpoint = ServiceClient::endpoint(&["notifications", notification_id, "read"])
            .or_fail("Failed to mark notification as read")?;
        self.client
            .patch(&endpoint, &json!({}))
            .await
            .or_fail("Failed to mark notification as read")
    }

    async fn mark_all_as_read(&self) -> Result<MarkAllReadResult> {
        self.client
            .patch("/notifications/read-all", &json!({}))
            .await
            .or_fail("Failed to mark notifications as read")
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<Acknowledgement> {
        let endpoint = ServiceClient::endpoint(&["notifications", notification_id])
            .or_fail("Failed to delete notification")?;
        self.client
            .delete(&endpoint)
            .await
            .or_fail("Failed to delete notification")
    }

    async fn get_preferences(&self) -> Result<NotificationPreferences> {
        self.client
            .get("/notifications/preferences")
            .await
            .or_fail("Failed to fetch notification preferences")
    }

    async fn update_preferences(
        &self,
        update: NotificationPreferencesUpdate,
    ) -> Result<NotificationPreferences> {
        self.client
            .put("/notifications/preferences", &update)
            .await
            .or_fail("Failed to update notification preferences")
    }

    async fn register_device(&self, device: DeviceRegistration) -> Result<RegisteredDevice> {
        self.client
            .post("/notifications/devices", &device)
            .await
            .or_fail("Failed to register device")
    }
}
