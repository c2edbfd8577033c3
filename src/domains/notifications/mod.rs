//! In-app notifications, delivery preferences and push device registration

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveNotificationService;
pub use mock::MockNotificationService;
pub use models::*;

use async_trait::async_trait;
use shared::{Acknowledgement, Result};

#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Newest first.
    async fn get_notifications(&self, query: NotificationQuery) -> Result<Vec<Notification>>;

    async fn get_unread_count(&self) -> Result<UnreadCount>;

    async fn mark_as_read(&self, notification_id: &str) -> Result<Notification>;

    async fn mark_all_as_read(&self) -> Result<MarkAllReadResult>;

    async fn delete_notification(&self, notification_id: &str) -> Result<Acknowledgement>;

    async fn get_preferences(&self) -> Result<NotificationPreferences>;

    async fn update_preferences(
        &self,
        update: NotificationPreferencesUpdate,
    ) -> Result<NotificationPreferences>;

    async fn register_device(&self, device: DeviceRegistration) -> Result<RegisteredDevice>;
}
