//! Accessibility and localization

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveAccessibilityService;
pub use mock::MockAccessibilityService;
pub use models::*;

use async_trait::async_trait;
use shared::Result;

#[async_trait]
pub trait AccessibilityApi: Send + Sync {
    async fn get_languages(&self) -> Result<Vec<Language>>;

    async fn get_settings(&self) -> Result<AccessibilitySettings>;

    async fn update_settings(&self, update: AccessibilitySettingsUpdate) -> Result<AccessibilitySettings>;

    async fn get_translations(&self, language: &str) -> Result<TranslationBundle>;

    async fn get_voice_commands(&self, language: &str) -> Result<Vec<VoiceCommand>>;
}
