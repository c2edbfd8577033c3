use super::models::*;
use super::AccessibilityApi;
use async_trait::async_trait;
use shared::{OperationContext, Result, ServiceClient};

pub struct LiveAccessibilityService {
    client: ServiceClient,
}

impl LiveAccessibilityService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccessibilityApi for LiveAccessibilityService {
    async fn get_languages(&self) -> Result<Vec<Language>> {
        self.client
            .get("/accessibility/languages")
            .await
            .or_fail("Failed to fetch languages")
    }

    async fn get_settings(&self) -> Result<AccessibilitySettings> {
        self.client
            .get("/accessibility/settings")
            .await
            .or_fail("Failed to fetch accessibility settings")
    }

    async fn update_settings(&self, update: AccessibilitySettingsUpdate) -> Result<AccessibilitySettings> {
        self.client
            .put("/accessibility/settings", &update)
            .await
            .or_fail("Failed to update accessibility settings")
    }

    async fn get_translations(&self, language: &str) -> Result<TranslationBundle> {
        let endpoint = ServiceClient::endpoint(&["accessibility", "translations", language])
            .or_fail("Failed to fetch translations")?;
        self.client
            .get(&endpoint)
            .await
            .or_fail("Failed to fetch translations")
    }

    async fn get_voice_commands(&self, language: &str) -> Result<Vec<VoiceCommand>> {
        self.client
            .get_query("/accessibility/voice-commands", &LanguageQuery { language })
            .await
            .or_fail("Failed to fetch voice commands")
    }
}
