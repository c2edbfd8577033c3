use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// BCP-47 code, e.g. `hi-IN`.
    pub code: String,
    pub name: String,
    pub native_name: String,
    #[serde(default)]
    pub is_rtl: bool,
    #[serde(default)]
    pub voice_supported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    pub language: String,
    pub font_scale: f32,
    pub high_contrast: bool,
    pub screen_reader: bool,
    pub voice_navigation: bool,
    pub reduce_motion: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            language: "en-IN".to_string(),
            font_scale: 1.0,
            high_contrast: false,
            screen_reader: false,
            voice_navigation: false,
            reduce_motion: false,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_contrast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_reader: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_navigation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_motion: Option<bool>,
}

impl AccessibilitySettings {
    pub fn apply(&mut self, update: AccessibilitySettingsUpdate) {
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(scale) = update.font_scale {
            self.font_scale = scale;
        }
        if let Some(v) = update.high_contrast {
            self.high_contrast = v;
        }
        if let Some(v) = update.screen_reader {
            self.screen_reader = v;
        }
        if let Some(v) = update.voice_navigation {
            self.voice_navigation = v;
        }
        if let Some(v) = update.reduce_motion {
            self.reduce_motion = v;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBundle {
    pub language: String,
    pub version: String,
    pub strings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommand {
    pub phrase: String,
    /// Screen or action the phrase triggers, e.g. `open_records`.
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LanguageQuery<'a> {
    pub language: &'a str,
}
