use super::models::*;
use super::AccessibilityApi;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{AppError, MockLatency, OperationContext, Result};
use std::collections::BTreeMap;
use tracing::info;

const LANGUAGES: &[(&str, &str, &str, bool, bool)] = &[
    ("en-IN", "English", "English", false, true),
    ("hi-IN", "Hindi", "हिन्दी", false, true),
    ("bn-IN", "Bengali", "বাংলা", false, true),
    ("ta-IN", "Tamil", "தமிழ்", false, true),
    ("te-IN", "Telugu", "తెలుగు", false, false),
    ("mr-IN", "Marathi", "मराठी", false, false),
    ("gu-IN", "Gujarati", "ગુજરાતી", false, false),
    ("kn-IN", "Kannada", "ಕನ್ನಡ", false, false),
    ("ml-IN", "Malayalam", "മലയാളം", false, false),
    ("ur-IN", "Urdu", "اردو", true, false),
];

pub struct MockAccessibilityService {
    latency: MockLatency,
    settings: Mutex<AccessibilitySettings>,
}

impl MockAccessibilityService {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            latency,
            settings: Mutex::new(AccessibilitySettings::default()),
        }
    }
}

fn languages() -> Vec<Language> {
    LANGUAGES
        .iter()
        .map(|(code, name, native, rtl, voice)| Language {
            code: code.to_string(),
            name: name.to_string(),
            native_name: native.to_string(),
            is_rtl: *rtl,
            voice_supported: *voice,
        })
        .collect()
}

fn strings_for(language: &str) -> Option<Vec<(&'static str, &'static str)>> {
    match language {
        "en-IN" => Some(vec![
            ("home.title", "My Health"),
            ("records.title", "Health Records"),
            ("appointments.book", "Book Appointment"),
            ("emergency.sos", "Emergency SOS"),
            ("consent.pending", "Pending consent requests"),
        ]),
        "hi-IN" => Some(vec![
            ("home.title", "मेरा स्वास्थ्य"),
            ("records.title", "स्वास्थ्य रिकॉर्ड"),
            ("appointments.book", "अपॉइंटमेंट बुक करें"),
            ("emergency.sos", "आपातकालीन एसओएस"),
            ("consent.pending", "लंबित सहमति अनुरोध"),
        ]),
        _ => None,
    }
}

#[async_trait]
impl AccessibilityApi for MockAccessibilityService {
    async fn get_languages(&self) -> Result<Vec<Language>> {
        self.latency.pause(300).await;
        Ok(languages())
    }

    async fn get_settings(&self) -> Result<AccessibilitySettings> {
        self.latency.pause(200).await;
        Ok(self.settings.lock().clone())
    }

    async fn update_settings(&self, update: AccessibilitySettingsUpdate) -> Result<AccessibilitySettings> {
        self.latency.pause(400).await;
        let mut settings = self.settings.lock();
        settings.apply(update);
        info!(language = %settings.language, "🧪 mock accessibility settings updated");
        Ok(settings.clone())
    }

    async fn get_translations(&self, language: &str) -> Result<TranslationBundle> {
        self.latency.pause(300).await;
        let strings = strings_for(language)
            .ok_or_else(|| AppError::not_found(format!("translations for {}", language)))
            .or_fail("Failed to fetch translations")?;

        Ok(TranslationBundle {
            language: language.to_string(),
            version: "2024.1".to_string(),
            strings: strings
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        })
    }

    async fn get_voice_commands(&self, language: &str) -> Result<Vec<VoiceCommand>> {
        self.latency.pause(300).await;
        let commands: &[(&str, &str)] = match language {
            "hi-IN" => &[
                ("मेरे रिकॉर्ड खोलो", "open_records"),
                ("डॉक्टर से मिलना है", "book_appointment"),
                ("मदद चाहिए", "trigger_sos"),
            ],
            _ => &[
                ("open my records", "open_records"),
                ("book an appointment", "book_appointment"),
                ("call for help", "trigger_sos"),
                ("read my notifications", "open_notifications"),
            ],
        };
        Ok(commands
            .iter()
            .map(|(phrase, action)| VoiceCommand {
                phrase: phrase.to_string(),
                action: action.to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockAccessibilityService {
        MockAccessibilityService::new(MockLatency::disabled())
    }

    #[tokio::test]
    async fn languages_include_rtl_urdu() {
        let languages = service().get_languages().await.unwrap();
        assert_eq!(languages.len(), 10);
        let urdu = languages.iter().find(|l| l.code == "ur-IN").unwrap();
        assert!(urdu.is_rtl);
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let svc = service();
        assert_eq!(svc.get_languages().await.unwrap(), svc.get_languages().await.unwrap());
        assert_eq!(svc.get_settings().await.unwrap(), svc.get_settings().await.unwrap());
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let svc = service();
        let updated = svc
            .update_settings(AccessibilitySettingsUpdate {
                language: Some("hi-IN".to_string()),
                high_contrast: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.language, "hi-IN");
        assert!(updated.high_contrast);
        assert_eq!(updated.font_scale, 1.0);
        assert_eq!(svc.get_settings().await.unwrap(), updated);
    }

    #[tokio::test]
    async fn unknown_translation_surfaces_generic_error() {
        let err = service().get_translations("xx-XX").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch translations");

        let hindi = service().get_translations("hi-IN").await.unwrap();
        assert_eq!(hindi.strings["home.title"], "मेरा स्वास्थ्य");
    }

    #[tokio::test]
    async fn voice_commands_fall_back_to_english() {
        let commands = service().get_voice_commands("ta-IN").await.unwrap();
        assert!(commands.iter().any(|c| c.action == "trigger_sos"));
    }
}
