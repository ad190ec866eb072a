//! Assistant and editor settings

use serde::{Deserialize, Serialize};

/// Application settings
///
/// `persist_api_key` controls whether the API key survives a restart: when
/// false, the key is blanked before every save and after every load, so it
/// only ever lives in memory for the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// API key for the assistant endpoint
    pub api_key: String,
    /// Model identifier sent with every request
    pub model: String,
    /// System prompt framing the assistant's role
    pub system_prompt: String,
    /// Optional prompt steering the assistant's output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_process_prompt: Option<String>,
    /// Optional example template included in requests as reference material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_template: Option<String>,
    /// Whether the API key is written to disk
    #[serde(default)]
    pub persist_api_key: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: "You are a helpful assistant that modifies email templates based on user instructions."
                .to_string(),
            thought_process_prompt: Some(
                "Please think step-by-step and provide the updated template sections as a JSON object wrapped in ```json``` markers."
                    .to_string(),
            ),
            example_template: None,
            persist_api_key: false,
        }
    }
}

impl Settings {
    /// Copy of these settings with the API key blanked unless persistence is
    /// enabled. Applied before every save and after every load.
    pub fn sanitized(&self) -> Self {
        let mut settings = self.clone();
        if !settings.persist_api_key {
            settings.api_key.clear();
        }
        settings
    }

    /// Thought-process prompt, ignoring empty strings left by the editor
    pub fn thought_process(&self) -> Option<&str> {
        self.thought_process_prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Example template, ignoring empty strings left by the editor
    pub fn example(&self) -> Option<&str> {
        self.example_template
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_blanks_key_by_default() {
        let mut settings = Settings::default();
        settings.api_key = "sk-secret".to_string();
        assert_eq!(settings.sanitized().api_key, "");
    }

    #[test]
    fn test_sanitized_keeps_key_when_persisting() {
        let mut settings = Settings::default();
        settings.api_key = "sk-secret".to_string();
        settings.persist_api_key = true;
        assert_eq!(settings.sanitized().api_key, "sk-secret");
    }

    #[test]
    fn test_empty_optional_prompts_filtered() {
        let mut settings = Settings::default();
        settings.thought_process_prompt = Some("  ".to_string());
        settings.example_template = Some(String::new());
        assert!(settings.thought_process().is_none());
        assert!(settings.example().is_none());
    }
}
