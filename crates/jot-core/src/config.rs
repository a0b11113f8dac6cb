//! Root configuration (`config.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::session::{Language, Settings};

/// Environment variable consulted when `answer.api_key` is empty.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default Gemini model for AI conversations.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JotConfig {
    /// Initial reply language.
    pub language: Language,
    /// Initial auto-confirm setting.
    pub auto_confirm: bool,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub storage: StorageConfig,
    pub answer: AnswerConfig,
}

impl Default for JotConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            auto_confirm: false,
            log_level: "warn".to_string(),
            storage: StorageConfig::default(),
            answer: AnswerConfig::default(),
        }
    }
}

impl JotConfig {
    /// Session settings seeded from this configuration.
    pub fn settings(&self) -> Settings {
        Settings::new(self.language, self.auto_confirm)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Notes file; the platform data directory is used when unset.
    pub notes_file: Option<PathBuf>,
}

/// Which backend answers questions inside an AI conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerProvider {
    #[default]
    Gemini,
    /// AI conversations report that no assistant is configured.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    pub provider: AnswerProvider,
    pub model: String,
    pub api_key: String,
    /// Alternative endpoint, e.g. a proxy in front of the Gemini API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sent as the system instruction with every question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            provider: AnswerProvider::Gemini,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: String::new(),
            base_url: None,
            system_instruction: None,
        }
    }
}

impl AnswerConfig {
    /// The configured API key, falling back to `GEMINI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.trim().to_string());
        }
        std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: JotConfig = toml::from_str(
            r#"
            language = "he"
            [answer]
            provider = "none"
            "#,
        )
        .unwrap();

        assert_eq!(config.language, Language::He);
        assert!(!config.auto_confirm);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.answer.provider, AnswerProvider::None);
        assert_eq!(config.answer.model, DEFAULT_GEMINI_MODEL);
        assert!(config.storage.notes_file.is_none());
        assert!(config.answer.base_url.is_none());
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let answer = AnswerConfig {
            api_key: " secret ".into(),
            ..AnswerConfig::default()
        };
        assert_eq!(answer.resolve_api_key().as_deref(), Some("secret"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = JotConfig {
            auto_confirm: true,
            ..JotConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        let back: JotConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
