//! Reply language selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The two languages the assistant understands and answers in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    En,
    He,
}

impl Language {
    /// Parses a language code, falling back to English for anything unknown.
    pub fn from_code(code: &str) -> Self {
        code.trim().parse().unwrap_or_default()
    }

    /// Picks the string for this language.
    pub fn pick<'a>(self, en: &'a str, he: &'a str) -> &'a str {
        match self {
            Language::En => en,
            Language::He => he,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("he"), Language::He);
        assert_eq!(Language::from_code("EN"), Language::En);
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::He.to_string(), "he");
    }

    #[test]
    fn test_language_serde() {
        let json = serde_json::to_string(&Language::He).unwrap();
        assert_eq!(json, "\"he\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }
}
