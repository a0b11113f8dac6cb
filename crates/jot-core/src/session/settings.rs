use serde::{Deserialize, Serialize};

use super::language::Language;

/// User-adjustable conversation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub language: Language,
    /// When set, any reply to a pending confirmation counts as "yes".
    #[serde(default)]
    pub auto_confirm: bool,
}

impl Settings {
    pub fn new(language: Language, auto_confirm: bool) -> Self {
        Self {
            language,
            auto_confirm,
        }
    }
}
