//! Action tags produced by intent classification.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Every action the dialogue engine can react to.
///
/// The string form (`slash_create_note`, `find_sub_delete`, ...) is what
/// appears in logs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionTag {
    SlashCreateNote,
    SlashFindNote,
    SlashFindById,
    SlashShowParents,
    SlashHelp,
    SlashEditdescription,
    SlashMarkdone,
    SlashDelete,
    SlashCreatesub,
    SlashTalkai,
    SlashSelectsubnote,
    SlashStopediting,
    SlashSavelastmessage,
    SlashBack,
    SlashCancel,
    FindSubCreate,
    FindSubEditDescription,
    FindSubDelete,
    FindSubMarkDone,
    FindSubTalkAi,
    FindSubSelect,
    NoteSelection,
    StoryContent,
    StopEditingDescription,
    SubNoteName,
    AiConversation,
    CancelAiConversation,
    CancelAction,
    GeminiQuestion,
    UnknownSlashCommand,
    Unknown,
}

impl ActionTag {
    /// True for the `slash_*` actions.
    pub fn is_slash(self) -> bool {
        self.as_ref().starts_with("slash_")
    }

    /// True for the `find_sub_*` actions.
    pub fn is_find_sub(self) -> bool {
        self.as_ref().starts_with("find_sub_")
    }

    /// The tag without its `find_sub_` prefix, e.g. `mark_done`.
    pub fn sub_action(self) -> Option<&'static str> {
        let tag: &'static str = self.into();
        tag.strip_prefix("find_sub_")
    }
}

/// How sure the classifier is. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    None,
    Low,
    High,
    Certain,
}

impl Confidence {
    pub fn value(self) -> f32 {
        match self {
            Confidence::None => 0.0,
            Confidence::Low => 0.5,
            Confidence::High => 0.8,
            Confidence::Certain => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tag_strings() {
        assert_eq!(ActionTag::SlashCreateNote.to_string(), "slash_create_note");
        assert_eq!(ActionTag::SlashEditdescription.as_ref(), "slash_editdescription");
        assert_eq!(ActionTag::FindSubTalkAi.as_ref(), "find_sub_talk_ai");
        assert_eq!(
            ActionTag::from_str("unknown_slash_command").unwrap(),
            ActionTag::UnknownSlashCommand
        );
    }

    #[test]
    fn test_tag_families() {
        for tag in ActionTag::iter() {
            assert!(!(tag.is_slash() && tag.is_find_sub()));
        }
        assert_eq!(ActionTag::FindSubMarkDone.sub_action(), Some("mark_done"));
        assert_eq!(ActionTag::SlashDelete.sub_action(), None);
        assert!(ActionTag::SlashBack.is_slash());
    }

    #[test]
    fn test_confidence_values() {
        assert_eq!(Confidence::Certain.value(), 1.0);
        assert_eq!(Confidence::Low.value(), 0.5);
    }
}
