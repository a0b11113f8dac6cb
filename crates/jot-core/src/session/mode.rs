//! Multi-turn conversation modes.

use serde::{Deserialize, Serialize};

use crate::note::Note;

/// One exchange inside an AI conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiTurn {
    pub user: String,
    pub ai: String,
}

/// A slash command that was issued without its argument and is waiting for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingCommand {
    CreateNote,
    FindNote,
    FindById,
}

/// The mutually exclusive multi-turn state of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Mode {
    /// Regular command handling.
    #[default]
    Idle,
    /// Every line is a question about `note`, answered asynchronously.
    AiConversation {
        note: Note,
        history: Vec<AiTurn>,
        /// Session generation at the time the conversation started.
        generation: u64,
    },
    /// Every line is a description fragment for the note.
    StoryEditing {
        note_id: String,
        note_title: String,
        fragments: Vec<String>,
    },
    /// The next line is the title of a new child of `parent_note_id`.
    AwaitingSubNoteName { parent_note_id: String },
    /// The next line is the argument of `command`.
    AwaitingCommandArg { command: PendingCommand },
}

impl Mode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    pub fn is_ai_conversation(&self) -> bool {
        matches!(self, Mode::AiConversation { .. })
    }

    pub fn is_story_editing(&self) -> bool {
        matches!(self, Mode::StoryEditing { .. })
    }

    pub fn is_awaiting_sub_note_name(&self) -> bool {
        matches!(self, Mode::AwaitingSubNoteName { .. })
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::AiConversation { .. } => "ai_conversation",
            Mode::StoryEditing { .. } => "story_editing",
            Mode::AwaitingSubNoteName { .. } => "awaiting_sub_note_name",
            Mode::AwaitingCommandArg { .. } => "awaiting_command_arg",
        }
    }
}
