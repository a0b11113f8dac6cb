//! Operations waiting for a yes/no answer.

use serde::{Deserialize, Serialize};

/// A state-changing operation the user has been asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PendingConfirmation {
    NoteCreate {
        title: String,
        parent_id: Option<String>,
    },
    StoryUpdate {
        note_id: String,
        description: String,
    },
    Deletion {
        note_id: String,
    },
    MarkDone {
        note_id: String,
    },
}

/// Discriminant of [`PendingConfirmation`], used to order confirmation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingKind {
    NoteCreate,
    StoryUpdate,
    Deletion,
    MarkDone,
}

impl PendingConfirmation {
    pub fn kind(&self) -> PendingKind {
        match self {
            PendingConfirmation::NoteCreate { .. } => PendingKind::NoteCreate,
            PendingConfirmation::StoryUpdate { .. } => PendingKind::StoryUpdate,
            PendingConfirmation::Deletion { .. } => PendingKind::Deletion,
            PendingConfirmation::MarkDone { .. } => PendingKind::MarkDone,
        }
    }
}
