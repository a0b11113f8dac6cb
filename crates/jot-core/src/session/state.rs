//! Per-conversation session state.

use serde::{Deserialize, Serialize};

use super::find_context::FindContext;
use super::mode::Mode;
use super::pending::PendingConfirmation;
use super::settings::Settings;
use crate::note::Note;

/// The most recent AI answer delivered in this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAnswer {
    pub note_id: String,
    pub note_title: String,
    pub text: String,
}

/// All state of one conversation.
///
/// The classifier and dispatcher receive it as `&mut SessionState`; nothing
/// here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    settings: Settings,
    find_context: Option<FindContext>,
    mode: Mode,
    pending: Option<PendingConfirmation>,
    generation: u64,
    last_answer: Option<LastAnswer>,
}

impl SessionState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // ============================================================================
    // Settings
    // ============================================================================

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    // ============================================================================
    // Find context
    // ============================================================================

    pub fn find_context(&self) -> Option<&FindContext> {
        self.find_context.as_ref()
    }

    /// The first note of the find context, if any.
    pub fn focus_note(&self) -> Option<&Note> {
        self.find_context.as_ref().map(FindContext::focus)
    }

    /// Replaces the find context. An empty list clears it.
    pub fn set_find_context(&mut self, notes: Vec<Note>) {
        self.find_context = FindContext::new(notes);
    }

    pub fn focus_on(&mut self, note: Note) {
        self.find_context = Some(FindContext::single(note));
    }

    pub fn clear_find_context(&mut self) {
        self.find_context = None;
    }

    // ============================================================================
    // Mode
    // ============================================================================

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_mut(&mut self) -> &mut Mode {
        &mut self.mode
    }

    /// Switches mode. Entering or leaving an AI conversation this way still
    /// advances the generation counter.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode.is_ai_conversation() || mode.is_ai_conversation() {
            self.generation += 1;
        }
        self.mode = mode;
    }

    /// Returns to `Mode::Idle`.
    pub fn reset_mode(&mut self) {
        self.set_mode(Mode::Idle);
    }

    /// Starts an AI conversation about `note` and returns its generation.
    pub fn enter_ai_conversation(&mut self, note: Note) -> u64 {
        self.generation += 1;
        self.mode = Mode::AiConversation {
            note,
            history: Vec::new(),
            generation: self.generation,
        };
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ============================================================================
    // Pending confirmation
    // ============================================================================

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub fn set_pending(&mut self, pending: PendingConfirmation) {
        self.pending = Some(pending);
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    // ============================================================================
    // Last AI answer
    // ============================================================================

    pub fn last_answer(&self) -> Option<&LastAnswer> {
        self.last_answer.as_ref()
    }

    pub fn set_last_answer(&mut self, answer: LastAnswer) {
        self.last_answer = Some(answer);
    }

    /// `/back`: drops pending work, mode and find context.
    pub fn reset_to_normal(&mut self) {
        self.clear_pending();
        self.reset_mode();
        self.clear_find_context();
    }

    /// Panics if the state breaks an invariant. Used by tests.
    pub fn assert_invariants(&self) {
        if let Some(ctx) = &self.find_context {
            assert!(!ctx.is_empty(), "find context must never be empty");
        }
        if let Mode::AiConversation { generation, .. } = &self.mode {
            assert_eq!(
                *generation, self.generation,
                "active AI conversation must carry the current generation"
            );
        }
    }
}
