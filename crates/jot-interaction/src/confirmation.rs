//! Yes/no handling for operations waiting on the user.
//!
//! A reply resolves at most one waiting operation. Which one is decided by
//! two fixed orderings over [`ConfirmationSlot`]: [`ACCEPT_ORDER`] for yes
//! and [`DECLINE_ORDER`] for no. Store mutations happen only here.

use std::sync::Arc;

use jot_core::note::{Note, NoteRepository};
use jot_core::session::{PendingConfirmation, PendingKind, SessionState};
use tracing::{debug, error, info, warn};

use crate::patterns::{BuiltinPatterns, PatternProvider};
use crate::texts::Texts;

/// Something that can be answered with yes or no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationSlot {
    /// The session's [`PendingConfirmation`] of this kind.
    Pending(PendingKind),
    /// A sub-note whose name is still being asked for.
    SubNoteCreation,
}

impl ConfirmationSlot {
    pub fn is_present(self, state: &SessionState) -> bool {
        match self {
            Self::Pending(kind) => state.pending().map(PendingConfirmation::kind) == Some(kind),
            Self::SubNoteCreation => state.mode().is_awaiting_sub_note_name(),
        }
    }
}

/// Slots a "yes" may resolve, highest priority first.
pub const ACCEPT_ORDER: [ConfirmationSlot; 4] = [
    ConfirmationSlot::Pending(PendingKind::NoteCreate),
    ConfirmationSlot::Pending(PendingKind::StoryUpdate),
    ConfirmationSlot::Pending(PendingKind::Deletion),
    ConfirmationSlot::Pending(PendingKind::MarkDone),
];

/// Slots a "no" may resolve, highest priority first.
pub const DECLINE_ORDER: [ConfirmationSlot; 5] = [
    ConfirmationSlot::Pending(PendingKind::NoteCreate),
    ConfirmationSlot::Pending(PendingKind::Deletion),
    ConfirmationSlot::Pending(PendingKind::MarkDone),
    ConfirmationSlot::SubNoteCreation,
    ConfirmationSlot::Pending(PendingKind::StoryUpdate),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
}

#[derive(Clone)]
pub struct ConfirmationProtocol {
    patterns: Arc<dyn PatternProvider>,
}

impl Default for ConfirmationProtocol {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinPatterns))
    }
}

impl ConfirmationProtocol {
    pub fn new(patterns: Arc<dyn PatternProvider>) -> Self {
        Self { patterns }
    }

    /// Resolves a waiting operation if `text` answers one.
    ///
    /// Returns `None` when the text is neither yes nor no, or when nothing
    /// is waiting for that answer.
    pub async fn try_confirm(
        &self,
        text: &str,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
    ) -> Option<String> {
        let answer = self.interpret(text, state)?;
        let texts = Texts::new(state.settings().language);

        match answer {
            Answer::Yes => {
                let slot = ACCEPT_ORDER.iter().find(|slot| slot.is_present(state))?;
                debug!("[Confirmation] Accepting {:?}", slot);
                let pending = state.pending().cloned()?;
                Some(Self::accept(pending, state, notes, &texts).await)
            }
            Answer::No => {
                let slot = *DECLINE_ORDER.iter().find(|slot| slot.is_present(state))?;
                debug!("[Confirmation] Declining {:?}", slot);
                Some(Self::decline(slot, state, &texts))
            }
        }
    }

    fn interpret(&self, text: &str, state: &SessionState) -> Option<Answer> {
        let waiting = DECLINE_ORDER.iter().any(|slot| slot.is_present(state));
        if state.settings().auto_confirm && waiting {
            return Some(Answer::Yes);
        }
        let table = self.patterns.table(state.settings().language);
        let text = text.trim();
        if table.yes.is_match(text) {
            Some(Answer::Yes)
        } else if table.no.is_match(text) {
            Some(Answer::No)
        } else {
            None
        }
    }

    async fn accept(
        pending: PendingConfirmation,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> String {
        match pending {
            PendingConfirmation::NoteCreate { title, parent_id } => {
                match notes.create(&title, "", parent_id.as_deref()).await {
                    Ok(note) => {
                        info!("[Confirmation] Created note {} '{}'", note.id, note.title);
                        state.clear_pending();
                        Self::after_create(note, parent_id.as_deref(), state, notes, texts).await
                    }
                    Err(e) => {
                        error!("[Confirmation] Failed to create note '{}': {}", title, e);
                        texts.apology()
                    }
                }
            }
            PendingConfirmation::StoryUpdate {
                note_id,
                description,
            } => match notes.update_description(&note_id, &description).await {
                Ok(Some(note)) => {
                    info!("[Confirmation] Updated description of note {}", note.id);
                    state.clear_pending();
                    texts.description_updated(&note.title)
                }
                Ok(None) => Self::vanished(&note_id, state, texts),
                Err(e) => {
                    error!("[Confirmation] Failed to update note {}: {}", note_id, e);
                    texts.apology()
                }
            },
            PendingConfirmation::Deletion { note_id } => match notes.delete(&note_id).await {
                Ok(Some(note)) => {
                    info!("[Confirmation] Deleted note {}", note.id);
                    state.clear_pending();
                    state.clear_find_context();
                    texts.note_deleted(&note.title)
                }
                Ok(None) => Self::vanished(&note_id, state, texts),
                Err(e) => {
                    error!("[Confirmation] Failed to delete note {}: {}", note_id, e);
                    texts.apology()
                }
            },
            PendingConfirmation::MarkDone { note_id } => match notes.mark_done(&note_id).await {
                Ok(Some(note)) => {
                    info!("[Confirmation] Marked note {} as done", note.id);
                    state.clear_pending();
                    state.clear_find_context();
                    texts.note_marked_done(&note.title)
                }
                Ok(None) => Self::vanished(&note_id, state, texts),
                Err(e) => {
                    error!("[Confirmation] Failed to mark note {} done: {}", note_id, e);
                    texts.apology()
                }
            },
        }
    }

    /// A sub-note returns the user to its parent; a top-level note ends the
    /// search context.
    async fn after_create(
        note: Note,
        parent_id: Option<&str>,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> String {
        if let Some(parent_id) = parent_id {
            match notes.find_by_id(parent_id).await {
                Ok(found) => {
                    if let Some(parent) = found.into_iter().next() {
                        let reply = texts.sub_note_created(&note, &parent);
                        state.focus_on(parent);
                        return reply;
                    }
                }
                Err(e) => error!("[Confirmation] Failed to reload parent {}: {}", parent_id, e),
            }
        }
        state.clear_find_context();
        texts.note_created(&note)
    }

    fn vanished(note_id: &str, state: &mut SessionState, texts: &Texts) -> String {
        warn!("[Confirmation] Note {} no longer exists", note_id);
        state.clear_pending();
        texts.note_missing()
    }

    fn decline(slot: ConfirmationSlot, state: &mut SessionState, texts: &Texts) -> String {
        match slot {
            ConfirmationSlot::SubNoteCreation => {
                state.reset_mode();
                state.clear_find_context();
                texts.sub_note_cancelled()
            }
            ConfirmationSlot::Pending(kind) => {
                state.clear_pending();
                match kind {
                    PendingKind::NoteCreate => texts.creation_cancelled(),
                    PendingKind::StoryUpdate => texts.update_cancelled(),
                    PendingKind::Deletion => texts.deletion_cancelled(),
                    PendingKind::MarkDone => texts.mark_done_cancelled(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_core::error::{JotError, Result};
    use jot_core::note::TitleMatch;
    use jot_core::session::{Mode, Settings};
    use jot_infrastructure::JsonNoteRepository;

    /// A store whose every call fails.
    struct BrokenNotes;

    #[async_trait::async_trait]
    impl NoteRepository for BrokenNotes {
        async fn create(&self, _: &str, _: &str, _: Option<&str>) -> Result<Note> {
            Err(JotError::data_access("disk full"))
        }
        async fn delete(&self, _: &str) -> Result<Option<Note>> {
            Err(JotError::data_access("disk full"))
        }
        async fn update_description(&self, _: &str, _: &str) -> Result<Option<Note>> {
            Err(JotError::data_access("disk full"))
        }
        async fn mark_done(&self, _: &str) -> Result<Option<Note>> {
            Err(JotError::data_access("disk full"))
        }
        async fn find_by_id(&self, _: &str) -> Result<Vec<Note>> {
            Err(JotError::data_access("disk full"))
        }
        async fn find_by_title(&self, _: &str) -> Result<Vec<TitleMatch>> {
            Err(JotError::data_access("disk full"))
        }
        async fn find_children(&self, _: &str) -> Result<Vec<Note>> {
            Err(JotError::data_access("disk full"))
        }
        async fn root_notes(&self) -> Result<Vec<Note>> {
            Err(JotError::data_access("disk full"))
        }
    }

    fn protocol() -> ConfirmationProtocol {
        ConfirmationProtocol::default()
    }

    #[test]
    fn test_rule_orders() {
        use ConfirmationSlot::*;
        assert_eq!(
            ACCEPT_ORDER,
            [
                Pending(PendingKind::NoteCreate),
                Pending(PendingKind::StoryUpdate),
                Pending(PendingKind::Deletion),
                Pending(PendingKind::MarkDone),
            ]
        );
        assert_eq!(DECLINE_ORDER[3], SubNoteCreation);
        assert_eq!(DECLINE_ORDER[4], Pending(PendingKind::StoryUpdate));
    }

    #[tokio::test]
    async fn test_no_with_nothing_pending_is_ignored() {
        let notes = JsonNoteRepository::in_memory();
        let mut state = SessionState::default();
        for text in ["no", "yes", "cancel", "stop"] {
            assert_eq!(protocol().try_confirm(text, &mut state, &notes).await, None);
        }
        assert_eq!(state, SessionState::default());
    }

    #[tokio::test]
    async fn test_no_cancels_pending_before_sub_note_mode() {
        let notes = JsonNoteRepository::in_memory();
        let mut state = SessionState::default();
        state.set_pending(PendingConfirmation::Deletion {
            note_id: "1".into(),
        });
        state.set_mode(Mode::AwaitingSubNoteName {
            parent_note_id: "1".into(),
        });

        let reply = protocol().try_confirm("no", &mut state, &notes).await;
        assert_eq!(reply.as_deref(), Some("Note deletion cancelled."));
        assert!(state.pending().is_none());
        assert!(state.mode().is_awaiting_sub_note_name());

        let reply = protocol().try_confirm("no", &mut state, &notes).await;
        assert_eq!(reply.as_deref(), Some("Sub-note creation cancelled."));
        assert!(state.mode().is_idle());
    }

    #[tokio::test]
    async fn test_yes_creates_note_and_clears_pending() {
        let notes = JsonNoteRepository::in_memory();
        let mut state = SessionState::default();
        state.set_pending(PendingConfirmation::NoteCreate {
            title: "groceries".into(),
            parent_id: None,
        });

        let reply = protocol().try_confirm("yes", &mut state, &notes).await;
        assert_eq!(
            reply.as_deref(),
            Some("Note created successfully! ID: 1, Title: 'groceries'")
        );
        assert!(state.pending().is_none());
        assert_eq!(notes.find_by_id("1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sub_note_creation_returns_to_parent() {
        let notes = JsonNoteRepository::in_memory();
        let parent = notes.create("trip", "", None).await.unwrap();
        let mut state = SessionState::default();
        state.set_pending(PendingConfirmation::NoteCreate {
            title: "tickets".into(),
            parent_id: Some(parent.id.clone()),
        });

        let reply = protocol()
            .try_confirm("sure", &mut state, &notes)
            .await
            .unwrap();
        assert!(reply.starts_with("Sub-note created successfully! ID: 2, Title: 'tickets'"));
        assert!(reply.contains("Returned to parent note 'trip' context."));
        assert_eq!(state.focus_note().map(|n| n.id.as_str()), Some("1"));
        assert_eq!(notes.find_children("1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_auto_confirm_accepts_anything() {
        let notes = JsonNoteRepository::in_memory();
        let note = notes.create("old", "", None).await.unwrap();
        let mut state = SessionState::new(Settings::new(Default::default(), true));
        state.set_find_context(vec![note.clone()]);
        state.set_pending(PendingConfirmation::Deletion { note_id: note.id });

        let reply = protocol().try_confirm("/delete", &mut state, &notes).await;
        assert_eq!(reply.as_deref(), Some("Note 'old' deleted successfully!"));
        assert!(state.find_context().is_none());
        assert!(notes.find_by_id("1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_auto_confirm_while_naming_sub_note_resolves_nothing() {
        let notes = JsonNoteRepository::in_memory();
        let mut state = SessionState::new(Settings::new(Default::default(), true));
        state.set_mode(Mode::AwaitingSubNoteName {
            parent_note_id: "1".into(),
        });

        assert_eq!(protocol().try_confirm("no", &mut state, &notes).await, None);
        assert!(state.mode().is_awaiting_sub_note_name());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_pending() {
        let mut state = SessionState::default();
        state.set_pending(PendingConfirmation::MarkDone {
            note_id: "4".into(),
        });

        let reply = protocol().try_confirm("yes", &mut state, &BrokenNotes).await;
        assert_eq!(
            reply.as_deref(),
            Some("Sorry, something went wrong. Please try again.")
        );
        assert!(state.pending().is_some());
    }

    #[tokio::test]
    async fn test_vanished_note_clears_pending() {
        let notes = JsonNoteRepository::in_memory();
        let mut state = SessionState::default();
        state.set_pending(PendingConfirmation::StoryUpdate {
            note_id: "99".into(),
            description: "text".into(),
        });

        let reply = protocol().try_confirm("yes", &mut state, &notes).await;
        assert_eq!(reply.as_deref(), Some("That note no longer exists."));
        assert!(state.pending().is_none());
    }
}
