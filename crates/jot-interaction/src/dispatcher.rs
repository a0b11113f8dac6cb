//! Two-phase dispatch of a classified intent.
//!
//! Phase one applies pre-effects (entering modes, recording operations
//! that need a yes/no). Then the raw text is offered to the confirmation
//! protocol, which may answer on its own. Otherwise the formatter produces
//! the reply.

use std::sync::Arc;

use jot_core::intent::{ActionTag, Intent};
use jot_core::note::NoteRepository;
use jot_core::session::{Mode, PendingConfirmation, SessionState};
use tracing::{debug, error};

use crate::confirmation::ConfirmationProtocol;
use crate::formatter::{Outcome, OutcomeFormatter};
use crate::patterns::{BuiltinPatterns, PatternProvider};

pub struct Dispatcher {
    notes: Arc<dyn NoteRepository>,
    confirmation: ConfirmationProtocol,
    formatter: OutcomeFormatter,
}

impl Dispatcher {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self::with_patterns(notes, Arc::new(BuiltinPatterns))
    }

    pub fn with_patterns(notes: Arc<dyn NoteRepository>, patterns: Arc<dyn PatternProvider>) -> Self {
        Self {
            notes,
            confirmation: ConfirmationProtocol::new(patterns),
            formatter: OutcomeFormatter,
        }
    }

    pub async fn dispatch(&self, intent: &Intent, raw: &str, state: &mut SessionState) -> Outcome {
        self.apply_pre_effects(intent, state).await;

        if !matches!(
            intent.action,
            ActionTag::SubNoteName | ActionTag::AiConversation
        ) {
            if let Some(reply) = self
                .confirmation
                .try_confirm(raw, state, self.notes.as_ref())
                .await
            {
                return Outcome::reply(reply);
            }
        }

        self.formatter
            .format(intent, state, self.notes.as_ref())
            .await
    }

    /// State changes that must exist before any reply is chosen. All of
    /// them act on the focus note and do nothing without one.
    async fn apply_pre_effects(&self, intent: &Intent, state: &mut SessionState) {
        match intent.action {
            ActionTag::SlashCreateNote => {
                if let Some(title) = intent.params.argument() {
                    state.set_pending(PendingConfirmation::NoteCreate {
                        title: title.to_string(),
                        parent_id: None,
                    });
                }
                return;
            }
            ActionTag::SlashCreatesub
            | ActionTag::FindSubCreate
            | ActionTag::SlashEditdescription
            | ActionTag::FindSubEditDescription
            | ActionTag::SlashTalkai
            | ActionTag::FindSubTalkAi
            | ActionTag::SlashDelete
            | ActionTag::FindSubDelete
            | ActionTag::SlashMarkdone
            | ActionTag::FindSubMarkDone => {}
            _ => return,
        }

        let Some(focus) = state.focus_note().cloned() else {
            return;
        };
        debug!(
            "[Dispatcher] Pre-effect for {} on note {}",
            intent.action, focus.id
        );

        match intent.action {
            ActionTag::SlashCreatesub | ActionTag::FindSubCreate => {
                state.set_mode(Mode::AwaitingSubNoteName {
                    parent_note_id: focus.id,
                });
            }
            ActionTag::SlashEditdescription | ActionTag::FindSubEditDescription => {
                state.set_mode(Mode::StoryEditing {
                    note_id: focus.id,
                    note_title: focus.title,
                    fragments: Vec::new(),
                });
            }
            ActionTag::SlashTalkai | ActionTag::FindSubTalkAi => {
                state.enter_ai_conversation(focus);
            }
            ActionTag::SlashDelete | ActionTag::FindSubDelete => {
                state.set_pending(PendingConfirmation::Deletion { note_id: focus.id });
            }
            ActionTag::SlashMarkdone | ActionTag::FindSubMarkDone => {
                match self.notes.find_children(&focus.id).await {
                    Ok(children) if children.iter().all(|child| child.done) => {
                        state.set_pending(PendingConfirmation::MarkDone { note_id: focus.id });
                    }
                    Ok(_) => debug!(
                        "[Dispatcher] Note {} has open sub-notes, not asking to mark done",
                        focus.id
                    ),
                    Err(e) => error!("[Dispatcher] Failed to load sub-notes of {}: {}", focus.id, e),
                }
            }
            _ => {}
        }
    }
}
