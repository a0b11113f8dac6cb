//! Reply generation: the second phase of dispatch.
//!
//! The formatter decides the reply text for an intent and applies the
//! remaining session transitions. It only reads from the note store; every
//! store mutation goes through the confirmation protocol.

use jot_core::error::Result;
use jot_core::intent::{ActionTag, Intent, Params, SelectionType};
use jot_core::note::{render_tree, Note, NoteRepository};
use jot_core::session::{Mode, PendingCommand, PendingConfirmation, SessionState};
use tracing::{debug, error};

use crate::answer::AnswerRequest;
use crate::texts::{SearchFirst, Texts};

/// Maximum number of entries listed for an ambiguous search.
pub const MAX_LISTED_MATCHES: usize = 5;

/// The result of dispatching one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Reply shown to the user right away.
    pub reply: String,
    /// A question to answer asynchronously, for AI conversations.
    pub answer_request: Option<AnswerRequest>,
}

impl Outcome {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            answer_request: None,
        }
    }
}

/// Focus-note actions reachable both as `find_sub_*` and as a slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusAction {
    CreateSub,
    EditDescription { slash: bool },
    Delete,
    MarkDone,
    TalkAi { slash: bool },
    SelectSub,
}

impl FocusAction {
    fn of(action: ActionTag) -> Option<Self> {
        Some(match action {
            ActionTag::SlashCreatesub | ActionTag::FindSubCreate => Self::CreateSub,
            ActionTag::SlashEditdescription => Self::EditDescription { slash: true },
            ActionTag::FindSubEditDescription => Self::EditDescription { slash: false },
            ActionTag::SlashDelete | ActionTag::FindSubDelete => Self::Delete,
            ActionTag::SlashMarkdone | ActionTag::FindSubMarkDone => Self::MarkDone,
            ActionTag::SlashTalkai => Self::TalkAi { slash: true },
            ActionTag::FindSubTalkAi => Self::TalkAi { slash: false },
            ActionTag::SlashSelectsubnote | ActionTag::FindSubSelect => Self::SelectSub,
            _ => return None,
        })
    }

    fn search_first(self) -> SearchFirst {
        match self {
            Self::CreateSub => SearchFirst::WorkWith,
            Self::EditDescription { .. } => SearchFirst::Edit,
            Self::Delete => SearchFirst::Delete,
            Self::MarkDone => SearchFirst::Mark,
            Self::TalkAi { slash: true } => SearchFirst::Converse,
            Self::TalkAi { slash: false } => SearchFirst::Discuss,
            Self::SelectSub => SearchFirst::SelectFrom,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeFormatter;

impl OutcomeFormatter {
    /// Produces the reply for `intent`. Store failures become an apology.
    pub async fn format(
        &self,
        intent: &Intent,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
    ) -> Outcome {
        let texts = Texts::new(state.settings().language);
        match self.transition(intent, state, notes, &texts).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("[Dispatcher] {} failed: {}", intent.action, e);
                Outcome::reply(texts.apology())
            }
        }
    }

    async fn transition(
        &self,
        intent: &Intent,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> Result<Outcome> {
        if let Some(action) = FocusAction::of(intent.action) {
            return self.focus_action(action, intent, state, notes, texts).await;
        }

        let reply = match intent.action {
            ActionTag::SlashCreateNote => match intent.params.argument() {
                Some(title) => texts.ask_create_note(title),
                None => {
                    Self::await_argument(state, PendingCommand::CreateNote);
                    texts.ask_note_title()
                }
            },
            ActionTag::SlashFindNote => match intent.params.argument() {
                Some(query) => self.find_note(query, state, notes, texts).await?,
                None => {
                    Self::await_argument(state, PendingCommand::FindNote);
                    texts.ask_find_query()
                }
            },
            ActionTag::SlashFindById => match intent.params.argument() {
                Some(id) => self.find_by_id(id, state, notes, texts).await?,
                None => {
                    Self::await_argument(state, PendingCommand::FindById);
                    texts.ask_find_id()
                }
            },
            ActionTag::SlashShowParents => self.show_parents(notes, texts).await?,
            ActionTag::SlashHelp => texts.help(),
            ActionTag::NoteSelection => self.select_note(&intent.params, state, notes, texts).await?,
            ActionTag::StoryContent => Self::add_story_content(&intent.params, state, texts),
            ActionTag::StopEditingDescription | ActionTag::SlashStopediting => {
                Self::stop_editing(state, texts)
            }
            ActionTag::SlashSavelastmessage => Self::save_last_answer(state, texts),
            ActionTag::AiConversation => return Ok(Self::ask_ai(&intent.params, state, texts)),
            ActionTag::CancelAiConversation => {
                state.reset_mode();
                state.clear_find_context();
                texts.ai_cancelled()
            }
            ActionTag::CancelAction => {
                state.clear_find_context();
                texts.action_cancelled()
            }
            ActionTag::SubNoteName => Self::name_sub_note(&intent.params, state, texts),
            ActionTag::SlashBack | ActionTag::SlashCancel => {
                state.reset_to_normal();
                texts.back_to_normal()
            }
            ActionTag::GeminiQuestion => texts.ai_only_in_conversation(),
            ActionTag::UnknownSlashCommand => match &intent.params {
                Params::Command { command } => texts.unknown_command(command),
                _ => texts.unknown_command("?"),
            },
            ActionTag::Unknown => {
                if state.mode().is_awaiting_sub_note_name() {
                    texts.type_sub_note_name()
                } else {
                    texts.unknown()
                }
            }
            // Routed through `FocusAction` above.
            ActionTag::SlashCreatesub
            | ActionTag::SlashEditdescription
            | ActionTag::SlashDelete
            | ActionTag::SlashMarkdone
            | ActionTag::SlashTalkai
            | ActionTag::SlashSelectsubnote
            | ActionTag::FindSubCreate
            | ActionTag::FindSubEditDescription
            | ActionTag::FindSubDelete
            | ActionTag::FindSubMarkDone
            | ActionTag::FindSubTalkAi
            | ActionTag::FindSubSelect => texts.unknown(),
        };
        Ok(Outcome::reply(reply))
    }

    fn await_argument(state: &mut SessionState, command: PendingCommand) {
        debug!("[Dispatcher] Awaiting argument for {:?}", command);
        state.set_mode(Mode::AwaitingCommandArg { command });
    }

    async fn tree(note: &Note, notes: &dyn NoteRepository) -> Result<String> {
        let children = notes.find_children(&note.id).await?;
        Ok(render_tree(note, &children))
    }

    // ============================================================================
    // Search
    // ============================================================================

    async fn find_note(
        &self,
        query: &str,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> Result<String> {
        let mut matches: Vec<Note> = notes
            .find_by_title(query)
            .await?
            .into_iter()
            .map(|m| m.note)
            .collect();

        match matches.len() {
            0 => Ok(texts.no_notes_found(query)),
            1 => {
                let note = &matches[0];
                let reply = texts.found_one(note, &Self::tree(note, notes).await?);
                state.set_find_context(matches);
                Ok(reply)
            }
            count => {
                let entries: Vec<String> = matches
                    .iter()
                    .take(MAX_LISTED_MATCHES)
                    .enumerate()
                    .map(|(i, note)| texts.list_entry(i + 1, note))
                    .collect();
                let reply = texts.found_many(count, &entries);
                // Only listed notes can be picked.
                matches.truncate(MAX_LISTED_MATCHES);
                state.set_find_context(matches);
                Ok(reply)
            }
        }
    }

    async fn find_by_id(
        &self,
        id: &str,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> Result<String> {
        match notes.find_by_id(id).await?.into_iter().next() {
            Some(note) => {
                let reply = texts.found_by_id(&note, &Self::tree(&note, notes).await?);
                state.focus_on(note);
                Ok(reply)
            }
            None => Ok(texts.no_note_with_id(id)),
        }
    }

    async fn show_parents(&self, notes: &dyn NoteRepository, texts: &Texts) -> Result<String> {
        let roots = notes.root_notes().await?;
        if roots.is_empty() {
            return Ok(texts.no_parents());
        }

        let mut entries = Vec::with_capacity(roots.len());
        for (i, note) in roots.iter().enumerate() {
            let children = notes.find_children(&note.id).await?.len();
            let mut entry = texts.list_entry(i + 1, note);
            if children > 0 {
                entry.push_str(&texts.sub_note_count(children));
            }
            entries.push(entry);
        }
        Ok(texts.parents_list(roots.len(), &entries))
    }

    async fn select_note(
        &self,
        params: &Params,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> Result<String> {
        let Some(context) = state.find_context() else {
            return Ok(texts.nothing_to_select());
        };

        let selected = match params {
            Params::Selection {
                selection_type: SelectionType::Id,
                value,
            } => context.find_by_id(value).or_else(|| {
                value
                    .parse::<usize>()
                    .ok()
                    .and_then(|position| context.nth(position))
            }),
            Params::Selection {
                selection_type: SelectionType::Title,
                value,
            } => context.find_by_title(value),
            _ => None,
        }
        .cloned();

        match selected {
            Some(note) => {
                let reply = texts.selected_note(&note, &Self::tree(&note, notes).await?);
                state.focus_on(note);
                Ok(reply)
            }
            None => Ok(texts.no_matching_note()),
        }
    }

    // ============================================================================
    // Focus-note actions
    // ============================================================================

    async fn focus_action(
        &self,
        action: FocusAction,
        intent: &Intent,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> Result<Outcome> {
        let Some(focus) = state.focus_note().cloned() else {
            return Ok(Outcome::reply(texts.search_first(action.search_first())));
        };

        let reply = match action {
            FocusAction::CreateSub => texts.ask_sub_note_name(&focus.title),
            FocusAction::EditDescription { slash } => {
                if slash {
                    state.clear_find_context();
                }
                texts.editing_started(&focus.title)
            }
            FocusAction::Delete => texts.ask_delete(&focus.title),
            FocusAction::MarkDone => {
                let open: Vec<Note> = notes
                    .find_children(&focus.id)
                    .await?
                    .into_iter()
                    .filter(|child| !child.done)
                    .collect();
                if open.is_empty() {
                    texts.ask_mark_done(&focus.title)
                } else {
                    texts.incomplete_children(&focus.title, &open)
                }
            }
            FocusAction::TalkAi { .. } => {
                state.clear_find_context();
                texts.ai_started(&focus.title)
            }
            FocusAction::SelectSub => {
                return self
                    .select_sub_note(&focus, &intent.params, state, notes, texts)
                    .await
                    .map(Outcome::reply);
            }
        };
        Ok(Outcome::reply(reply))
    }

    async fn select_sub_note(
        &self,
        parent: &Note,
        params: &Params,
        state: &mut SessionState,
        notes: &dyn NoteRepository,
        texts: &Texts,
    ) -> Result<String> {
        let requested = match params {
            Params::SubAction { query, .. } => Some(query.trim()).filter(|q| !q.is_empty()),
            other => other.argument(),
        };
        let Some(requested) = requested else {
            return Ok(texts.select_sub_usage());
        };

        let children = notes.find_children(&parent.id).await?;
        let child = children
            .iter()
            .find(|child| child.id == requested)
            .or_else(|| {
                requested
                    .parse::<usize>()
                    .ok()
                    .filter(|position| *position >= 1)
                    .and_then(|position| children.get(position - 1))
            })
            .cloned();

        match child {
            Some(child) => {
                let reply = texts.selected_sub_note(&child, &Self::tree(&child, notes).await?);
                state.focus_on(child);
                Ok(reply)
            }
            None => Ok(texts.no_sub_note(requested, &parent.title)),
        }
    }

    // ============================================================================
    // Story editing
    // ============================================================================

    fn add_story_content(params: &Params, state: &mut SessionState, texts: &Texts) -> String {
        let content = match params {
            Params::Content { content } => content.trim(),
            _ => "",
        };
        match state.mode_mut() {
            Mode::StoryEditing { fragments, .. } => {
                if !content.is_empty() {
                    fragments.push(as_sentence(content));
                }
                texts.story_added()
            }
            _ => texts.not_editing(),
        }
    }

    fn stop_editing(state: &mut SessionState, texts: &Texts) -> String {
        let Mode::StoryEditing {
            note_id,
            note_title,
            fragments,
        } = state.mode().clone()
        else {
            return texts.not_editing();
        };

        state.reset_mode();
        let description = fragments.join(" ");
        if description.is_empty() {
            return texts.no_story_content();
        }

        let reply = texts.ask_update_description(&note_title, &description);
        state.set_pending(PendingConfirmation::StoryUpdate {
            note_id,
            description,
        });
        reply
    }

    fn save_last_answer(state: &mut SessionState, texts: &Texts) -> String {
        let Some(answer) = state.last_answer().cloned() else {
            return texts.no_last_answer();
        };
        let reply = texts.ask_update_description(&answer.note_title, &answer.text);
        state.set_pending(PendingConfirmation::StoryUpdate {
            note_id: answer.note_id,
            description: answer.text,
        });
        reply
    }

    // ============================================================================
    // AI conversation and sub-notes
    // ============================================================================

    fn ask_ai(params: &Params, state: &SessionState, texts: &Texts) -> Outcome {
        let question = match params {
            Params::Message { message } => message.trim(),
            _ => "",
        };
        let Mode::AiConversation {
            note,
            history,
            generation,
        } = state.mode()
        else {
            return Outcome::reply(texts.ai_only_in_conversation());
        };
        if question.is_empty() {
            return Outcome::reply(texts.empty_message());
        }

        Outcome {
            reply: texts.thinking(&note.title),
            answer_request: Some(AnswerRequest {
                note: note.clone(),
                history: history.clone(),
                question: question.to_string(),
                generation: *generation,
            }),
        }
    }

    fn name_sub_note(params: &Params, state: &mut SessionState, texts: &Texts) -> String {
        let Mode::AwaitingSubNoteName { parent_note_id } = state.mode().clone() else {
            return texts.no_pending_sub_note();
        };
        let name = match params {
            Params::Name { name } => name.trim().to_string(),
            _ => String::new(),
        };
        if name.is_empty() {
            return texts.type_sub_note_name();
        }

        state.reset_mode();
        state.clear_find_context();
        let reply = texts.ask_create_sub_note(&name);
        state.set_pending(PendingConfirmation::NoteCreate {
            title: name,
            parent_id: Some(parent_note_id),
        });
        reply
    }
}

/// Trims a story fragment and gives it terminal punctuation.
pub fn as_sentence(fragment: &str) -> String {
    let fragment = fragment.trim();
    if fragment.ends_with(['.', '!', '?']) {
        fragment.to_string()
    } else {
        format!("{}.", fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_sentence() {
        assert_eq!(as_sentence(" buy milk "), "buy milk.");
        assert_eq!(as_sentence("done!"), "done!");
        assert_eq!(as_sentence("why?"), "why?");
        assert_eq!(as_sentence("end."), "end.");
    }

    #[test]
    fn test_story_fragments_accumulate() {
        let mut state = SessionState::default();
        state.set_mode(Mode::StoryEditing {
            note_id: "7".into(),
            note_title: "shopping".into(),
            fragments: vec![],
        });
        let texts = Texts::new(Default::default());
        for content in ["buy milk", "buy eggs"] {
            OutcomeFormatter::add_story_content(
                &Params::Content {
                    content: content.into(),
                },
                &mut state,
                &texts,
            );
        }

        let reply = OutcomeFormatter::stop_editing(&mut state, &texts);
        assert_eq!(
            reply,
            "Do you want to update the description for 'shopping' with: 'buy milk. buy eggs.'? (yes/no)"
        );
        assert_eq!(
            state.pending(),
            Some(&PendingConfirmation::StoryUpdate {
                note_id: "7".into(),
                description: "buy milk. buy eggs.".into()
            })
        );
        assert!(state.mode().is_idle());
    }

    #[test]
    fn test_stop_without_content_or_mode() {
        let texts = Texts::new(Default::default());
        let mut state = SessionState::default();
        assert_eq!(
            OutcomeFormatter::stop_editing(&mut state, &texts),
            "Not in description editing mode."
        );

        state.set_mode(Mode::StoryEditing {
            note_id: "1".into(),
            note_title: "x".into(),
            fragments: vec![],
        });
        assert_eq!(
            OutcomeFormatter::stop_editing(&mut state, &texts),
            "No content was added to the story description."
        );
        assert!(state.pending().is_none());
    }

    #[test]
    fn test_ai_question_snapshots_conversation() {
        let mut state = SessionState::default();
        let note = Note {
            id: "3".into(),
            title: "trip".into(),
            ..Note::default()
        };
        let generation = state.enter_ai_conversation(note.clone());
        let texts = Texts::new(Default::default());

        let outcome = OutcomeFormatter::ask_ai(
            &Params::Message {
                message: "what to pack?".into(),
            },
            &state,
            &texts,
        );
        assert_eq!(outcome.reply, "🤖 Thinking about 'trip'...");
        let request = outcome.answer_request.unwrap();
        assert_eq!(request.note, note);
        assert_eq!(request.generation, generation);
        assert!(request.history.is_empty());
    }
}
