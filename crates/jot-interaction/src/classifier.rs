//! Intent classification.
//!
//! The session is consulted before any pattern table: an active mode decides
//! how a line is read, so e.g. nothing typed during an AI conversation ever
//! reaches slash-command handling.

use std::sync::Arc;

use jot_core::intent::{ActionTag, Confidence, Intent, Params};
use jot_core::session::{Mode, PendingCommand, SessionState};
use jot_core::slash_command::find_builtin_command;
use tracing::debug;

use crate::extractor::{split_slash_command, ParameterExtractor};
use crate::patterns::{BuiltinPatterns, PatternProvider};

/// Classifies one line of input against the current session.
#[derive(Clone)]
pub struct IntentClassifier {
    patterns: Arc<dyn PatternProvider>,
    extractor: ParameterExtractor,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinPatterns))
    }
}

impl IntentClassifier {
    pub fn new(patterns: Arc<dyn PatternProvider>) -> Self {
        Self {
            patterns,
            extractor: ParameterExtractor,
        }
    }

    /// Runs the priority cascade; the first matching rule wins.
    ///
    /// Takes the session mutably because an awaited command argument is
    /// consumed here (the mode returns to idle).
    pub fn classify(&self, text: &str, state: &mut SessionState) -> Intent {
        let intent = self.cascade(text, state);
        debug!(
            "[Classifier] '{}' -> {} ({:?}, mode={})",
            text,
            intent.action,
            intent.confidence,
            state.mode().name()
        );
        intent
    }

    fn cascade(&self, text: &str, state: &mut SessionState) -> Intent {
        let table = self.patterns.table(state.settings().language);
        let trimmed = text.trim();

        match state.mode() {
            Mode::AiConversation { .. } => {
                return if table.cancel_ai.is_match(trimmed) {
                    Intent::new(
                        ActionTag::CancelAiConversation,
                        Params::None,
                        Confidence::Certain,
                    )
                } else {
                    Intent::new(
                        ActionTag::AiConversation,
                        Params::Message {
                            message: trimmed.to_string(),
                        },
                        Confidence::Certain,
                    )
                };
            }
            Mode::StoryEditing { .. } => {
                if let Some(intent) = Self::editing_command(trimmed) {
                    return intent;
                }
                return if table.stop_editing.is_match(trimmed) {
                    Intent::new(
                        ActionTag::StopEditingDescription,
                        Params::None,
                        Confidence::Certain,
                    )
                } else {
                    Intent::new(
                        ActionTag::StoryContent,
                        Params::Content {
                            content: trimmed.to_string(),
                        },
                        Confidence::Certain,
                    )
                };
            }
            Mode::AwaitingCommandArg { command } => {
                let command = *command;
                state.reset_mode();
                return Self::completed_command(command, trimmed);
            }
            Mode::AwaitingSubNoteName { .. } => {
                return if table.yes.is_match(trimmed) || table.no.is_match(trimmed) {
                    Intent::unknown()
                } else {
                    Intent::new(
                        ActionTag::SubNoteName,
                        Params::Name {
                            name: trimmed.to_string(),
                        },
                        Confidence::High,
                    )
                };
            }
            Mode::Idle => {}
        }

        if state.find_context().is_some() {
            if table.cancel_action.is_match(trimmed) {
                return Intent::new(ActionTag::CancelAction, Params::None, Confidence::High);
            }
            if table.note_selection.is_match(trimmed) {
                return Intent::new(
                    ActionTag::NoteSelection,
                    self.extractor.extract(ActionTag::NoteSelection, trimmed, table),
                    Confidence::High,
                );
            }
        }

        if trimmed.starts_with('/') {
            let (token, _) = split_slash_command(trimmed);
            return match find_builtin_command(token) {
                Some(command) => Intent::new(
                    command.action,
                    self.extractor.extract(command.action, trimmed, table),
                    Confidence::Certain,
                ),
                None => Intent::new(
                    ActionTag::UnknownSlashCommand,
                    Params::Command {
                        command: token.to_string(),
                    },
                    Confidence::High,
                ),
            };
        }

        Intent::new(
            ActionTag::GeminiQuestion,
            Params::Question {
                question: trimmed.to_string(),
            },
            Confidence::Low,
        )
    }

    /// Slash commands that still work while a description is being written.
    fn editing_command(text: &str) -> Option<Intent> {
        if !text.starts_with('/') {
            return None;
        }
        let (token, _) = split_slash_command(text);
        let command = find_builtin_command(token)?;
        matches!(
            command.action,
            ActionTag::SlashStopediting | ActionTag::SlashBack | ActionTag::SlashCancel
        )
        .then(|| Intent::new(command.action, Params::None, Confidence::Certain))
    }

    fn completed_command(command: PendingCommand, argument: &str) -> Intent {
        let argument = argument.to_string();
        let (action, params) = match command {
            PendingCommand::CreateNote => (
                ActionTag::SlashCreateNote,
                Params::Title {
                    title: argument,
                    has_parameter: true,
                },
            ),
            PendingCommand::FindNote => (
                ActionTag::SlashFindNote,
                Params::Query {
                    query: argument,
                    has_parameter: true,
                },
            ),
            PendingCommand::FindById => (
                ActionTag::SlashFindById,
                Params::Query {
                    query: argument,
                    has_parameter: true,
                },
            ),
        };
        Intent::new(action, params, Confidence::Certain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_core::intent::SelectionType;
    use jot_core::note::Note;
    use jot_core::session::{Language, Settings};
    use regex::Regex;

    use crate::patterns::{PatternSet, PatternTable, Rule, SelectionPatterns};

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            ..Note::default()
        }
    }

    fn classify(text: &str, state: &mut SessionState) -> Intent {
        IntentClassifier::default().classify(text, state)
    }

    #[test]
    fn test_ai_mode_swallows_everything_but_cancel() {
        let mut state = SessionState::default();
        state.enter_ai_conversation(note("3", "trip"));
        state.set_find_context(vec![note("3", "trip")]);

        for text in ["/findnote x", "/delete", "1", "id 3", "yes"] {
            let intent = classify(text, &mut state);
            assert_eq!(intent.action, ActionTag::AiConversation, "{}", text);
        }
        assert_eq!(
            classify("cancel", &mut state).action,
            ActionTag::CancelAiConversation
        );
        assert_eq!(
            classify("/back", &mut state).action,
            ActionTag::CancelAiConversation
        );
    }

    #[test]
    fn test_story_editing_collects_content_until_stop() {
        let mut state = SessionState::default();
        state.set_mode(Mode::StoryEditing {
            note_id: "7".into(),
            note_title: "shopping".into(),
            fragments: vec![],
        });

        let intent = classify(" buy milk ", &mut state);
        assert_eq!(intent.action, ActionTag::StoryContent);
        assert_eq!(
            intent.params,
            Params::Content {
                content: "buy milk".into()
            }
        );
        assert_eq!(
            classify("stop editing description", &mut state).action,
            ActionTag::StopEditingDescription
        );
        assert_eq!(
            classify("/stop_editing", &mut state).action,
            ActionTag::SlashStopediting
        );
        assert_eq!(classify("/back", &mut state).action, ActionTag::SlashBack);
        // Other commands are written into the description.
        assert_eq!(classify("/delete", &mut state).action, ActionTag::StoryContent);
    }

    #[test]
    fn test_awaited_argument_completes_command_and_resets_mode() {
        let mut state = SessionState::default();
        state.set_mode(Mode::AwaitingCommandArg {
            command: PendingCommand::FindNote,
        });

        let intent = classify("groceries", &mut state);
        assert_eq!(intent.action, ActionTag::SlashFindNote);
        assert_eq!(intent.params.argument(), Some("groceries"));
        assert!(state.mode().is_idle());
    }

    #[test]
    fn test_sub_note_name_leaves_yes_no_to_confirmation() {
        let mut state = SessionState::default();
        state.set_mode(Mode::AwaitingSubNoteName {
            parent_note_id: "1".into(),
        });

        assert_eq!(classify("no", &mut state).action, ActionTag::Unknown);
        assert_eq!(classify("yes", &mut state).action, ActionTag::Unknown);
        let intent = classify("milk", &mut state);
        assert_eq!(intent.action, ActionTag::SubNoteName);
        assert_eq!(intent.params, Params::Name { name: "milk".into() });
        assert!(state.mode().is_awaiting_sub_note_name());
    }

    #[test]
    fn test_find_context_selection_and_cancel() {
        let mut state = SessionState::default();
        state.set_find_context(vec![note("1", "groceries"), note("2", "grocery")]);

        let intent = classify("1", &mut state);
        assert_eq!(intent.action, ActionTag::NoteSelection);
        assert_eq!(
            intent.params,
            Params::Selection {
                selection_type: SelectionType::Id,
                value: "1".into()
            }
        );
        assert_eq!(classify("cancel", &mut state).action, ActionTag::CancelAction);
        // Anything else falls through to slash handling.
        assert_eq!(classify("/delete", &mut state).action, ActionTag::SlashDelete);
    }

    #[test]
    fn test_slash_commands_in_every_spelling() {
        let mut state = SessionState::default();
        for text in ["/findbyid 3", "/find_by_id 3", "/find-by-id 3", "/findById 3", "/id 3"] {
            let intent = classify(text, &mut state);
            assert_eq!(intent.action, ActionTag::SlashFindById, "{}", text);
            assert_eq!(intent.confidence, Confidence::Certain);
            assert_eq!(intent.params.argument(), Some("3"));
        }
    }

    #[test]
    fn test_unknown_slash_and_free_text() {
        let mut state = SessionState::default();
        let intent = classify("/stop", &mut state);
        assert_eq!(intent.action, ActionTag::UnknownSlashCommand);
        assert_eq!(
            intent.params,
            Params::Command {
                command: "/stop".into()
            }
        );

        let intent = classify("what should I buy?", &mut state);
        assert_eq!(intent.action, ActionTag::GeminiQuestion);
        assert_eq!(intent.confidence, Confidence::Low);
    }

    struct HashSelection(PatternTable);

    impl PatternProvider for HashSelection {
        fn table(&self, _language: Language) -> &PatternTable {
            &self.0
        }
    }

    #[test]
    fn test_custom_selection_table_drives_extraction() {
        let mut table = BuiltinPatterns.table(Language::En).clone();
        table.note_selection = SelectionPatterns {
            by_id: PatternSet::new(vec![Rule::new(Regex::new(r"^#(\d+)$").unwrap(), None)]),
            by_title: PatternSet::default(),
        };
        let classifier = IntentClassifier::new(Arc::new(HashSelection(table)));
        let mut state = SessionState::default();
        state.set_find_context(vec![note("1", "groceries"), note("2", "grocery")]);

        let intent = classifier.classify("#2", &mut state);
        assert_eq!(intent.action, ActionTag::NoteSelection);
        assert_eq!(
            intent.params,
            Params::Selection {
                selection_type: SelectionType::Id,
                value: "2".into()
            }
        );
    }

    #[test]
    fn test_hebrew_tables_follow_settings() {
        let mut state = SessionState::new(Settings::new(Language::He, false));
        state.set_find_context(vec![note("4", "קניות")]);
        assert_eq!(classify("ביטול", &mut state).action, ActionTag::CancelAction);
        assert_eq!(classify("מזהה 4", &mut state).action, ActionTag::NoteSelection);
    }
}
