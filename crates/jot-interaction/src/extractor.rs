//! Typed parameter extraction from raw input.

use jot_core::intent::{ActionTag, Params, SelectionType};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::{PatternTable, SelectionPatterns};

static SINGLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'([^']+)'").expect("valid quoted segment regex"));

/// Turns `(action, raw text)` into [`Params`]. Never fails: anything it
/// cannot make sense of becomes an empty or `Unknown` parameter.
///
/// Note selections are read with the same [`PatternTable`] that classified
/// them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterExtractor;

impl ParameterExtractor {
    pub fn extract(&self, action: ActionTag, raw: &str, table: &PatternTable) -> Params {
        if action.is_slash() {
            return Self::slash_params(action, raw);
        }

        if let Some(sub_action) = action.sub_action() {
            return Params::SubAction {
                sub_action: sub_action.to_string(),
                query: first_quoted(raw).unwrap_or(raw).to_string(),
            };
        }

        match action {
            ActionTag::NoteSelection => Self::selection_params(raw, &table.note_selection),
            _ => match first_quoted(raw) {
                Some(title) => Params::Title {
                    title: title.to_string(),
                    has_parameter: true,
                },
                None => Params::None,
            },
        }
    }

    fn slash_params(action: ActionTag, raw: &str) -> Params {
        let remainder = slash_remainder(raw);
        let has_parameter = !remainder.is_empty();

        match action {
            ActionTag::SlashSelectsubnote => Params::SubNote {
                sub_note_id: remainder.to_string(),
                has_parameter,
            },
            ActionTag::SlashFindNote => Params::Query {
                query: remainder.to_string(),
                has_parameter,
            },
            ActionTag::SlashFindById => {
                let numeric = has_parameter && remainder.chars().all(|c| c.is_ascii_digit());
                Params::Query {
                    query: if numeric { remainder.to_string() } else { String::new() },
                    has_parameter: numeric,
                }
            }
            _ => Params::Title {
                title: remainder.to_string(),
                has_parameter,
            },
        }
    }

    fn selection_params(raw: &str, patterns: &SelectionPatterns) -> Params {
        let text = raw.trim();

        let (selection_type, value) = if let Some(id) = patterns.by_id.capture(text) {
            (SelectionType::Id, id)
        } else if let Some(title) = patterns.by_title.capture(text) {
            (SelectionType::Title, title)
        } else {
            (SelectionType::Unknown, raw)
        };

        Params::Selection {
            selection_type,
            value: value.to_string(),
        }
    }
}

/// Splits a slash command into its command token and the trimmed rest.
pub fn split_slash_command(raw: &str) -> (&str, &str) {
    let text = raw.trim();
    match text.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (text, ""),
    }
}

fn slash_remainder(raw: &str) -> &str {
    split_slash_command(raw).1
}

fn first_quoted(raw: &str) -> Option<&str> {
    SINGLE_QUOTED
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{BuiltinPatterns, PatternProvider, PatternSet, Rule};
    use jot_core::session::Language;

    fn extract_in(language: Language, action: ActionTag, raw: &str) -> Params {
        ParameterExtractor.extract(action, raw, BuiltinPatterns.table(language))
    }

    fn extract(action: ActionTag, raw: &str) -> Params {
        extract_in(Language::En, action, raw)
    }

    #[test]
    fn test_slash_remainder_becomes_title() {
        assert_eq!(
            extract(ActionTag::SlashCreateNote, "/createnote   buy milk "),
            Params::Title {
                title: "buy milk".into(),
                has_parameter: true
            }
        );
        assert_eq!(
            extract(ActionTag::SlashCreateNote, "/createnote"),
            Params::Title {
                title: String::new(),
                has_parameter: false
            }
        );
    }

    #[test]
    fn test_find_by_id_keeps_digits_only() {
        assert_eq!(
            extract(ActionTag::SlashFindById, "/find-by-id 42"),
            Params::Query {
                query: "42".into(),
                has_parameter: true
            }
        );
        assert_eq!(
            extract(ActionTag::SlashFindById, "/findbyid forty"),
            Params::Query {
                query: String::new(),
                has_parameter: false
            }
        );
    }

    #[test]
    fn test_selectsubnote_yields_sub_note_id() {
        assert_eq!(
            extract(ActionTag::SlashSelectsubnote, "/sub 2"),
            Params::SubNote {
                sub_note_id: "2".into(),
                has_parameter: true
            }
        );
    }

    #[test]
    fn test_note_selection_forms() {
        let id = |value: &str| Params::Selection {
            selection_type: SelectionType::Id,
            value: value.into(),
        };
        assert_eq!(extract(ActionTag::NoteSelection, "id 7"), id("7"));
        assert_eq!(extract(ActionTag::NoteSelection, "Note 3"), id("3"));
        assert_eq!(extract(ActionTag::NoteSelection, " 12 "), id("12"));
        assert_eq!(
            extract_in(Language::He, ActionTag::NoteSelection, "מזהה 5"),
            id("5")
        );
        assert_eq!(
            extract(ActionTag::NoteSelection, "\"Groceries\""),
            Params::Selection {
                selection_type: SelectionType::Title,
                value: "Groceries".into()
            }
        );
        assert_eq!(
            extract(ActionTag::NoteSelection, "the first one"),
            Params::Selection {
                selection_type: SelectionType::Unknown,
                value: "the first one".into()
            }
        );
    }

    #[test]
    fn test_note_selection_uses_given_table() {
        let mut table = BuiltinPatterns.table(Language::En).clone();
        table.note_selection = SelectionPatterns {
            by_id: PatternSet::new(vec![Rule::new(Regex::new(r"^#(\d+)$").unwrap(), None)]),
            by_title: PatternSet::default(),
        };

        assert_eq!(
            ParameterExtractor.extract(ActionTag::NoteSelection, "#2", &table),
            Params::Selection {
                selection_type: SelectionType::Id,
                value: "2".into()
            }
        );
        // The builtin forms are not recognised by this table.
        assert_eq!(
            ParameterExtractor.extract(ActionTag::NoteSelection, "'Groceries'", &table),
            Params::Selection {
                selection_type: SelectionType::Unknown,
                value: "'Groceries'".into()
            }
        );
    }

    #[test]
    fn test_find_sub_actions_carry_sub_action() {
        assert_eq!(
            extract(ActionTag::FindSubMarkDone, "mark 'groceries' done"),
            Params::SubAction {
                sub_action: "mark_done".into(),
                query: "groceries".into()
            }
        );
        assert_eq!(
            extract(ActionTag::FindSubDelete, "delete it"),
            Params::SubAction {
                sub_action: "delete".into(),
                query: "delete it".into()
            }
        );
    }

    #[test]
    fn test_other_actions_take_quoted_title() {
        assert_eq!(extract(ActionTag::Unknown, "hello"), Params::None);
        assert_eq!(
            extract(ActionTag::Unknown, "about 'trip'"),
            Params::Title {
                title: "trip".into(),
                has_parameter: true
            }
        );
    }
}
