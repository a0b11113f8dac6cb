use serde::{Deserialize, Serialize};

/// How a `note_selection` refers to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    Id,
    Title,
    Unknown,
}

/// Parameters extracted from the raw input of an intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Params {
    #[default]
    None,
    Title {
        title: String,
        has_parameter: bool,
    },
    Query {
        query: String,
        has_parameter: bool,
    },
    SubNote {
        sub_note_id: String,
        has_parameter: bool,
    },
    Selection {
        selection_type: SelectionType,
        value: String,
    },
    SubAction {
        sub_action: String,
        query: String,
    },
    Message {
        message: String,
    },
    Content {
        content: String,
    },
    Name {
        name: String,
    },
    Question {
        question: String,
    },
    Command {
        command: String,
    },
}

impl Params {
    /// The inline argument of a slash command, if one was given and is
    /// not blank.
    pub fn argument(&self) -> Option<&str> {
        let arg = match self {
            Params::Title {
                title,
                has_parameter: true,
            } => Some(title),
            Params::Query {
                query,
                has_parameter: true,
            } => Some(query),
            Params::SubNote {
                sub_note_id,
                has_parameter: true,
            } => Some(sub_note_id),
            _ => None,
        };
        arg.map(|a| a.trim()).filter(|a| !a.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_requires_flag_and_content() {
        let given = Params::Title {
            title: " groceries ".into(),
            has_parameter: true,
        };
        assert_eq!(given.argument(), Some("groceries"));

        let blank = Params::Query {
            query: "  ".into(),
            has_parameter: true,
        };
        assert_eq!(blank.argument(), None);

        let absent = Params::SubNote {
            sub_note_id: "2".into(),
            has_parameter: false,
        };
        assert_eq!(absent.argument(), None);
    }
}
