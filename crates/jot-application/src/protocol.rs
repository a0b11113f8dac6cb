//! Messages exchanged with the dialogue engine.

use jot_core::slash_command::AvailableCommand;
use serde::{Deserialize, Serialize};

/// An inbound request, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// One line of user text. `lang` and `autoConfirm` update the session
    /// settings before the text is classified.
    Chat {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        #[serde(
            default,
            rename = "autoConfirm",
            skip_serializing_if = "Option::is_none"
        )]
        auto_confirm: Option<bool>,
    },
    /// Commands usable in the current conversation state.
    GetCommands,
    SaveSettings {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        #[serde(
            default,
            rename = "autoConfirm",
            skip_serializing_if = "Option::is_none"
        )]
        auto_confirm: Option<bool>,
    },
}

impl Request {
    pub fn chat(text: impl Into<String>) -> Self {
        Self::Chat {
            text: text.into(),
            lang: None,
            auto_confirm: None,
        }
    }
}

/// The immediate answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Reply { text: String },
    AvailableCommands { commands: Vec<AvailableCommand> },
}

impl Response {
    /// The reply text, if this is a reply.
    pub fn text(&self) -> Option<&str> {
        match self {
            Response::Reply { text } => Some(text),
            Response::AvailableCommands { .. } => None,
        }
    }
}

/// A message produced after the request that caused it has been answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    AiAnswer { note_id: String, text: String },
    AiFailure { note_id: String, text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_format() {
        let request: Request =
            serde_json::from_str(r#"{"type":"chat","text":"/help","lang":"he","autoConfirm":true}"#)
                .unwrap();
        assert_eq!(
            request,
            Request::Chat {
                text: "/help".into(),
                lang: Some("he".into()),
                auto_confirm: Some(true)
            }
        );

        let bare: Request = serde_json::from_str(r#"{"type":"chat","text":"hi"}"#).unwrap();
        assert_eq!(bare, Request::chat("hi"));

        let commands: Request = serde_json::from_str(r#"{"type":"get_commands"}"#).unwrap();
        assert_eq!(commands, Request::GetCommands);
    }

    #[test]
    fn test_outbound_wire_format() {
        let json = serde_json::to_value(OutboundMessage::AiAnswer {
            note_id: "3".into(),
            text: "Pack light.".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "ai_answer");
        assert_eq!(json["note_id"], "3");
    }
}
