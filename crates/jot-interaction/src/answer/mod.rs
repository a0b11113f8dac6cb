//! The answer collaborator used inside AI conversations.

pub mod gemini_api_agent;
pub mod prompt;

pub use gemini_api_agent::GeminiApiAgent;
pub use prompt::{ContextType, PromptBuilder};

use async_trait::async_trait;
use jot_core::error::{JotError, Result};
use jot_core::note::Note;
use jot_core::session::AiTurn;

/// Answers one fully built prompt.
#[async_trait]
pub trait AnswerAgent: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<String>;
}

/// A question asked inside an AI conversation, together with the session
/// snapshot it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    pub note: Note,
    /// Conversation turns before this question.
    pub history: Vec<AiTurn>,
    pub question: String,
    /// Generation of the conversation that asked.
    pub generation: u64,
}

/// Stand-in used when no answer provider is configured; every question fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredAgent;

#[async_trait]
impl AnswerAgent for UnconfiguredAgent {
    async fn ask(&self, _prompt: &str) -> Result<String> {
        Err(JotError::collaborator("no answer provider is configured"))
    }
}
