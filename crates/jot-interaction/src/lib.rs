//! The dialogue engine: turns one line of user text plus the session state
//! into a reply.
//!
//! [`IntentClassifier`] reads the line, [`Dispatcher`] applies the intent
//! through the [`ConfirmationProtocol`] and the [`OutcomeFormatter`].

pub mod answer;
pub mod classifier;
pub mod confirmation;
pub mod dispatcher;
pub mod extractor;
pub mod formatter;
pub mod patterns;
pub mod texts;

pub use answer::{AnswerAgent, AnswerRequest, GeminiApiAgent, PromptBuilder, UnconfiguredAgent};
pub use classifier::IntentClassifier;
pub use confirmation::ConfirmationProtocol;
pub use dispatcher::Dispatcher;
pub use extractor::ParameterExtractor;
pub use formatter::{Outcome, OutcomeFormatter};
pub use patterns::{BuiltinPatterns, PatternProvider, PatternTable, SelectionPatterns};
pub use texts::Texts;
