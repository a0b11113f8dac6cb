//! Domain types of the Jot note assistant.
//!
//! This crate has no I/O: it defines notes and the repository contract,
//! session state, classified intents, the builtin slash-command table and the
//! root configuration. Storage lives in `jot-infrastructure`; the dialogue
//! engine lives in `jot-interaction`.

pub mod config;
pub mod error;
pub mod intent;
pub mod note;
pub mod session;
pub mod slash_command;

// Re-export common error type
pub use error::{JotError, Result};
