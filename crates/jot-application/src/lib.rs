//! Application layer for JOT.
//!
//! [`DialogueEngine`] is the single entry point used by every surface: it
//! owns one conversation's session state, runs the dialogue engine on each
//! request, and delivers AI answers asynchronously.

pub mod dialogue_engine;
pub mod protocol;

pub use dialogue_engine::DialogueEngine;
pub use protocol::{OutboundMessage, Request, Response};
