//! File-backed implementations of the jot-core contracts.

pub mod config_service;
pub mod json_note_repository;
pub mod paths;
pub mod search;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_note_repository::{JsonNoteRepository, NotesData};
pub use crate::paths::JotPaths;
