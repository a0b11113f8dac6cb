//! Note repository trait.
//!
//! Defines the interface for note persistence operations.

use super::model::{Note, TitleMatch};
use crate::error::Result;

/// An abstract repository for the hierarchical note store.
///
/// Lookups never return soft-deleted notes. Mutations return `Ok(None)` when
/// the target note does not exist (or was deleted in the meantime), and
/// `Err(JotError)` only when the store itself fails.
#[async_trait::async_trait]
pub trait NoteRepository: Send + Sync {
    /// Creates a note and returns it with its freshly allocated id.
    async fn create(
        &self,
        title: &str,
        description: &str,
        parent_id: Option<&str>,
    ) -> Result<Note>;

    /// Soft-deletes a note.
    async fn delete(&self, id: &str) -> Result<Option<Note>>;

    /// Appends a date-stamped paragraph to the note's description.
    ///
    /// The appended paragraph has the form `"[<local date>] text"` and is
    /// separated from existing content by a blank line.
    async fn update_description(&self, id: &str, text: &str) -> Result<Option<Note>>;

    /// Marks a note as done, recording the completion time.
    async fn mark_done(&self, id: &str) -> Result<Option<Note>>;

    /// Returns the note with the given id as a zero- or one-element list.
    async fn find_by_id(&self, id: &str) -> Result<Vec<Note>>;

    /// Fuzzy, case-insensitive title search sorted by similarity (descending).
    async fn find_by_title(&self, query: &str) -> Result<Vec<TitleMatch>>;

    /// Direct children of a note, in creation order.
    async fn find_children(&self, parent_id: &str) -> Result<Vec<Note>>;

    /// Parentless notes, newest first.
    async fn root_notes(&self) -> Result<Vec<Note>>;
}
