//! Note domain model.

use serde::{Deserialize, Serialize};

/// A single note in the hierarchical note store.
///
/// Notes form a tree through `parent_id`. Deletion is soft: a deleted note
/// keeps its record but is hidden from every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Decimal identifier, allocated monotonically by the store.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub done: bool,
    /// RFC 3339 timestamp of completion.
    #[serde(default)]
    pub done_date: Option<String>,
    /// RFC 3339 timestamp of creation.
    pub creation_date: String,
    /// RFC 3339 timestamp of the last mutation.
    pub last_updated: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl Note {
    /// Status glyph used in lists and trees.
    pub fn status_glyph(&self) -> &'static str {
        if self.done { "✅" } else { "➡️" }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A fuzzy title search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleMatch {
    pub note: Note,
    /// Normalized similarity in `[0, 1]`, higher is closer.
    pub similarity: f64,
}
