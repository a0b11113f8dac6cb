use serde::{Deserialize, Serialize};

use crate::note::Note;

/// The notes currently in focus after a search or selection.
///
/// Never empty: [`FindContext::new`] refuses an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindContext {
    notes: Vec<Note>,
}

impl FindContext {
    pub fn new(notes: Vec<Note>) -> Option<Self> {
        if notes.is_empty() {
            None
        } else {
            Some(Self { notes })
        }
    }

    pub fn single(note: Note) -> Self {
        Self { notes: vec![note] }
    }

    /// The first note, which every `find_sub_*` action operates on.
    pub fn focus(&self) -> &Note {
        &self.notes[0]
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Case-insensitive exact title match.
    pub fn find_by_title(&self, title: &str) -> Option<&Note> {
        let wanted = title.trim().to_lowercase();
        self.notes.iter().find(|n| n.title.to_lowercase() == wanted)
    }

    /// 1-based position lookup.
    pub fn nth(&self, position: usize) -> Option<&Note> {
        position.checked_sub(1).and_then(|i| self.notes.get(i))
    }
}
