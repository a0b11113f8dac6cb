//! JSON-file backed NoteRepository implementation.

use crate::search::{similarity, TITLE_MATCH_THRESHOLD};
use crate::storage::AtomicFile;
use chrono::{Local, SecondsFormat, Utc};
use jot_core::error::{JotError, Result};
use jot_core::note::{Note, NoteRepository, TitleMatch};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The persisted document: every note ever created plus the id counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesData {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub last_note_id: u64,
}

impl NotesData {
    fn next_id(&mut self) -> String {
        self.last_note_id += 1;
        self.last_note_id.to_string()
    }

    fn live_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id && !n.deleted)
    }

    fn live(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| !n.deleted)
    }
}

/// A note store holding all notes in memory and mirroring them to `notes.json`.
///
/// Every mutation rewrites the whole file atomically. Without a backing file
/// (see [`JsonNoteRepository::in_memory`]) nothing is persisted.
pub struct JsonNoteRepository {
    data: RwLock<NotesData>,
    file: Option<AtomicFile<NotesData>>,
}

impl JsonNoteRepository {
    /// Opens (or creates) the notes file at `path`.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = AtomicFile::json(path);
        let data = match file.load()? {
            Some(data) => data,
            None => {
                let empty = NotesData::default();
                file.save(&empty)?;
                empty
            }
        };
        debug!(
            "[NoteStore] Loaded {} notes from {}",
            data.notes.len(),
            file.path().display()
        );
        Ok(Self {
            data: RwLock::new(data),
            file: Some(file),
        })
    }

    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(NotesData::default()),
            file: None,
        }
    }

    /// Snapshot of the persisted document, deleted notes included.
    pub async fn snapshot(&self) -> NotesData {
        self.data.read().await.clone()
    }

    fn persist(&self, data: &NotesData) -> Result<()> {
        match &self.file {
            Some(file) => file.save(data),
            None => Ok(()),
        }
    }

    /// Applies `change` to a copy of the document. The copy replaces the
    /// in-memory document only once it has been persisted; `None` from
    /// `change` leaves everything untouched.
    async fn commit<R>(
        &self,
        change: impl FnOnce(&mut NotesData) -> Option<R>,
    ) -> Result<Option<R>> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let Some(result) = change(&mut next) else {
            return Ok(None);
        };
        self.persist(&next)?;
        *data = next;
        Ok(Some(result))
    }

    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Prefix stamped in front of every appended description paragraph.
    fn date_prefix() -> String {
        format!("[{}] ", Local::now().format("%a %b %d %H:%M:%S %Y"))
    }
}

#[async_trait::async_trait]
impl NoteRepository for JsonNoteRepository {
    async fn create(
        &self,
        title: &str,
        description: &str,
        parent_id: Option<&str>,
    ) -> Result<Note> {
        let now = Self::now();
        let note = self
            .commit(|data| {
                let note = Note {
                    id: data.next_id(),
                    title: title.to_string(),
                    description: description.to_string(),
                    parent_id: parent_id.map(str::to_string),
                    done: false,
                    done_date: None,
                    creation_date: now.clone(),
                    last_updated: now,
                    tags: Vec::new(),
                    images: Vec::new(),
                    deleted: false,
                };
                data.notes.push(note.clone());
                Some(note)
            })
            .await?
            .ok_or_else(|| JotError::internal("note was not created"))?;

        info!("[NoteStore] Created note {} '{}'", note.id, note.title);
        Ok(note)
    }

    async fn delete(&self, id: &str) -> Result<Option<Note>> {
        let deleted = self
            .commit(|data| {
                let note = data.live_mut(id)?;
                note.deleted = true;
                note.last_updated = Self::now();
                Some(note.clone())
            })
            .await?;

        if deleted.is_some() {
            info!("[NoteStore] Deleted note {}", id);
        }
        Ok(deleted)
    }

    async fn update_description(&self, id: &str, text: &str) -> Result<Option<Note>> {
        let paragraph = format!("{}{}", Self::date_prefix(), text);
        let updated = self
            .commit(|data| {
                let note = data.live_mut(id)?;
                note.description = if note.description.trim().is_empty() {
                    paragraph
                } else {
                    format!("{}\n\n{}", note.description, paragraph)
                };
                note.last_updated = Self::now();
                Some(note.clone())
            })
            .await?;

        if updated.is_some() {
            info!("[NoteStore] Updated description of note {}", id);
        }
        Ok(updated)
    }

    async fn mark_done(&self, id: &str) -> Result<Option<Note>> {
        let now = Self::now();
        let done = self
            .commit(|data| {
                let note = data.live_mut(id)?;
                note.done = true;
                note.done_date = Some(now.clone());
                note.last_updated = now;
                Some(note.clone())
            })
            .await?;

        if done.is_some() {
            info!("[NoteStore] Marked note {} as done", id);
        }
        Ok(done)
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<Note>> {
        let data = self.data.read().await;
        let id = id.trim();
        Ok(data.live().filter(|n| n.id == id).take(1).cloned().collect())
    }

    async fn find_by_title(&self, query: &str) -> Result<Vec<TitleMatch>> {
        let data = self.data.read().await;
        let mut matches: Vec<TitleMatch> = data
            .live()
            .filter_map(|note| {
                let score = similarity(query, &note.title);
                (score >= TITLE_MATCH_THRESHOLD).then(|| TitleMatch {
                    note: note.clone(),
                    similarity: score,
                })
            })
            .collect();
        // Stable sort keeps creation order among equal scores.
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        debug!("[NoteStore] '{}' matched {} notes", query, matches.len());
        Ok(matches)
    }

    async fn find_children(&self, parent_id: &str) -> Result<Vec<Note>> {
        let data = self.data.read().await;
        Ok(data
            .live()
            .filter(|n| n.parent_id.as_deref() == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn root_notes(&self) -> Result<Vec<Note>> {
        let data = self.data.read().await;
        let mut roots: Vec<Note> = data.live().filter(|n| n.is_root()).cloned().collect();
        roots.sort_by(|a, b| {
            b.creation_date
                .cmp(&a.creation_date)
                .then_with(|| numeric_id(&b.id).cmp(&numeric_id(&a.id)))
        });
        Ok(roots)
    }
}

fn numeric_id(id: &str) -> u64 {
    id.parse().unwrap_or(0)
}
