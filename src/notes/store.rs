//! Port trait for note persistence.

use anyhow::Result;
use uuid::Uuid;

use crate::notes::note::{Note, NoteDraft};

/// Abstraction over the note collection. Plain CRUD; `find_all` returns
/// newest-first by creation time.
#[cfg_attr(test, mockall::automock)]
pub trait NoteStore: Send + Sync {
    /// Persists a new note, assigning id and creation time.
    fn insert(&self, record: NoteDraft) -> Result<Note>;

    /// All notes, newest first.
    fn find_all(&self) -> Result<Vec<Note>>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Note>>;

    /// Full-field update; `Ok(None)` when the id does not exist.
    fn update(&self, id: Uuid, record: NoteDraft) -> Result<Option<Note>>;

    /// Removes a note, returning the deleted record if it existed.
    fn delete(&self, id: Uuid) -> Result<Option<Note>>;
}
