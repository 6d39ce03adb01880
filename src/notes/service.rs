//! Application service for notes.
//!
//! Pass-through CRUD: notes have required contact fields and no other
//! invariants. The tentative meeting fields are stored as submitted;
//! they are only interpreted if the note is later promoted to a
//! reservation through the booking path.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::error::booking::ValidationError;
use crate::error::entity::NotFoundError;
use crate::notes::note::{Note, NoteDraft};
use crate::notes::store::NoteStore;

/// Failure modes of the note operations.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("storage failure")]
    Store(#[source] anyhow::Error),
}

/// Note operations exposed to the HTTP layer.
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: NoteDraft) -> Result<Note, NoteError> {
        let draft = validate(draft)?;
        self.store.insert(draft).map_err(NoteError::Store)
    }

    /// All notes, newest first.
    pub fn get_all(&self) -> Result<Vec<Note>, NoteError> {
        self.store.find_all().map_err(NoteError::Store)
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Note, NoteError> {
        self.store
            .find_by_id(id)
            .map_err(NoteError::Store)?
            .ok_or_else(|| NotFoundError::new("Note").into())
    }

    /// Full-field update; no partial patch semantics.
    pub fn update(&self, id: Uuid, draft: NoteDraft) -> Result<Note, NoteError> {
        let draft = validate(draft)?;
        self.store
            .update(id, draft)
            .map_err(NoteError::Store)?
            .ok_or_else(|| NotFoundError::new("Note").into())
    }

    pub fn delete(&self, id: Uuid) -> Result<Note, NoteError> {
        self.store
            .delete(id)
            .map_err(NoteError::Store)?
            .ok_or_else(|| NotFoundError::new("Note").into())
    }
}

/// Required-field check; trims what it validates.
fn validate(mut draft: NoteDraft) -> Result<NoteDraft, ValidationError> {
    draft.title = draft.title.trim().to_string();
    if draft.title.is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    draft.content = draft.content.trim().to_string();
    if draft.content.is_empty() {
        return Err(ValidationError::MissingField("content"));
    }
    draft.email = draft.email.trim().to_lowercase();
    if draft.email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    draft.phone = draft.phone.trim().to_string();
    if draft.phone.is_empty() {
        return Err(ValidationError::MissingField("phone"));
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use anyhow::Result as AnyResult;
    use chrono::Utc;

    #[derive(Default)]
    struct InMemoryNotes {
        rows: Mutex<Vec<Note>>,
    }

    impl InMemoryNotes {
        fn materialize(record: NoteDraft) -> Note {
            Note {
                id: Uuid::new_v4(),
                title: record.title,
                content: record.content,
                email: record.email,
                phone: record.phone,
                meeting_date: record.meeting_date,
                meeting_time: record.meeting_time,
                meeting_timezone: record.meeting_timezone,
                slot_time: record.slot_time,
                created_at: Utc::now().naive_utc(),
            }
        }
    }

    impl NoteStore for InMemoryNotes {
        fn insert(&self, record: NoteDraft) -> AnyResult<Note> {
            let note = Self::materialize(record);
            self.rows.lock().unwrap().push(note.clone());
            Ok(note)
        }

        fn find_all(&self) -> AnyResult<Vec<Note>> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.reverse(); // insertion order -> newest first
            Ok(rows)
        }

        fn find_by_id(&self, id: Uuid) -> AnyResult<Option<Note>> {
            Ok(self.rows.lock().unwrap().iter().find(|n| n.id == id).cloned())
        }

        fn update(&self, id: Uuid, record: NoteDraft) -> AnyResult<Option<Note>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(pos) = rows.iter().position(|n| n.id == id) else {
                return Ok(None);
            };
            let mut updated = Self::materialize(record);
            updated.id = id;
            updated.created_at = rows[pos].created_at;
            rows[pos] = updated.clone();
            Ok(Some(updated))
        }

        fn delete(&self, id: Uuid) -> AnyResult<Option<Note>> {
            let mut rows = self.rows.lock().unwrap();
            let pos = rows.iter().position(|n| n.id == id);
            Ok(pos.map(|p| rows.remove(p)))
        }
    }

    fn draft() -> NoteDraft {
        NoteDraft {
            title: "Call back".into(),
            content: "Asked about pricing".into(),
            email: "Lead@Example.com".into(),
            phone: "+359888123456".into(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn create_stores_a_sanitized_note() {
        let svc = NoteService::new(Arc::new(InMemoryNotes::default()));

        let note = svc.create(draft()).unwrap();

        assert_eq!(note.email, "lead@example.com"); // lower-cased
        assert_eq!(note.title, "Call back");
    }

    #[test]
    fn create_rejects_missing_required_fields() {
        let svc = NoteService::new(Arc::new(InMemoryNotes::default()));

        let mut missing = draft();
        missing.phone = "  ".into();

        let err = svc.create(missing).unwrap_err();
        assert!(matches!(
            err,
            NoteError::Validation(ValidationError::MissingField("phone"))
        ));
    }

    #[test]
    fn meeting_fields_pass_through_unvalidated() {
        let svc = NoteService::new(Arc::new(InMemoryNotes::default()));

        let mut d = draft();
        d.meeting_date = Some("2025-06-10".into());
        d.meeting_timezone = Some("America/New_York".into());

        let note = svc.create(d).unwrap();
        assert_eq!(note.meeting_date.as_deref(), Some("2025-06-10"));
    }

    #[test]
    fn crud_round_trip() {
        let svc = NoteService::new(Arc::new(InMemoryNotes::default()));

        let created = svc.create(draft()).unwrap();
        assert_eq!(svc.get_by_id(created.id).unwrap(), created);

        let mut changed = draft();
        changed.title = "Follow up done".into();
        let updated = svc.update(created.id, changed).unwrap();
        assert_eq!(updated.title, "Follow up done");
        assert_eq!(updated.id, created.id);

        let deleted = svc.delete(created.id).unwrap();
        assert_eq!(deleted.id, created.id);

        assert!(matches!(
            svc.get_by_id(created.id).unwrap_err(),
            NoteError::NotFound(_)
        ));
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let svc = NoteService::new(Arc::new(InMemoryNotes::default()));

        let err = svc.update(Uuid::new_v4(), draft()).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
    }

    #[test]
    fn listing_is_newest_first() {
        let svc = NoteService::new(Arc::new(InMemoryNotes::default()));

        svc.create(draft()).unwrap();
        let mut second = draft();
        second.title = "Second".into();
        svc.create(second).unwrap();

        let all = svc.get_all().unwrap();
        assert_eq!(all[0].title, "Second");
    }
}
