//! MySQL-backed implementation of [`NoteStore`].

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::db::port::{Db, Param, Row};
use crate::notes::note::{Note, NoteDraft};
use crate::notes::store::NoteStore;
use crate::params;

const COLS: &str = "id, title, content, email, phone, meeting_date, meeting_time, \
                    meeting_timezone, slot_time, created_at";

/// [`NoteStore`] over the generic [`Db`] port.
pub struct SqlNoteStore {
    db: Arc<dyn Db>,
}

impl SqlNoteStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }

    fn from_row(row: &Row) -> Result<Note> {
        let id = Uuid::parse_str(&row.get_string("id")?).context("malformed note id")?;
        Ok(Note {
            id,
            title: row.get_string("title")?,
            content: row.get_string("content")?,
            email: row.get_string("email")?,
            phone: row.get_string("phone")?,
            meeting_date: row.get_string_opt("meeting_date")?,
            meeting_time: row.get_string_opt("meeting_time")?,
            meeting_timezone: row.get_string_opt("meeting_timezone")?,
            slot_time: row.get_string_opt("slot_time")?,
            created_at: row.get_datetime("created_at")?,
        })
    }
}

impl NoteStore for SqlNoteStore {
    fn insert(&self, record: NoteDraft) -> Result<Note> {
        let id = Uuid::new_v4();
        let id_text = id.to_string();
        let created_at = Utc::now().naive_utc();

        let sql = format!("INSERT INTO notes ({COLS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)");
        let ps = params![
            &id_text,
            &record.title,
            &record.content,
            &record.email,
            &record.phone,
            record.meeting_date.as_deref(),
            record.meeting_time.as_deref(),
            record.meeting_timezone.as_deref(),
            record.slot_time.as_deref(),
            created_at,
        ];
        self.db.exec(&sql, &ps)?;

        Ok(Note {
            id,
            title: record.title,
            content: record.content,
            email: record.email,
            phone: record.phone,
            meeting_date: record.meeting_date,
            meeting_time: record.meeting_time,
            meeting_timezone: record.meeting_timezone,
            slot_time: record.slot_time,
            created_at,
        })
    }

    fn find_all(&self) -> Result<Vec<Note>> {
        let sql = format!("SELECT {COLS} FROM notes ORDER BY created_at DESC");
        let rows = self.db.fetch_all(&sql, &[])?;
        rows.iter().map(Self::from_row).collect()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Note>> {
        let sql = format!("SELECT {COLS} FROM notes WHERE id = ?");
        let id_text = id.to_string();
        let ps = params![&id_text];
        let row = self.db.fetch_one(&sql, &ps)?;
        row.as_ref().map(Self::from_row).transpose()
    }

    fn update(&self, id: Uuid, record: NoteDraft) -> Result<Option<Note>> {
        let sql = "UPDATE notes SET title = ?, content = ?, email = ?, phone = ?, \
                   meeting_date = ?, meeting_time = ?, meeting_timezone = ?, \
                   slot_time = ? WHERE id = ?";
        let id_text = id.to_string();
        let ps = params![
            &record.title,
            &record.content,
            &record.email,
            &record.phone,
            record.meeting_date.as_deref(),
            record.meeting_time.as_deref(),
            record.meeting_timezone.as_deref(),
            record.slot_time.as_deref(),
            &id_text,
        ];
        self.db.exec(sql, &ps)?;

        self.find_by_id(id)
    }

    fn delete(&self, id: Uuid) -> Result<Option<Note>> {
        let Some(existing) = self.find_by_id(id)? else {
            return Ok(None);
        };
        let id_text = id.to_string();
        let ps = params![&id_text];
        self.db.exec("DELETE FROM notes WHERE id = ?", &ps)?;
        Ok(Some(existing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::db::port::{MockDb, Value};

    fn sample_row() -> Row {
        let mut row = Row::default();
        row.insert("id", Value::Str("5d1c2b3a-4e5f-6071-8293-a4b5c6d7e8f9".into()));
        row.insert("title", Value::Str("Call back".into()));
        row.insert("content", Value::Str("Asked about pricing".into()));
        row.insert("email", Value::Str("lead@example.com".into()));
        row.insert("phone", Value::Str("+359888123456".into()));
        row.insert("meeting_date", Value::Null);
        row.insert("meeting_time", Value::Null);
        row.insert("meeting_timezone", Value::Null);
        row.insert("slot_time", Value::Null);
        row.insert(
            "created_at",
            Value::DateTime(
                NaiveDate::from_ymd_opt(2025, 6, 1)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap(),
            ),
        );
        row
    }

    #[test]
    fn from_row_maps_nulls_to_none() {
        let note = SqlNoteStore::from_row(&sample_row()).unwrap();

        assert_eq!(note.title, "Call back");
        assert!(note.meeting_date.is_none());
        assert!(note.slot_time.is_none());
    }

    #[test]
    fn insert_writes_optional_fields_as_nulls() {
        let mut db = MockDb::new();
        db.expect_exec()
            .withf(|sql, ps| {
                sql.starts_with("INSERT INTO notes")
                    && ps.len() == 10
                    && matches!(ps[5], Param::Null)
                    && matches!(ps[8], Param::Null)
            })
            .returning(|_, _| Ok(1));

        let store = SqlNoteStore::new(Arc::new(db));
        let note = store
            .insert(NoteDraft {
                title: "Call back".into(),
                content: "Asked about pricing".into(),
                email: "lead@example.com".into(),
                phone: "+359888123456".into(),
                ..NoteDraft::default()
            })
            .unwrap();

        assert!(!note.id.is_nil());
        assert!(note.meeting_timezone.is_none());
    }

    #[test]
    fn find_all_orders_newest_first() {
        let mut db = MockDb::new();
        db.expect_fetch_all()
            .withf(|sql, _| sql.contains("ORDER BY created_at DESC"))
            .returning(|_, _| Ok(vec![sample_row()]));

        let store = SqlNoteStore::new(Arc::new(db));
        assert_eq!(store.find_all().unwrap().len(), 1);
    }
}
