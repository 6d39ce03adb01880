//! Note records.
//!
//! Notes are lightweight contact/inquiry entries. They may carry
//! tentative meeting-scheduling fields so an inquiry can later be
//! promoted to a reservation, but nothing here is uniqueness-checked.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub email: String,
    pub phone: String,
    /// Tentative meeting date in the requester's timezone, if any.
    pub meeting_date: Option<String>,
    /// Tentative meeting time in the requester's timezone, if any.
    pub meeting_time: Option<String>,
    pub meeting_timezone: Option<String>,
    /// Tentative slot time already expressed in Bulgarian time, if any.
    pub slot_time: Option<String>,
    pub created_at: NaiveDateTime,
}

/// An inbound note, before validation. Doubles as the full field set for
/// inserts and full-field updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub meeting_date: Option<String>,
    #[serde(default)]
    pub meeting_time: Option<String>,
    #[serde(default)]
    pub meeting_timezone: Option<String>,
    #[serde(default)]
    pub slot_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_deserializes_with_optional_meeting_fields_absent() {
        let draft: NoteDraft = serde_json::from_str(
            r#"{"title":"Call back","content":"Asked about pricing","email":"x@y.co","phone":"+359888123456"}"#,
        )
        .unwrap();

        assert_eq!(draft.title, "Call back");
        assert!(draft.meeting_date.is_none());
        assert!(draft.slot_time.is_none());
    }

    #[test]
    fn draft_deserializes_with_meeting_fields_present() {
        let draft: NoteDraft = serde_json::from_str(
            r#"{"title":"t","content":"c","email":"x@y.co","phone":"1",
                "meeting_date":"2025-06-10","meeting_time":"10:00",
                "meeting_timezone":"America/New_York","slot_time":"17:00"}"#,
        )
        .unwrap();

        assert_eq!(draft.meeting_date.as_deref(), Some("2025-06-10"));
        assert_eq!(draft.slot_time.as_deref(), Some("17:00"));
    }
}
