//! MySQL-backed implementation of [`ReservationStore`].
//!
//! Slot dates and times are stored as their canonical strings
//! (`YYYY-MM-DD`, `HH:MM`), which keeps the uniqueness key and range
//! queries trivially comparable; `UNIQUE KEY uniq_slot (slot_date,
//! slot_time)` in `schema.sql` is the authoritative double-booking
//! guard.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::booking::reservation::{NewReservation, Reservation};
use crate::booking::store::{ReservationStore, WriteError};
use crate::db::port::{Db, DuplicateKey, Param, Row};
use crate::params;

const COLS: &str = "id, client, content, email, client_date, client_time, \
                    client_timezone, slot_date, slot_time, created_at";

/// [`ReservationStore`] over the generic [`Db`] port.
pub struct SqlReservationStore {
    db: Arc<dyn Db>,
}

impl SqlReservationStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }

    fn from_row(row: &Row) -> Result<Reservation> {
        let id = Uuid::parse_str(&row.get_string("id")?).context("malformed reservation id")?;
        Ok(Reservation {
            id,
            client: row.get_string("client")?,
            content: row.get_string("content")?,
            email: row.get_string("email")?,
            client_date: row.get_string("client_date")?,
            client_time: row.get_string("client_time")?,
            client_timezone: row.get_string("client_timezone")?,
            slot_date: row.get_string("slot_date")?,
            slot_time: row.get_string("slot_time")?,
            created_at: row.get_datetime("created_at")?,
        })
    }

    fn classify(e: anyhow::Error) -> WriteError {
        if e.downcast_ref::<DuplicateKey>().is_some() {
            WriteError::DuplicateSlot
        } else {
            WriteError::Store(e)
        }
    }
}

impl ReservationStore for SqlReservationStore {
    fn find_by_slot(&self, slot_date: &str, slot_time: &str) -> Result<Option<Reservation>> {
        let sql =
            format!("SELECT {COLS} FROM reservations WHERE slot_date = ? AND slot_time = ?");
        let ps = params![slot_date, slot_time];
        let row = self.db.fetch_one(&sql, &ps)?;
        row.as_ref().map(Self::from_row).transpose()
    }

    fn find_in_slot_range(&self, from_date: &str, to_date: &str) -> Result<Vec<Reservation>> {
        let sql =
            format!("SELECT {COLS} FROM reservations WHERE slot_date BETWEEN ? AND ?");
        let ps = params![from_date, to_date];
        let rows = self.db.fetch_all(&sql, &ps)?;
        rows.iter().map(Self::from_row).collect()
    }

    fn insert(&self, record: NewReservation) -> Result<Reservation, WriteError> {
        let id = Uuid::new_v4();
        let id_text = id.to_string();
        let created_at = Utc::now().naive_utc();

        let sql = format!(
            "INSERT INTO reservations ({COLS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        let ps = params![
            &id_text,
            &record.client,
            &record.content,
            &record.email,
            &record.client_date,
            &record.client_time,
            &record.client_timezone,
            &record.slot_date,
            &record.slot_time,
            created_at,
        ];
        self.db.exec(&sql, &ps).map_err(Self::classify)?;

        Ok(Reservation {
            id,
            client: record.client,
            content: record.content,
            email: record.email,
            client_date: record.client_date,
            client_time: record.client_time,
            client_timezone: record.client_timezone,
            slot_date: record.slot_date,
            slot_time: record.slot_time,
            created_at,
        })
    }

    fn find_all(&self) -> Result<Vec<Reservation>> {
        let sql = format!("SELECT {COLS} FROM reservations ORDER BY created_at DESC");
        let rows = self.db.fetch_all(&sql, &[])?;
        rows.iter().map(Self::from_row).collect()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {COLS} FROM reservations WHERE id = ?");
        let id_text = id.to_string();
        let ps = params![&id_text];
        let row = self.db.fetch_one(&sql, &ps)?;
        row.as_ref().map(Self::from_row).transpose()
    }

    fn update(&self, id: Uuid, record: NewReservation) -> Result<Option<Reservation>, WriteError> {
        let sql = "UPDATE reservations SET client = ?, content = ?, email = ?, \
                   client_date = ?, client_time = ?, client_timezone = ?, \
                   slot_date = ?, slot_time = ? WHERE id = ?";
        let id_text = id.to_string();
        let ps = params![
            &record.client,
            &record.content,
            &record.email,
            &record.client_date,
            &record.client_time,
            &record.client_timezone,
            &record.slot_date,
            &record.slot_time,
            &id_text,
        ];
        self.db.exec(sql, &ps).map_err(Self::classify)?;

        self.find_by_id(id).map_err(WriteError::Store)
    }

    fn delete(&self, id: Uuid) -> Result<Option<Reservation>> {
        let Some(existing) = self.find_by_id(id)? else {
            return Ok(None);
        };
        let id_text = id.to_string();
        let ps = params![&id_text];
        self.db.exec("DELETE FROM reservations WHERE id = ?", &ps)?;
        Ok(Some(existing))
    }
}
