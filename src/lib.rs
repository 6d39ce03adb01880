//! # avoex_booking
//!
//! Backend core for the Avoex consultation booking system.
//!
//! This crate stores meeting reservations and notes, guards each timeslot
//! against double booking, and hands a confirmation email to an SMTP
//! collaborator after a successful booking. All reservations are stored
//! canonically in Bulgarian time (`Europe/Sofia`); clients submit their
//! desired date and time in their own IANA timezone and the crate performs
//! the conversion in both directions (`time::convert`).
//!
//! The HTTP layer is intentionally not part of this crate: a host server
//! wires [`booking::service::ReservationService`] and
//! [`notes::service::NoteService`] into its own routes.
//!
//! ## Example usage (in a host crate)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use avoex_booking::booking::service::ReservationService;
//! use avoex_booking::booking::sql_store::SqlReservationStore;
//! use avoex_booking::config::app::AppConfig;
//! use avoex_booking::db::{connection::get_pool, mysql_adapter::MySqlDb};
//! use avoex_booking::time::system_clock::SystemClock;
//!
//! let cfg = AppConfig::from_env();
//! let db = Arc::new(MySqlDb::new(get_pool(&cfg.db)));
//! let store = Arc::new(SqlReservationStore::new(db));
//! let service = ReservationService::new(store, Arc::new(SystemClock), None, &cfg.booking);
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use askama;
pub use chrono;
pub use chrono_tz;
pub use dotenvy;
pub use lettre;
pub use mysql;
pub use serde;
pub use serde_json;
pub use thiserror;
pub use tokio;
pub use tracing;
pub use uuid;

// ===============================
// Public modules
// ===============================
pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod notes;
pub mod notification;
pub mod time;
