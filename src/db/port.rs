//! # Database Port (Synchronous)
//!
//! Defines the abstract database interface (`Db`) the reservation and
//! note stores are written against, plus the supporting types adapters
//! implement.
//!
//! - [`Param`]: positional SQL parameters.
//! - [`Value`] / [`Row`]: generic owned row representations.
//! - [`Db`]: minimal operations (`fetch_one`, `fetch_all`, `exec`, ...).
//! - [`DuplicateKey`]: typed marker for unique-index violations, so the
//!   booking layer can tell a lost slot race apart from a broken
//!   connection.
//!
//! # Example
//! ```rust,ignore
//! use avoex_booking::db::port::{Db, Param};
//! use avoex_booking::params;
//!
//! let ps = params!["2025-06-10", "14:30"];
//! let row = db.fetch_one(
//!     "SELECT * FROM reservations WHERE slot_date = ? AND slot_time = ?",
//!     &ps,
//! )?;
//! ```
use std::collections::HashMap;

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use thiserror::Error;

/// Reported (wrapped in `anyhow::Error`) when a write violates a unique
/// index, e.g. two reservations racing for the same `(slot_date,
/// slot_time)`. Callers can `downcast_ref::<DuplicateKey>()` to detect it.
#[derive(Debug, Error)]
#[error("duplicate key: {0}")]
pub struct DuplicateKey(pub String);

/// SQL parameter types passed to a query.
///
/// - `Str(&str)` holds a borrowed string reference.
/// - `Null` represents an SQL NULL.
/// - `DateTime` uses [`NaiveDateTime`] (no time zone; reservations store
///   their timezone semantics in dedicated columns).
#[derive(Debug)]
pub enum Param<'a> {
    I64(i64),
    U64(u64),
    Bool(bool),
    Str(&'a str),
    DateTime(NaiveDateTime),
    Null,
}

/// Generic owned database value used for row mapping.
#[derive(Debug, Clone)]
pub enum Value {
    I64(i64),
    U64(u64),
    Bool(bool),
    Str(String),
    DateTime(NaiveDateTime),
    Null,
}

/// Represents a single database row (column name → value map).
#[derive(Debug, Clone, Default)]
pub struct Row {
    cols: HashMap<String, Value>,
}

// ------------------------------
// Param conversions (From impls)
// ------------------------------

impl<'a> From<i64> for Param<'a> {
    fn from(x: i64) -> Self {
        Param::I64(x)
    }
}

impl<'a> From<u64> for Param<'a> {
    fn from(x: u64) -> Self {
        Param::U64(x)
    }
}

impl<'a> From<bool> for Param<'a> {
    fn from(x: bool) -> Self {
        Param::Bool(x)
    }
}

impl<'a> From<&'a str> for Param<'a> {
    fn from(x: &'a str) -> Self {
        Param::Str(x)
    }
}

impl<'a> From<&'a String> for Param<'a> {
    fn from(x: &'a String) -> Self {
        Param::Str(x.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Param<'a> {
    fn from(x: Option<&'a str>) -> Self {
        match x {
            Some(s) => Param::Str(s),
            None => Param::Null,
        }
    }
}

impl<'a> From<NaiveDateTime> for Param<'a> {
    fn from(x: NaiveDateTime) -> Self {
        Param::DateTime(x)
    }
}

// ------------------------------------
// params! macro
// ------------------------------------

/// Macro to build a `Vec<Param>` for SQL queries.
///
/// # Example
/// ```rust
/// use avoex_booking::db::port::Param;
/// use avoex_booking::params;
///
/// let slot_date = "2025-06-10";
/// let client_time: Option<&str> = None; // becomes NULL
///
/// let ps = params![slot_date, "14:30", client_time];
/// assert!(matches!(ps[0], Param::Str("2025-06-10")));
/// assert!(matches!(ps[1], Param::Str("14:30")));
/// assert!(matches!(ps[2], Param::Null));
/// ```
#[macro_export]
macro_rules! params {
    ($($x:expr),* $(,)?) => {{
       let mut v = Vec::<Param>::new();
       $( v.push(Param::from($x)); )*
          v
    }};
}

// ------------------------------
// Row helper methods
// ------------------------------

impl Row {
    /// Inserts a new column (used internally by DB adapters).
    pub fn insert(&mut self, key: impl Into<String>, val: Value) {
        self.cols.insert(key.into(), val);
    }

    /// Returns a `u64` (accepts non-negative `i64`).
    pub fn get_u64(&self, key: &str) -> Result<u64> {
        match self.cols.get(key) {
            Some(Value::U64(v)) => Ok(*v),
            Some(Value::I64(v)) if *v >= 0 => Ok(*v as u64),
            _ => bail!("column `{key}` is not U64"),
        }
    }

    /// Returns a `String` (only for `Value::Str`).
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(s.clone()),
            _ => bail!("column `{key}` is not String"),
        }
    }

    /// Returns a [`NaiveDateTime`].
    pub fn get_datetime(&self, key: &str) -> Result<NaiveDateTime> {
        match self.cols.get(key) {
            Some(Value::DateTime(dt)) => Ok(*dt),
            _ => bail!("column `{key}` is not DateTime"),
        }
    }

    /// Returns an optional `String` (`NULL` → `None`).
    pub fn get_string_opt(&self, key: &str) -> Result<Option<String>> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(Value::Null) => Ok(None),
            Some(_) => bail!("column `{key}` is not String/NULL"),
            None => bail!("column `{key}` not found"),
        }
    }
}

/// Database abstraction (synchronous).
///
/// The store implementations (`booking::sql_store`, `notes::sql_store`)
/// depend on this trait only, so tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait Db: Send + Sync + 'static {
    fn fetch_one<'a>(&self, sql: &str, params: &[Param<'a>]) -> Result<Option<Row>>;

    fn fetch_all<'a>(&self, sql: &str, params: &[Param<'a>]) -> Result<Vec<Row>>;

    /// Execute a write operation (`INSERT`, `UPDATE`, `DELETE`).
    ///
    /// Returns affected row count. A unique-index violation must be
    /// reported as an error wrapping [`DuplicateKey`].
    fn exec<'a>(&self, sql: &str, params: &[Param<'a>]) -> Result<u64>;
}
