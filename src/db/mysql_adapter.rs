//! # MySQL Database Adapter
//!
//! An implementation of the [`Db`] port using the [`mysql`] driver crate.
//!
//! ## Responsibilities
//! - Convert generic [`Param`] values into [`mysql::Value`]
//! - Convert [`mysql::Row`] into a generic [`Row`]
//! - Implement `fetch_one`, `fetch_all`, and `exec` over `mysql::Pool`
//! - Map server error 1062 (`ER_DUP_ENTRY`) onto [`DuplicateKey`], the
//!   signal the booking layer relies on to detect a lost slot race
//!
//! ## Testing Policy
//! - Unit tests cover the pure conversion functions and the
//!   duplicate-key classification.
//! - Query execution against a real server belongs to integration
//!   tests with a provisioned database.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use mysql::{prelude::*, Error as MyError, Params, Pool, Value as My};
use tracing::{debug, error};

use crate::db::port::{Db, DuplicateKey, Param, Row as GRow, Value};

/// MySQL server error code for a unique-index violation.
const ER_DUP_ENTRY: u16 = 1062;

#[inline]
fn mysql_err_summary(e: &MyError) -> String {
    match e {
        MyError::MySqlError(me) => format!(
            "code={}, state={}, message={}",
            me.code, me.state, me.message
        ),
        MyError::DriverError(de) => format!("driver={de:?}"),
        MyError::UrlError(ue) => format!("url={ue:?}"),
        MyError::IoError(ioe) => format!("io={ioe}"),
        MyError::CodecError(ce) => format!("codec={ce:?}"),
        MyError::FromValueError(fve) => format!("from_value={fve:?}"),
        MyError::FromRowError(fre) => format!("from_row={fre:?}"),
    }
}

/// Wraps a driver error, promoting `ER_DUP_ENTRY` to a typed
/// [`DuplicateKey`] so callers can downcast.
fn classify_write_error(e: MyError) -> anyhow::Error {
    if let MyError::MySqlError(ref me) = e {
        if me.code == ER_DUP_ENTRY {
            return anyhow::Error::new(DuplicateKey(me.message.clone()));
        }
    }
    anyhow::Error::new(e)
}

/// MySQL implementation of the [`Db`] port.
///
/// - Wraps a connection pool (`mysql::Pool`) for query execution.
/// - Propagates errors as [`anyhow::Error`].
#[derive(Clone)]
pub struct MySqlDb {
    pool: Arc<Pool>,
}

impl MySqlDb {
    /// Creates a new adapter instance using the provided connection pool.
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Converts a single [`Param`] into a [`mysql::Value`].
    ///
    /// Mapping conventions:
    /// - `Bool(true)` → `Int(1)` / `Bool(false)` → `Int(0)`
    /// - `Str` → `Bytes`
    /// - `DateTime` → `Value::Date` (Y, M, D, H, M, S, μs)
    /// - `Null` → `NULL`
    #[inline]
    fn to_mysql_value(p: &Param) -> My {
        match p {
            Param::I64(x) => My::Int(*x),
            Param::U64(x) => My::UInt(*x),
            Param::Bool(b) => My::Int(if *b { 1 } else { 0 }),
            Param::Str(s) => My::Bytes(s.as_bytes().to_vec()),
            Param::DateTime(dt) => {
                let d = dt.date();
                let t = dt.time();
                My::Date(
                    d.year() as u16,
                    d.month() as u8,
                    d.day() as u8,
                    t.hour() as u8,
                    t.minute() as u8,
                    t.second() as u8,
                    t.nanosecond() / 1_000, // μs
                )
            }
            Param::Null => My::NULL,
        }
    }

    /// Converts a slice of [`Param`] into a positional [`Params`].
    #[inline]
    fn to_mysql_params(params_in: &[Param]) -> Params {
        let v: Vec<My> = params_in.iter().map(Self::to_mysql_value).collect();
        Params::Positional(v)
    }

    /// Converts a [`mysql::Row`] into a generic [`Row`].
    ///
    /// Reservation and note columns are CHAR/TEXT and DATETIME, so
    /// anything exotic (floats, TIME intervals) is stringified rather
    /// than extending [`Value`].
    fn row_from_mysql(mut r: mysql::Row) -> GRow {
        // Copy column names first; taking values borrows mutably.
        let names: Vec<String> = r
            .columns_ref()
            .iter()
            .map(|c| c.name_str().to_string())
            .collect();

        let mut out = GRow::default();
        for (idx, name) in names.into_iter().enumerate() {
            let v = r
                .take_opt::<My, _>(idx)
                .unwrap_or(Ok(My::NULL))
                .unwrap_or(My::NULL);

            let vv = match v {
                My::NULL => Value::Null,
                My::Int(i) => Value::I64(i),
                My::UInt(u) => Value::U64(u),

                My::Float(f) => Value::Str(f.to_string()),
                My::Double(f) => Value::Str(f.to_string()),

                // CHAR/VARCHAR/TEXT
                My::Bytes(b) => match String::from_utf8(b) {
                    Ok(s) => Value::Str(s),
                    Err(e) => Value::Str(String::from_utf8_lossy(e.as_bytes()).into_owned()),
                },

                // DATE/DATETIME → NaiveDateTime
                My::Date(y, m, d, hh, mm, ss, _micro) => {
                    let date = NaiveDate::from_ymd_opt(y as i32, m as u32, d as u32)
                        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
                    let time = NaiveTime::from_hms_opt(hh as u32, mm as u32, ss as u32)
                        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
                    Value::DateTime(NaiveDateTime::new(date, time))
                }

                // TIME intervals (signed days/h/m/s.μ) → stringified
                My::Time(neg, days, hh, mm, ss, micro) => {
                    let sign = if neg { "-" } else { "" };
                    let s = if micro > 0 {
                        format!("{sign}{days:03} {hh:02}:{mm:02}:{ss:02}.{micro:06}")
                    } else {
                        format!("{sign}{days:03} {hh:02}:{mm:02}:{ss:02}")
                    };
                    Value::Str(s)
                }
            };

            out.insert(name, vv);
        }
        out
    }
}

impl Db for MySqlDb {
    fn fetch_one(&self, sql: &str, params_in: &[Param]) -> Result<Option<GRow>> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        debug!(sql, params = ?params_in, "fetch_one");

        let res: std::result::Result<Option<mysql::Row>, MyError> = conn.exec_first(sql, params);
        if let Err(ref e) = res {
            error!(sql, "exec_first failed: {}", mysql_err_summary(e));
        }
        let row_opt = res.context("exec_first failed")?;
        debug!(row_present = row_opt.is_some(), "fetch_one done");

        Ok(row_opt.map(Self::row_from_mysql))
    }

    fn fetch_all(&self, sql: &str, params_in: &[Param]) -> Result<Vec<GRow>> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        debug!(sql, params = ?params_in, "fetch_all");

        let res: std::result::Result<Vec<mysql::Row>, MyError> = conn.exec(sql, params);
        if let Err(ref e) = res {
            error!(sql, "exec (fetch_all) failed: {}", mysql_err_summary(e));
        }
        let rows = res.context("exec (fetch_all) failed")?;
        debug!(rows = rows.len(), "fetch_all done");

        Ok(rows.into_iter().map(Self::row_from_mysql).collect())
    }

    fn exec(&self, sql: &str, params_in: &[Param]) -> Result<u64> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        debug!(sql, params = ?params_in, "exec");

        if let Err(e) = conn.exec_drop(sql, params) {
            // Duplicate entries are an expected outcome on the booking
            // path, not an operational error.
            if !matches!(&e, MyError::MySqlError(me) if me.code == ER_DUP_ENTRY) {
                error!(sql, "exec_drop failed: {}", mysql_err_summary(&e));
            }
            return Err(classify_write_error(e));
        }

        let n = conn.affected_rows();
        debug!(affected_rows = n, "exec done");
        Ok(n)
    }
}
