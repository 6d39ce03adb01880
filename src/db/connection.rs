//! # MySQL Connection Pool Factory
//!
//! Builds a fresh [`mysql::Pool`] from a [`DbConfig`]. The pool is not
//! cached globally; the composition root creates it once and hands it to
//! the adapters that need it, which keeps test setups free to build
//! their own.

use crate::config::db::{create_pool, DbConfig, DbPool};

/// Creates a new MySQL connection pool using the given configuration.
///
/// # Panics
/// Panics if the pool cannot be created (missing or invalid
/// `DATABASE_URL`). A booking backend without its store is
/// misconfigured, so failing at startup is the right behavior.
pub fn get_pool(cfg: &DbConfig) -> DbPool {
    create_pool(cfg).expect("failed to initialize MySQL connection pool")
}
