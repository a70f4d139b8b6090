//! Record store queries
//!
//! Reads take the pool; writes take a connection so callers can group them
//! into one transaction.

pub mod report_master;
pub mod settings;
pub mod tasks;

use apr_common::{Error, Result};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

/// Open a transaction that takes the write lock up front
///
/// A deferred transaction that reads before writing cannot wait on a
/// concurrent writer; SQLite reports SQLITE_BUSY at the upgrade instead.
pub async fn begin_immediate(db: &SqlitePool) -> Result<Transaction<'static, Sqlite>> {
    Ok(db.begin_with("BEGIN IMMEDIATE").await?)
}

/// Parse a TEXT uuid column
pub(crate) fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Internal(format!("Invalid uuid '{}': {}", value, e)))
}
