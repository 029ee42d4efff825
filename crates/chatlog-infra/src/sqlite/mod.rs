//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod attachment;
pub mod conversation;
pub mod message;
pub mod pool;

use chrono::{DateTime, Utc};

use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;
use chatlog_types::timestamp;

fn parse_id(raw: &str, field: &str) -> Result<RecordId, RepositoryError> {
    RecordId::parse(raw).map_err(|e| RepositoryError::Query(format!("invalid {field}: {e}")))
}

fn parse_optional_id(raw: Option<&str>, field: &str) -> Result<Option<RecordId>, RepositoryError> {
    raw.map(|s| parse_id(s, field)).transpose()
}

fn read_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(timestamp::parse_lenient)
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}
