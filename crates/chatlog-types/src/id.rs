use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::ChatError;

/// Store-assigned identifier for any persisted record, wrapping a UUID v7
/// (time-sortable).
///
/// The canonical string form is the hyphenated lowercase UUID. Parsing any
/// other string fails with [`ChatError::Validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Create a new RecordId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a RecordId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the canonical string form, rejecting malformed input.
    pub fn parse(s: &str) -> Result<Self, ChatError> {
        s.parse()
    }

    /// Parse an optional identifier; `None` and empty strings stay `None`.
    pub fn parse_optional(s: Option<&str>) -> Result<Option<Self>, ChatError> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Self::parse(raw).map(Some),
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecordId {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ChatError::Validation(format!("invalid identifier: '{s}'")))
    }
}
