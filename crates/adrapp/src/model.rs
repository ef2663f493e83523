//! # Domain Model
//!
//! A [`Record`] is one decision record: the metadata carried by the header of
//! a record file plus the two values derived from the filesystem, the file
//! `name` and the opaque `body`.
//!
//! ## On-Disk Layout
//!
//! ```text
//! 007_use_postgres.md
//! ---                                   <-- header opens
//! id: f3Xk9_a2Lq
//! title: use_postgres
//! author: Jane Doe
//! status: accepted
//! creation_date: 2024-03-02T10:00:00Z
//! last_update_date: 2024-03-02T10:00:00Z
//! tags:
//!   - storage
//! ---                                   <-- header closes
//!
//! # Use Postgres                        <-- body, kept byte for byte
//! ```
//!
//! The header is handled by [`crate::header`], the `NNN_` filename prefix by
//! [`crate::ident`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::AdrError;
use crate::tagset::TagSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unknown,
    Proposed,
    Accepted,
    Deprecated,
    Superseded,
    Observed,
}

impl Default for Status {
    fn default() -> Self {
        Self::Accepted
    }
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Unknown,
        Status::Proposed,
        Status::Accepted,
        Status::Deprecated,
        Status::Superseded,
        Status::Observed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::Proposed => "proposed",
            Status::Accepted => "accepted",
            Status::Deprecated => "deprecated",
            Status::Superseded => "superseded",
            Status::Observed => "observed",
        }
    }

    /// One-line explanation, used for help text and shell completion.
    pub fn description(&self) -> &'static str {
        match self {
            Status::Unknown => "status is not determined",
            Status::Proposed => "the record has been proposed but is not accepted yet by stakeholders",
            Status::Accepted => "the record has been accepted by stakeholders",
            Status::Deprecated => "the decision record is deprecated and no longer applies",
            Status::Superseded => "the decision record has been superseded by a new one",
            Status::Observed => "the decision was observed after the fact",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = AdrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AdrError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: Status,
    pub creation_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
    pub tags: TagSet,
    pub superseders: TagSet,

    /// File name inside the records directory, e.g. `007_use_postgres.md`.
    pub name: String,
    #[serde(skip)]
    pub body: String,
}

/// Values a caller may choose when creating a record. Everything else
/// (id, slug, name, dates) is minted by the store.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub author: String,
    pub status: Status,
    pub tags: TagSet,
    pub superseders: TagSet,
}
