//! # Command Layer
//!
//! The business logic of adr. Each command lives in its own submodule as a
//! plain `run` function over a [`RecordStore`](crate::store::RecordStore).
//!
//! Commands never print, prompt or exit. They return a [`CmdResult`] carrying
//! the records they touched or listed, the paths they wrote and leveled
//! messages; the UI layer decides how to render them.
//!
//! - [`init`]: create the records directory and the config file
//! - [`create`]: write a new record
//! - [`list`]: filter records
//! - [`update`]: change the metadata of a record

use serde::Serialize;
use std::path::PathBuf;

use crate::model::{Record, Status};

pub mod create;
pub mod init;
pub mod list;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records written by the command, as written.
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }
}

/// Options of `create`. Unset values get defaults: the author comes from
/// [`crate::identity`], the status is `accepted`.
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub author: Option<String>,
    pub status: Option<Status>,
    pub tags: Vec<String>,
    pub superseders: Vec<String>,
}

/// Changes applied by `update`. `tags` and `superseders` replace the whole
/// set; the `add_`/`remove_` lists are applied after, in that order.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub author: Option<String>,
    pub status: Option<Status>,
    pub tags: Option<Vec<String>>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
    pub superseders: Option<Vec<String>>,
    pub add_superseders: Vec<String>,
    pub remove_superseders: Vec<String>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
            && self.superseders.is_none()
            && self.add_superseders.is_empty()
            && self.remove_superseders.is_empty()
    }

    pub fn apply(&self, record: &mut Record) {
        if let Some(author) = &self.author {
            record.author = author.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(tags) = &self.tags {
            record.tags.set(tags.iter().cloned());
        }
        record.tags.append(self.add_tags.iter().cloned());
        record.tags.remove(&self.remove_tags);
        if let Some(superseders) = &self.superseders {
            record.superseders.set(superseders.iter().cloned());
        }
        record.superseders.append(self.add_superseders.iter().cloned());
        record.superseders.remove(&self.remove_superseders);
    }
}
