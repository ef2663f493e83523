//! # Directory Indexer
//!
//! Loads every record file of a directory into memory.
//!
//! ## Fan-Out / Fan-In
//!
//! ```text
//!   read_dir ──> file list ──> rayon pool (max_workers threads) ──> par_iter ──┐
//!                                                                              │ (name, Result<Record>)
//!   sort by name <── partition into records / skipped <── collect ─────────────┘
//! ```
//!
//! - Files are parsed on a dedicated rayon pool of [`MAX_CONCURRENT_PARSES`]
//!   threads, so at most that many files are read and parsed at once.
//! - Each parse returns its result; nothing is shared between workers but the
//!   concurrency counters.
//! - Completion order is arbitrary, the report is sorted by file name.
//!
//! ## Failures
//!
//! A file that cannot be read or parsed is logged with `tracing::warn!`,
//! listed in [`IndexReport::skipped`] and left out. So is a file whose name is
//! not valid UTF-8, since it could not be written back under the same name.
//! The scan as a whole only fails when the directory itself is missing or
//! unreadable.
//!
//! Cancelling the [`CancelToken`] makes files not yet started skip; parses
//! already running finish normally.
//!
//! Subdirectories and dotfiles are ignored. Dotfiles cover the config file
//! when it sits in the records directory, and the temporary files of an
//! interrupted update.

use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{AdrError, Result};
use crate::header;
use crate::model::Record;

/// How many record files the indexer parses concurrently by default.
pub const MAX_CONCURRENT_PARSES: usize = 10;

const NON_UTF8_NAME: &str = "file name is not valid UTF-8";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct IndexReport {
    /// Parsed records, ascending by file name.
    pub records: Vec<Record>,
    /// Files left out, ascending by file name.
    pub skipped: Vec<SkippedFile>,
    /// Highest number of files parsed at the same time during this scan.
    pub peak_concurrency: usize,
}

/// Shared flag that stops a running scan from starting new parses.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Indexer {
    max_workers: usize,
    cancel: CancelToken,
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexer {
    pub fn new() -> Self {
        Self {
            max_workers: MAX_CONCURRENT_PARSES,
            cancel: CancelToken::new(),
        }
    }

    /// Parses at most `max_workers` files at once (at least one).
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn run(&self, dir: &Path) -> Result<IndexReport> {
        ensure_directory(dir)?;

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        let mut skipped = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.starts_with('.') => {}
                Ok(name) => files.push((name, entry.path())),
                Err(raw) => {
                    let name = raw.to_string_lossy().into_owned();
                    if name.starts_with('.') {
                        continue;
                    }
                    tracing::warn!(file = %name, "skipping record file: {NON_UTF8_NAME}");
                    skipped.push(SkippedFile {
                        name,
                        reason: NON_UTF8_NAME.to_string(),
                    });
                }
            }
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()?;

        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let cancel = &self.cancel;
        let parsed: Vec<(String, Result<Record>)> = pool.install(|| {
            files
                .into_par_iter()
                .map(|(name, path)| {
                    if cancel.is_cancelled() {
                        return (name, Err(AdrError::Cancelled));
                    }
                    let running = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(running, Ordering::SeqCst);

                    let result = parse_file(&name, &path);

                    active.fetch_sub(1, Ordering::SeqCst);
                    (name, result)
                })
                .collect()
        });

        let mut records = Vec::with_capacity(parsed.len());
        for (name, result) in parsed {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(file = %name, "skipping record file: {e}");
                    skipped.push(SkippedFile {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        skipped.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(
            dir = %dir.display(),
            records = records.len(),
            skipped = skipped.len(),
            "indexed records directory"
        );

        Ok(IndexReport {
            records,
            skipped,
            peak_concurrency: peak.into_inner(),
        })
    }
}

fn parse_file(name: &str, path: &Path) -> Result<Record> {
    let text = fs::read_to_string(path)?;
    header::parse_record(name, &text)
}

/// Scans `dir` with the default concurrency limit.
pub fn index_directory(dir: &Path) -> Result<IndexReport> {
    Indexer::new().run(dir)
}

/// `NotFound` when `path` does not exist, `NotADirectory` when it is not a
/// directory.
pub(crate) fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AdrError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AdrError::NotFound(path.to_path_buf())),
        Err(e) => Err(AdrError::Io(e)),
    }
}
