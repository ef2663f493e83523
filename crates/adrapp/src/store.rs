//! # Record Store
//!
//! [`RecordStore`] is an in-memory snapshot of a records directory taken when
//! it is opened, plus the two write paths.
//!
//! - **Create** renders the whole file in memory and writes it with
//!   create-new semantics: an existing file is never overwritten.
//! - **Update** rewrites a record through a temporary file in the same
//!   directory followed by a rename, so a failed write leaves the previous
//!   file in place.
//!
//! Neither write touches the snapshot; reopen the store to see the new state.
//! Writes are not protected against other processes editing the directory.

use chrono::{DateTime, SubsecRound, Utc};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{AdrError, Result};
use crate::header;
use crate::ident;
use crate::indexer::{Indexer, SkippedFile};
use crate::model::{Record, RecordDraft};
use crate::templates;

const UNTITLED_SLUG: &str = "untitled";

#[derive(Debug)]
pub struct RecordStore {
    dir: PathBuf,
    records: HashMap<String, Record>,
    order: Vec<String>,
    skipped: Vec<SkippedFile>,
}

impl RecordStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(dir, &Indexer::new())
    }

    pub fn open_with(dir: impl Into<PathBuf>, indexer: &Indexer) -> Result<Self> {
        let dir = dir.into();
        let report = indexer.run(&dir)?;

        let mut records = HashMap::with_capacity(report.records.len());
        let mut order = Vec::with_capacity(report.records.len());
        let mut skipped = report.skipped;

        for record in report.records {
            if let Some(first) = records.get(&record.id).map(|r: &Record| r.name.clone()) {
                tracing::warn!(file = %record.name, id = %record.id, "duplicate record id, already used by {first}");
                skipped.push(SkippedFile {
                    reason: format!("duplicate id {}, already used by {first}", record.id),
                    name: record.name,
                });
                continue;
            }
            order.push(record.id.clone());
            records.insert(record.id.clone(), record);
        }
        skipped.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            dir,
            records,
            order,
            skipped,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Record> {
        self.get(id)
            .ok_or_else(|| AdrError::RecordNotFound(id.to_string()))
    }

    /// All records, ascending by file name.
    pub fn list(&self) -> Vec<Record> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Files the snapshot left out, with the reason.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn path_of(&self, record: &Record) -> PathBuf {
        self.dir.join(&record.name)
    }

    /// Sequence number for the next record. Skipped files count too, so a
    /// broken `004_x.md` still reserves number 4.
    pub fn next_sequence(&self) -> u32 {
        let names = self
            .records
            .values()
            .map(|r| r.name.as_str())
            .chain(self.skipped.iter().map(|s| s.name.as_str()));
        ident::next_sequence(names)
    }

    fn unused_id(&self) -> String {
        loop {
            let id = ident::generate_id();
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }

    /// Writes a new record file for `title` and returns the record as
    /// written, body included.
    pub fn create(&self, title: &str, draft: RecordDraft) -> Result<Record> {
        let now = now();
        let slug = match ident::slugify(title) {
            slug if slug.is_empty() => UNTITLED_SLUG.to_string(),
            slug => slug,
        };
        let name = ident::record_file_name(self.next_sequence(), &slug);

        let mut record = Record {
            id: self.unused_id(),
            title: slug,
            author: draft.author,
            status: draft.status,
            creation_date: now,
            last_update_date: now,
            tags: draft.tags,
            superseders: draft.superseders,
            name,
            body: String::new(),
        };

        let content = templates::render_create(
            &header::encode(&record),
            &ident::title_case(title),
            record.status,
            now,
        )?;
        record.body = header::split(&content)?.1.to_string();

        let path = self.path_of(&record);
        write_new(&path, &content)?;
        tracing::debug!(path = %path.display(), id = %record.id, "created record");
        Ok(record)
    }

    /// Rewrites `record` with a fresh `last_update_date` and returns it as
    /// written. The body goes back unchanged.
    pub fn update(&self, record: &Record) -> Result<Record> {
        let mut updated = record.clone();
        updated.last_update_date = now();

        let content = templates::render_update(&header::encode(&updated), &updated.body)?;
        let path = self.path_of(&updated);
        write_atomic(&self.dir, &path, &content)?;
        tracing::debug!(path = %path.display(), id = %updated.id, "updated record");
        Ok(updated)
    }
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    let write_err = |source: std::io::Error| AdrError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(write_err)?;
    if let Err(source) = file.write_all(content.as_bytes()) {
        drop(file);
        // the file is ours since create_new succeeded
        let _ = fs::remove_file(path);
        return Err(write_err(source));
    }
    Ok(())
}

/// Replaces `path` through a temporary file in `dir`, keeping the
/// permissions of the file being replaced.
fn write_atomic(dir: &Path, path: &Path, content: &str) -> Result<()> {
    let tmp_path = dir.join(format!(".adr-{}.tmp", Uuid::new_v4()));
    let written = fs::write(&tmp_path, content)
        .and_then(|_| match fs::metadata(path) {
            Ok(meta) => fs::set_permissions(&tmp_path, meta.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        })
        .and_then(|_| fs::rename(&tmp_path, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(AdrError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use tempfile::tempdir;

    fn draft() -> RecordDraft {
        RecordDraft {
            author: "Jane".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_in_empty_directory() {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.next_sequence(), 1);

        let record = store.create("My Decision", draft()).unwrap();
        assert_eq!(record.name, "001_my_decision.md");
        assert_eq!(record.title, "my_decision");
        assert_eq!(record.status, Status::Accepted);
        assert_eq!(record.creation_date, record.last_update_date);
        assert!(dir.path().join("001_my_decision.md").is_file());

        // the snapshot is unchanged until reopened
        assert!(store.get(&record.id).is_none());

        let reopened = RecordStore::open(dir.path()).unwrap();
        assert_eq!(reopened.require(&record.id).unwrap(), &record);
        assert_eq!(reopened.next_sequence(), 2);
    }

    #[test]
    fn create_renders_the_human_title() {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        let record = store.create("use POSTGRES", draft()).unwrap();
        let text = fs::read_to_string(store.path_of(&record)).unwrap();
        assert!(text.contains("\n# Use Postgres\n"));
        assert!(record.body.starts_with("\n# Use Postgres\n"));
    }

    #[test]
    fn create_with_unsluggable_title() {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        let record = store.create("???", draft()).unwrap();
        assert_eq!(record.name, "001_untitled.md");
    }

    #[test]
    fn create_never_overwrites() {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("001_taken.md"), "precious").unwrap();

        let err = store.create("taken", draft()).unwrap_err();
        assert!(matches!(err, AdrError::Write { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("001_taken.md")).unwrap(),
            "precious"
        );
    }

    #[test]
    fn skipped_files_reserve_their_number() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("001_a.md"), "---\nid: a\n---\n").unwrap();
        fs::write(dir.path().join("004_broken.md"), "no header").unwrap();

        let store = RecordStore::open(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.skipped().len(), 1);
        assert_eq!(store.next_sequence(), 5);
    }

    #[test]
    fn numbering_continues_past_three_digits() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("999_a.md"), "---\nid: a\n---\n").unwrap();
        fs::write(dir.path().join("1000_b.md"), "---\nid: b\n---\n").unwrap();

        let store = RecordStore::open(dir.path()).unwrap();
        assert_eq!(store.next_sequence(), 1001);
        let record = store.create("next", draft()).unwrap();
        assert_eq!(record.name, "1001_next.md");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_left_alone() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let raw = OsStr::from_bytes(b"001_caf\xE9.md");
        fs::write(dir.path().join(raw), "---\nid: cafe\n---\n").unwrap();

        let store = RecordStore::open(dir.path()).unwrap();
        assert!(store.get("cafe").is_none());
        assert_eq!(store.skipped().len(), 1);
        assert_eq!(store.next_sequence(), 2);

        store.create("other", draft()).unwrap();
        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        names.sort();
        assert_eq!(names, vec![raw.to_os_string(), "002_other.md".into()]);
    }

    #[test]
    fn duplicate_ids_keep_the_first_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("001_a.md"), "---\nid: same\n---\n").unwrap();
        fs::write(dir.path().join("002_b.md"), "---\nid: same\n---\n").unwrap();

        let store = RecordStore::open(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.require("same").unwrap().name, "001_a.md");
        assert_eq!(store.skipped()[0].name, "002_b.md");
    }

    #[test]
    fn require_unknown_id() {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.require("nope"),
            Err(AdrError::RecordNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn update_rewrites_header_and_keeps_body() {
        let dir = tempdir().unwrap();
        let text = "---\nid: a\ntitle: a\nstatus: proposed\ncreation_date: 2020-01-01T00:00:00Z\nlast_update_date: 2020-01-01T00:00:00Z\n---\n\n# A\n\nkeep   me\n\n";
        fs::write(dir.path().join("001_a.md"), text).unwrap();

        let store = RecordStore::open(dir.path()).unwrap();
        let mut record = store.require("a").unwrap().clone();
        record.status = Status::Deprecated;
        let written = store.update(&record).unwrap();

        assert!(written.last_update_date > record.last_update_date);
        assert_eq!(written.creation_date, record.creation_date);

        let reopened = RecordStore::open(dir.path()).unwrap();
        let read_back = reopened.require("a").unwrap();
        assert_eq!(read_back, &written);
        assert_eq!(read_back.body, "\n# A\n\nkeep   me\n\n");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn update_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("001_a.md");
        fs::write(&path, "---\nid: a\n---\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        let store = RecordStore::open(dir.path()).unwrap();
        let record = store.require("a").unwrap().clone();
        store.update(&record).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn update_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let records = dir.path().join("records");
        fs::create_dir(&records).unwrap();
        fs::write(records.join("001_a.md"), "---\nid: a\n---\n").unwrap();

        let store = RecordStore::open(&records).unwrap();
        let record = store.require("a").unwrap().clone();
        fs::remove_dir_all(&records).unwrap();

        assert!(matches!(store.update(&record), Err(AdrError::Write { .. })));
    }
}
