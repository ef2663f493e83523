//! # API Facade
//!
//! The single entry point for adr operations, whatever the UI. [`AdrApi`]
//! owns a [`RecordStore`] snapshot and dispatches to the command functions;
//! it holds no business logic and does no I/O of its own.
//!
//! `init` runs before any store exists, so it is the free function
//! [`init_project`].

use std::path::Path;

use crate::commands::{self, CmdResult, NewRecord, RecordUpdate};
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::indexer::SkippedFile;
use crate::store::RecordStore;

pub struct AdrApi {
    store: RecordStore,
}

impl AdrApi {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records_dir(&self) -> &Path {
        self.store.dir()
    }

    pub fn skipped_files(&self) -> &[SkippedFile] {
        self.store.skipped()
    }

    pub fn create_record(&self, title: &str, new: NewRecord) -> Result<CmdResult> {
        commands::create::run(&self.store, title, new)
    }

    pub fn list_records(&self, filter: &RecordFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn update_record(&self, id: &str, update: &RecordUpdate) -> Result<CmdResult> {
        commands::update::run(&self.store, id, update)
    }
}

pub fn init_project(cwd: &Path, directory: &Path) -> Result<CmdResult> {
    commands::init::run(cwd, directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::test_utils::TestEnv;

    #[test]
    fn dispatches_to_commands() {
        let env = TestEnv::new();
        let api = AdrApi::new(env.store());
        assert_eq!(api.records_dir(), env.root.as_path());

        let created = api
            .create_record(
                "Pick a queue",
                NewRecord {
                    author: Some("Jane".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        let id = created.affected_records[0].id.clone();

        let api = AdrApi::new(env.store());
        let listed = api.list_records(&RecordFilter::default()).unwrap();
        assert_eq!(listed.listed_records.len(), 1);

        let update = RecordUpdate {
            status: Some(Status::Superseded),
            superseders: Some(vec!["other".into()]),
            ..Default::default()
        };
        let updated = api.update_record(&id, &update).unwrap();
        assert_eq!(updated.affected_records[0].status, Status::Superseded);
        assert!(api.skipped_files().is_empty());
    }
}
