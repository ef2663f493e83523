use crate::commands::{CmdMessage, CmdResult, NewRecord};
use crate::error::{AdrError, Result};
use crate::identity::default_author;
use crate::model::RecordDraft;
use crate::store::RecordStore;

pub fn run(store: &RecordStore, title: &str, new: NewRecord) -> Result<CmdResult> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AdrError::Api("Record title cannot be empty".to_string()));
    }

    let draft = RecordDraft {
        author: new
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(default_author),
        status: new.status.unwrap_or_default(),
        tags: new.tags.into_iter().collect(),
        superseders: new.superseders.into_iter().collect(),
    };
    let record = store.create(title, draft)?;
    let path = store.path_of(&record);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record created ({}): {}",
        record.id, record.name
    )));
    Ok(result
        .with_affected_records(vec![record])
        .with_paths(vec![path]))
}
