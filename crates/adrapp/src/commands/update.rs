use crate::commands::{CmdMessage, CmdResult, RecordUpdate};
use crate::error::Result;
use crate::store::RecordStore;

pub fn run(store: &RecordStore, id: &str, update: &RecordUpdate) -> Result<CmdResult> {
    let mut record = store.require(id)?.clone();
    update.apply(&mut record);

    let record = store.update(&record)?;
    let path = store.path_of(&record);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record updated ({}): {}",
        record.id, record.name
    )));
    if update.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change, last update date refreshed"));
    }
    Ok(result
        .with_affected_records(vec![record])
        .with_paths(vec![path]))
}
