use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::store::RecordStore;

pub fn run(store: &RecordStore, filter: &RecordFilter) -> Result<CmdResult> {
    let records = filter.apply(store.list());
    Ok(CmdResult::default().with_listed_records(records))
}
