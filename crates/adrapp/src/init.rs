//! # Context Initialization
//!
//! Every command but `init` needs a records directory. [`initialize`] finds
//! it and opens the store:
//!
//! 1. If `dir_override` is given (the CLI `--dir` flag), it is used as the
//!    records directory directly and config discovery is skipped. A relative
//!    override is resolved against `cwd`.
//! 2. Otherwise the closest `.adrrc.yml` in `cwd` or its ancestors decides,
//!    see [`crate::config`].
//!
//! Either way the directory must exist.

use std::path::{Path, PathBuf};

use crate::api::AdrApi;
use crate::config::resolve_records_dir;
use crate::error::Result;
use crate::store::RecordStore;

pub struct AdrContext {
    pub api: AdrApi,
    pub records_dir: PathBuf,
}

pub fn initialize(cwd: &Path, dir_override: Option<PathBuf>) -> Result<AdrContext> {
    let records_dir = match dir_override {
        Some(dir) => cwd.join(dir),
        None => resolve_records_dir(cwd)?,
    };
    let store = RecordStore::open(&records_dir)?;
    Ok(AdrContext {
        api: AdrApi::new(store),
        records_dir,
    })
}
