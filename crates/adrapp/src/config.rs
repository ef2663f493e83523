//! # Configuration
//!
//! A project opts in with a `.adrrc.yml` file, written by `adr init`:
//!
//! ```yaml
//! directory: docs/adr
//! ```
//!
//! ## Discovery
//!
//! [`find_config_file`] walks from the working directory up to the filesystem
//! root and stops at the first `.adrrc.yml`, so commands work from any
//! subdirectory of the project. The innermost file wins.
//!
//! ## Resolution
//!
//! Values are loaded with [`confique`], in priority order:
//! 1. **Environment**: `ADR_DIRECTORY`.
//! 2. **File**: the discovered `.adrrc.yml`.
//!
//! A relative `directory` is resolved against the directory holding the config
//! file, not the working directory.

use confique::Config;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AdrError, Result};
use crate::indexer::ensure_directory;

pub const CONFIG_FILE_NAME: &str = ".adrrc.yml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdrConfig {
    /// Directory holding the record files, relative to the config file.
    #[config(env = "ADR_DIRECTORY")]
    pub directory: String,
}

impl AdrConfig {
    pub fn load(path: &Path) -> Result<Self> {
        AdrConfig::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| AdrError::Config(format!("{}: {e}", path.display())))
    }

    pub fn records_dir(&self, config_file: &Path) -> PathBuf {
        let base = config_file.parent().unwrap_or_else(|| Path::new("."));
        base.join(&self.directory)
    }
}

/// Closest `.adrrc.yml` in `start` or one of its ancestors.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Records directory configured for `cwd`. It has to exist.
pub fn resolve_records_dir(cwd: &Path) -> Result<PathBuf> {
    let config_file =
        find_config_file(cwd).ok_or_else(|| AdrError::ConfigNotFound(cwd.to_path_buf()))?;
    let config = AdrConfig::load(&config_file)?;
    let dir = config.records_dir(&config_file);
    tracing::debug!(config = %config_file.display(), dir = %dir.display(), "resolved records directory");
    ensure_directory(&dir)?;
    Ok(dir)
}

/// Writes `.adrrc.yml` in `dir` pointing at `directory` and returns its path.
pub fn write_config(dir: &Path, directory: &Path) -> Result<PathBuf> {
    let config = AdrConfig {
        directory: directory.to_string_lossy().into_owned(),
    };
    let path = dir.join(CONFIG_FILE_NAME);
    let content = serde_yaml::to_string(&config)?;
    fs::write(&path, content).map_err(|source| AdrError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_config_in_ancestors() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "directory: adr\n").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(root.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn innermost_config_wins() {
        let root = tempdir().unwrap();
        let nested = root.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "directory: outer\n").unwrap();
        fs::write(nested.join(CONFIG_FILE_NAME), "directory: inner\n").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(nested.join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn directory_is_relative_to_config_file() {
        let config = AdrConfig {
            directory: "docs/adr".to_string(),
        };
        assert_eq!(
            config.records_dir(Path::new("/project/.adrrc.yml")),
            PathBuf::from("/project/docs/adr")
        );

        let absolute = AdrConfig {
            directory: "/elsewhere".to_string(),
        };
        assert_eq!(
            absolute.records_dir(Path::new("/project/.adrrc.yml")),
            PathBuf::from("/elsewhere")
        );
    }

    #[test]
    fn written_config_resolves() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("records")).unwrap();
        let path = write_config(root.path(), Path::new("records")).unwrap();
        assert_eq!(path, root.path().join(CONFIG_FILE_NAME));

        let sub = root.path().join("src");
        fs::create_dir(&sub).unwrap();
        assert_eq!(
            resolve_records_dir(&sub).unwrap(),
            root.path().join("records")
        );
    }

    #[test]
    fn configured_directory_must_exist() {
        let root = tempdir().unwrap();
        write_config(root.path(), Path::new("missing")).unwrap();
        assert!(matches!(
            resolve_records_dir(root.path()),
            Err(AdrError::NotFound(_))
        ));
    }

    #[test]
    fn invalid_config_file() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "directory: [a\n").unwrap();
        assert!(matches!(
            resolve_records_dir(root.path()),
            Err(AdrError::Config(_))
        ));
    }
}
