use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdrError {
    #[error("{0:?} does not exist")]
    NotFound(PathBuf),

    #[error("{0:?} should be a directory")]
    NotADirectory(PathBuf),

    #[error("no {name} found in {0:?} or any parent directory", name = crate::config::CONFIG_FILE_NAME)]
    ConfigNotFound(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Malformed header: {reason}")]
    MalformedHeader { reason: String },

    #[error("Invalid {field} {value:?}: {reason}")]
    InvalidDate {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid status {0:?}: must be one of unknown, proposed, accepted, deprecated, superseded or observed")]
    InvalidStatus(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Unable to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scan cancelled")]
    Cancelled,

    #[error("Unable to start indexing workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl AdrError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AdrError::MalformedHeader {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdrError>;
