// error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything a calculator command can fail with. None of these are fatal:
/// the REPL reports them and keeps reading.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Nothing to undo")]
    EmptyHistory,
    #[error("Nothing to redo")]
    NothingToRedo,
    #[error("Unknown operation: '{0}'")]
    UnknownOperation(String),
    #[error("{0}")]
    Domain(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl CalcError {
    pub fn domain<T: Into<String>>(msg: T) -> Self {
        Self::Domain(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failures of the history store. A failed save never leaves a file that a
/// later load would accept as a different history.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("history file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history file {} is not valid JSON history: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("history file {} is malformed: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl PersistenceError {
    pub fn malformed<P: Into<PathBuf>, T: Into<String>>(path: P, reason: T) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = CalcError> = std::result::Result<T, E>;
