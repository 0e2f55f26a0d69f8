use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while reading or writing the settings document.
///
/// `install` never sees `Malformed`: it recovers by backing the file up.
/// Only read-only and removal paths report it.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("could not determine home directory -- is $HOME set?")]
    NoHomeDir,

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to back up {} to {}: {source}", .path.display(), .backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is read-only; not modified (fix: chmod u+w {})", .path.display(), .path.display())]
    ReadOnly { path: PathBuf },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read answer from stdin: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SetupError>;
