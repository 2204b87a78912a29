use std::path::PathBuf;

use thiserror::Error;

use caja_core::DomainError;

/// Failure of a CSV export or import.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file name was blank or whitespace only.
    #[error("file name cannot be empty")]
    EmptyFilename,

    /// The directory part of the path does not exist.
    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The file to load does not exist.
    #[error("file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A row could not be parsed. `line` is 1-based; 0 when unknown.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: u64, reason: String },

    /// The file was read but its contents were refused by the store, or the data
    /// to write could not be computed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FileError {
    pub fn parse(line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for FileError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => FileError::Io(io),
            _ => FileError::Parse { line, reason },
        }
    }
}

/// Any failure a [`crate::Store`] operation can report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Purchase(#[from] DomainError),

    #[error(transparent)]
    File(#[from] FileError),
}
