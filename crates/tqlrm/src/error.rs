//! Error types for tqlrm

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type for tqlrm operations.
pub type TqlResult<T> = Result<T, TqlError>;

/// Error type for tqlrm operations.
#[derive(Debug, Error)]
pub enum TqlError {
    /// The external query tool could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The external query tool ran but exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    Tool {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    /// IO error on a file this crate reads or writes.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed delete spec file.
    #[error("bad delete spec file {}: {source}", path.display())]
    SpecFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// Validation error (e.g., missing table or column).
    #[error("{0}")]
    Validation(String),
}

impl TqlError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        TqlError::Validation(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TqlError::Io {
            path: path.into(),
            source,
        }
    }
}
