//! Error types for input acquisition.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while obtaining the raw data text.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// A stream was required but stdin is an interactive terminal.
    #[error("no input supplied")]
    NoInputSupplied,

    /// Failed to read from stdin.
    #[error("failed to read stdin: {0}")]
    StdinFailed(#[source] io::Error),

    /// The data file could not be opened or read.
    #[error("{}: {source}", path.display())]
    DataFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InputError {
    /// Create a data file error.
    pub fn data_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DataFile {
            path: path.into(),
            source,
        }
    }
}
