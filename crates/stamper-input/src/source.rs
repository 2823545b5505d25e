//! The data argument and the streams it can name.
//!
//! The second positional CLI argument is classified once into a [`DataArg`]:
//! absent, the literal `-`, or a filesystem path. Everything downstream
//! (format resolution, stream acquisition, the undefined-variable hint)
//! branches on this value instead of re-inspecting raw strings.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::env::StdinReader;
use crate::InputError;

/// The literal data argument that selects standard input.
pub const STDIN_ARG: &str = "-";

/// How the user named the data source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataArg {
    /// No data argument was given.
    #[default]
    Absent,
    /// The data argument was exactly `-`.
    Stdin,
    /// A path to a data file.
    Path(PathBuf),
}

impl DataArg {
    /// Classify an optional raw argument.
    pub fn from_arg(arg: Option<impl AsRef<OsStr>>) -> Self {
        match arg {
            None => DataArg::Absent,
            Some(raw) if raw.as_ref() == OsStr::new(STDIN_ARG) => DataArg::Stdin,
            Some(raw) => DataArg::Path(PathBuf::from(raw.as_ref())),
        }
    }

    /// The file path, when one was given.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DataArg::Path(path) => Some(path),
            _ => None,
        }
    }

    /// The file name suffix including the leading dot (`.json`).
    ///
    /// Returns `None` when no path was given. A path without an extension
    /// (including dot-files such as `.env`) yields an empty string.
    pub fn suffix(&self) -> Option<String> {
        self.path().map(|path| {
            path.extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default()
        })
    }

    /// Whether the user explicitly asked for stdin with `-`.
    pub fn is_stdin(&self) -> bool {
        matches!(self, DataArg::Stdin)
    }

    /// Whether no data argument was given at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, DataArg::Absent)
    }

    /// Anchor a relative path at `base`. Absolute paths, `-` and an absent
    /// argument are returned unchanged.
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            DataArg::Path(path) => DataArg::Path(base.join(path)),
            other => other,
        }
    }
}

/// Read the whole of stdin.
///
/// An interactive terminal is not a stream: rather than block waiting for
/// keyboard input, this returns [`InputError::NoInputSupplied`].
pub fn read_stdin(reader: &dyn StdinReader) -> Result<String, InputError> {
    if reader.is_terminal() {
        return Err(InputError::NoInputSupplied);
    }
    tracing::debug!("reading data from stdin");
    reader.read_to_string().map_err(InputError::StdinFailed)
}

/// Read a data file in one call; the handle is closed before returning.
pub fn read_file(path: &Path) -> Result<String, InputError> {
    tracing::debug!(path = %path.display(), "reading data file");
    std::fs::read_to_string(path).map_err(|e| InputError::data_file(path, e))
}
