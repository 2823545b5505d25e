//! The top-level error type and its exit codes.

use std::io;
use std::path::PathBuf;

use stamper_formats::FormatError;
use stamper_input::InputError;
use stamper_render::RenderError;
use thiserror::Error;

/// Exit status for every failure without a dedicated code.
pub const EXIT_FAILURE: u8 = 1;
/// A `--format-option` the format does not know.
pub const EXIT_OPTION_UNKNOWN: u8 = 2;
/// A known option that does not apply to the input.
pub const EXIT_OPTION_UNSUPPORTED: u8 = 3;
/// A known option with an invalid value.
pub const EXIT_OPTION_VALUE: u8 = 4;

/// Everything that can stop a render.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad command line. Displayed the way clap formats it.
    #[error("{0}")]
    Usage(#[source] clap::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// A render error with advice appended.
    #[error("{error}\n\n{hint}")]
    Hinted {
        #[source]
        error: RenderError,
        hint: String,
    },

    #[error("could not write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Format(FormatError::OptionUnknown { .. }) => EXIT_OPTION_UNKNOWN,
            Error::Format(FormatError::OptionUnsupported { .. }) => EXIT_OPTION_UNSUPPORTED,
            Error::Format(FormatError::OptionValue { .. }) => EXIT_OPTION_VALUE,
            _ => EXIT_FAILURE,
        }
    }
}
