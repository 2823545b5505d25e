//! Format resolution and parsing errors.
//!
//! Option problems are split three ways because callers branch on them:
//! an option the format has never heard of, an option that is known but does
//! not apply to the shape of the actual input, and an option whose value is
//! malformed.

use thiserror::Error;

/// Errors raised while selecting a format or turning input text into a context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The named format is not registered.
    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    /// Suffix inference found no format for the data file.
    #[error("no format which can read '{0}' files available")]
    UnresolvableSuffix(String),

    /// An option name the format does not declare.
    #[error("format '{format}' does not recognize option '{option}'")]
    OptionUnknown { format: String, option: String },

    /// A declared option that does not fit the shape of the input.
    #[error("format '{format}' option '{option}' {reason}")]
    OptionUnsupported {
        format: String,
        option: String,
        reason: String,
    },

    /// A declared option with an invalid value.
    #[error("format '{format}' option '{option}' value '{value}' {reason}")]
    OptionValue {
        format: String,
        option: String,
        value: String,
        reason: String,
    },

    /// The input parsed but its top level is not usable as a context.
    #[error("{0}")]
    ParseShape(String),

    /// The input is not valid for the format.
    #[error("invalid {format} input: {message}")]
    Parse { format: String, message: String },
}

impl FormatError {
    /// Create a syntax error for `format`.
    pub fn parse(format: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.to_string(),
        }
    }

    /// Create an unsupported-option error.
    pub fn unsupported(
        format: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::OptionUnsupported {
            format: format.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-value error.
    pub fn value(
        format: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::OptionValue {
            format: format.into(),
            option: option.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is one of the three format-option errors.
    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            Self::OptionUnknown { .. } | Self::OptionUnsupported { .. } | Self::OptionValue { .. }
        )
    }
}
