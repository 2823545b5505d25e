//! Error types for template rendering.
//!
//! [`RenderError`] hides the template engine's own error type behind a small,
//! stable set of variants. Callers mostly care about two of them:
//! [`TemplateNotFound`](RenderError::TemplateNotFound) and
//! [`UndefinedVariable`](RenderError::UndefinedVariable), which the CLI
//! reports (and, for the latter, annotates) differently.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template (or something it includes) does not exist.
    #[error("{0}")]
    TemplateNotFound(String),

    /// The template used a variable the context does not define.
    #[error("{0}")]
    UndefinedVariable(String),

    /// Syntax error, failing filter, or any other engine failure.
    #[error("{0}")]
    Template(String),

    /// The customization file could not be read or applied.
    #[error("invalid customization file '{}': {message}", path.display())]
    Customize { path: PathBuf, message: String },
}

impl RenderError {
    pub(crate) fn customize(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        RenderError::Customize {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        let message = describe(&err);
        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(message),
            ErrorKind::UndefinedError => RenderError::UndefinedVariable(message),
            _ => RenderError::Template(message),
        }
    }
}

/// The engine message followed by any wrapped causes.
fn describe(err: &minijinja::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
