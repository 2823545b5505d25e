//! `--format-option` parsing and validation.
//!
//! An option is written `name` or `name=value`. Names are validated against
//! the target format before any data is read; values are interpreted by the
//! format itself, usually through [`FormatOptions::identifier`].

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::{Format, FormatError};

/// Words that cannot name a context key.
///
/// Template expressions use a Python-derived grammar, so the Python keyword
/// list applies, plus the lowercase literal spellings the engine accepts.
static RESERVED_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield", "true", "false", "none",
    ]
    .into_iter()
    .collect()
});

/// Whether `word` is reserved by the template expression language.
pub fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS.contains(word)
}

/// Whether `word` is a valid identifier: a letter or `_`, then letters,
/// digits or `_`.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// One parsed `--format-option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOption {
    /// Text before the first `=`.
    pub name: String,
    /// Text after the first `=`, if there was one.
    pub value: Option<String>,
}

impl FormatOption {
    /// Split a raw option on its first `=`.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('=') {
            Some((name, value)) => Self {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
            None => Self {
                name: raw.to_string(),
                value: None,
            },
        }
    }
}

/// The validated options for one format, in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    format: String,
    options: Vec<FormatOption>,
}

impl FormatOptions {
    /// No options for `format`.
    pub fn none(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            options: Vec::new(),
        }
    }

    /// Parse raw options and check every name against `format`.
    ///
    /// The first unrecognized name fails with [`FormatError::OptionUnknown`],
    /// whether or not the format declares any options at all.
    pub fn validate<I, S>(format: &dyn Format, raw: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted = format.option_names();
        let mut options = Vec::new();
        for raw in raw {
            let option = FormatOption::parse(raw.as_ref());
            if !accepted.contains(&option.name.as_str()) {
                return Err(FormatError::OptionUnknown {
                    format: format.name().to_string(),
                    option: option.name,
                });
            }
            options.push(option);
        }
        tracing::debug!(format = format.name(), count = options.len(), "format options validated");
        Ok(Self {
            format: format.name().to_string(),
            options,
        })
    }

    /// The format these options belong to.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// All options, in order.
    pub fn iter(&self) -> impl Iterator<Item = &FormatOption> {
        self.options.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Whether an option with this name was given.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The last option with this name; later options override earlier ones.
    pub fn get(&self, name: &str) -> Option<&FormatOption> {
        self.options.iter().rev().find(|o| o.name == name)
    }

    /// Read an option whose value names a context key.
    ///
    /// Returns `Ok(None)` when the option was not given. The value must be
    /// present, contain no further `=`, be an identifier, and not be a
    /// reserved keyword; otherwise [`FormatError::OptionValue`].
    pub fn identifier(&self, name: &str) -> Result<Option<String>, FormatError> {
        let Some(option) = self.get(name) else {
            return Ok(None);
        };
        let invalid = |value: &str, reason: &str| {
            FormatError::value(self.format.as_str(), name, value, reason)
        };
        let value = match option.value.as_deref() {
            None => return Err(invalid("", "requires a value")),
            Some(value) if value.contains('=') => {
                return Err(invalid(value, "contains more than one '='"))
            }
            Some(value) => value,
        };
        if !is_identifier(value) {
            return Err(invalid(value, "is not a valid identifier"));
        }
        if is_reserved_keyword(value) {
            return Err(invalid(value, "is a reserved keyword"));
        }
        Ok(Some(value.to_string()))
    }
}
