//! Choosing the input format.
//!
//! The decision order is fixed:
//!
//! 1. An explicit `--format` always wins.
//! 2. With no data argument, or the data argument `-`, the format is `env`.
//! 3. Otherwise the data file's suffix is matched against the registry, in
//!    registration order.
//! 4. No match is an error naming the suffix.
//!
//! Suffix inference therefore only ever runs for a real file argument.

use std::fmt;
use std::str::FromStr;

use stamper_input::DataArg;

use crate::formats::ENV_FORMAT;
use crate::{Format, FormatError, FormatRegistry};

/// The `--format` value meaning "infer it".
pub const AUTO: &str = "auto";

/// What the user asked for with `--format`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatSelection {
    #[default]
    Auto,
    Named(String),
}

impl FromStr for FormatSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for FormatSelection {
    fn from(s: &str) -> Self {
        if s == AUTO {
            Self::Auto
        } else {
            Self::Named(s.to_string())
        }
    }
}

impl fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(AUTO),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Pick the format for this invocation.
pub fn resolve_format<'r>(
    registry: &'r FormatRegistry,
    selection: &FormatSelection,
    data: &DataArg,
) -> Result<&'r dyn Format, FormatError> {
    let format = match (selection, data) {
        (FormatSelection::Named(name), _) => registry.get(name)?,
        (FormatSelection::Auto, DataArg::Absent | DataArg::Stdin) => registry.get(ENV_FORMAT)?,
        (FormatSelection::Auto, DataArg::Path(_)) => {
            let suffix = data.suffix().unwrap_or_default();
            registry
                .find_by_suffix(&suffix)
                .ok_or(FormatError::UnresolvableSuffix(suffix))?
        }
    };
    tracing::debug!(format = format.name(), %selection, "resolved input format");
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(selection: &str, data: Option<&str>) -> Result<String, FormatError> {
        let registry = FormatRegistry::with_builtins();
        resolve_format(
            &registry,
            &FormatSelection::from(selection),
            &DataArg::from_arg(data),
        )
        .map(|f| f.name().to_string())
    }

    #[test]
    fn explicit_format_overrides_suffix() {
        assert_eq!(resolve("yaml", Some("data.json")).unwrap(), "yaml");
    }

    #[test]
    fn explicit_format_without_data() {
        assert_eq!(resolve("json", None).unwrap(), "json");
    }

    #[test]
    fn explicit_unknown_format() {
        assert_eq!(
            resolve("toml", Some("data.json")).unwrap_err(),
            FormatError::UnknownFormat("toml".into())
        );
    }

    #[test]
    fn no_data_means_env() {
        assert_eq!(resolve("auto", None).unwrap(), "env");
    }

    #[test]
    fn dash_means_env() {
        assert_eq!(resolve("auto", Some("-")).unwrap(), "env");
    }

    #[test]
    fn suffix_inference() {
        assert_eq!(resolve("auto", Some("data.json")).unwrap(), "json");
        assert_eq!(resolve("auto", Some("conf/data.yml")).unwrap(), "yaml");
        assert_eq!(resolve("auto", Some("data.ini")).unwrap(), "ini");
        assert_eq!(resolve("auto", Some("prod.env")).unwrap(), "env");
    }

    #[test]
    fn unresolvable_suffix() {
        assert_eq!(
            resolve("auto", Some("data.xyz")).unwrap_err(),
            FormatError::UnresolvableSuffix(".xyz".into())
        );
    }

    #[test]
    fn missing_suffix_is_unresolvable() {
        assert_eq!(
            resolve("auto", Some("Makefile")).unwrap_err(),
            FormatError::UnresolvableSuffix(String::new())
        );
    }

    #[test]
    fn selection_parsing() {
        assert_eq!("auto".parse::<FormatSelection>().unwrap(), FormatSelection::Auto);
        assert_eq!(
            "json".parse::<FormatSelection>().unwrap(),
            FormatSelection::Named("json".into())
        );
        assert_eq!(FormatSelection::Auto.to_string(), "auto");
    }
}
