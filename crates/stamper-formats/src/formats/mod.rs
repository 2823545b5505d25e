//! Built-in format implementations.
//!
//! - [`IniFormat`] - ConfigParser-style INI files (`.ini`)
//! - [`JsonFormat`] - JSON objects, or arrays with `array-name` (`.json`)
//! - [`YamlFormat`] - YAML mappings, or sequences with `sequence-name` (`.yaml`, `.yml`)
//! - [`EnvFormat`] - dotenv files (`.env`)

mod env;
mod ini;
mod json;
mod yaml;

use std::sync::Arc;

pub use env::{parse_dotenv, EnvFormat, ENV_FORMAT};
pub use ini::IniFormat;
pub use json::JsonFormat;
pub use yaml::YamlFormat;

use crate::{Context, Format, FormatError};

/// The built-in formats in registration order.
pub fn builtin() -> Vec<Arc<dyn Format>> {
    vec![
        Arc::new(IniFormat),
        Arc::new(JsonFormat),
        Arc::new(YamlFormat),
        Arc::new(EnvFormat),
    ]
}

/// Top level of a parsed JSON or YAML document.
pub(crate) enum TopLevel {
    Map(Context),
    List(Vec<serde_json::Value>),
    Other,
}

/// How a format names its two container kinds in messages.
pub(crate) struct Wording {
    pub format: &'static str,
    pub label: &'static str,
    pub map: &'static str,
    pub list: &'static str,
    pub option: &'static str,
}

/// Turn a document top level into a context.
///
/// Maps are used as is and reject the naming option. Lists need the naming
/// option and are stored under that key. Anything else is a shape error.
pub(crate) fn bind_top_level(
    top: TopLevel,
    list_name: Option<String>,
    wording: &Wording,
) -> Result<Context, FormatError> {
    match (top, list_name) {
        (TopLevel::Map(map), None) => Ok(map),
        (TopLevel::Map(_), Some(_)) => Err(FormatError::unsupported(
            wording.format,
            wording.option,
            format!("cannot be used with {} input", wording.map),
        )),
        (TopLevel::List(items), Some(name)) => {
            let mut ctx = Context::new();
            ctx.insert(name, serde_json::Value::Array(items));
            Ok(ctx)
        }
        (TopLevel::List(_), None) => Err(FormatError::unsupported(
            wording.format,
            wording.option,
            format!("must be specified for {} input", wording.list),
        )),
        (TopLevel::Other, _) => Err(FormatError::ParseShape(format!(
            "{} input is neither {} nor {}",
            wording.label,
            article(wording.map),
            article(wording.list),
        ))),
    }
}

fn article(noun: &str) -> String {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => format!("an {}", noun),
        _ => format!("a {}", noun),
    }
}
