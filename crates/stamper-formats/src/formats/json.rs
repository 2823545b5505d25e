//! JSON input.
//!
//! ```json
//! { "nginx": { "hostname": "localhost", "webroot": "/var/www/project" } }
//! ```
//!
//! A top-level array is accepted only with `--format-option array-name=NAME`,
//! which stores it under `NAME`.

use serde_json::Value;

use super::{bind_top_level, TopLevel, Wording};
use crate::{Context, Format, FormatError, FormatOptions};

const ARRAY_NAME: &str = "array-name";

const WORDING: Wording = Wording {
    format: "json",
    label: "JSON",
    map: "object",
    list: "array",
    option: ARRAY_NAME,
};

/// The `json` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn suffixes(&self) -> &[&str] {
        &[".json"]
    }

    fn option_names(&self) -> &[&str] {
        &[ARRAY_NAME]
    }

    fn parse(&self, data: &str, options: &FormatOptions) -> Result<Context, FormatError> {
        let array_name = options.identifier(ARRAY_NAME)?;
        let value: Value =
            serde_json::from_str(data).map_err(|e| FormatError::parse("json", e))?;
        let top = match value {
            Value::Object(map) => TopLevel::Map(map),
            Value::Array(items) => TopLevel::List(items),
            _ => TopLevel::Other,
        };
        bind_top_level(top, array_name, &WORDING)
    }
}
