//! YAML input.
//!
//! ```yaml
//! nginx:
//!   hostname: localhost
//!   webroot: /var/www/project
//! ```
//!
//! Parsed with `serde_yaml`, which only builds data: tags never execute code.
//! A top-level sequence needs `--format-option sequence-name=NAME`.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use super::{bind_top_level, TopLevel, Wording};
use crate::{Context, Format, FormatError, FormatOptions};

const SEQUENCE_NAME: &str = "sequence-name";

const WORDING: Wording = Wording {
    format: "yaml",
    label: "YAML",
    map: "mapping",
    list: "sequence",
    option: SEQUENCE_NAME,
};

/// The `yaml` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn suffixes(&self) -> &[&str] {
        &[".yaml", ".yml"]
    }

    fn option_names(&self) -> &[&str] {
        &[SEQUENCE_NAME]
    }

    fn parse(&self, data: &str, options: &FormatOptions) -> Result<Context, FormatError> {
        let sequence_name = options.identifier(SEQUENCE_NAME)?;
        let value: YamlValue =
            serde_yaml::from_str(data).map_err(|e| FormatError::parse("yaml", e))?;
        let top = match to_json(value)? {
            JsonValue::Object(map) => TopLevel::Map(map),
            JsonValue::Array(items) => TopLevel::List(items),
            _ => TopLevel::Other,
        };
        bind_top_level(top, sequence_name, &WORDING)
    }
}

/// Convert a YAML value into the context's value model.
///
/// Non-string mapping keys (numbers, booleans, null) are stringified, since
/// context keys are always strings. Tagged values keep their inner value.
fn to_json(value: YamlValue) -> Result<JsonValue, FormatError> {
    Ok(match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(JsonValue::Number)
                    .ok_or_else(|| FormatError::parse("yaml", format!("unsupported number {}", n)))?
            }
        }
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(items) => {
            JsonValue::Array(items.into_iter().map(to_json).collect::<Result<_, _>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut map = Context::new();
            for (key, value) in mapping {
                map.insert(key_to_string(key)?, to_json(value)?);
            }
            JsonValue::Object(map)
        }
        YamlValue::Tagged(tagged) => to_json(tagged.value)?,
    })
}

fn key_to_string(key: YamlValue) -> Result<String, FormatError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        other => Err(FormatError::parse(
            "yaml",
            format!("mapping key must be a scalar, found {:?}", other),
        )),
    }
}
