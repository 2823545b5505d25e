//! dotenv input.
//!
//! ```text
//! NGINX_HOSTNAME=localhost
//! NGINX_WEBROOT=/var/www/project
//! NGINX_LOGS=${NGINX_WEBROOT}/logs
//! ```
//!
//! Rules, in the order they are applied to each line:
//!
//! 1. Blank lines and lines starting with `#` are skipped.
//! 2. A leading `export ` is ignored.
//! 3. A line without `=` defines its key with an empty value.
//! 4. The line splits on the first `=`; key and value are trimmed.
//! 5. `'single quoted'` values are taken literally.
//! 6. `"double quoted"` values understand `\n`, `\t`, `\"` and `\\`, then
//!    interpolate. Either kind of quoted value may be followed by a
//!    `#comment`.
//! 7. Unquoted values drop a trailing ` #comment`, then interpolate.
//!
//! Interpolation replaces `${NAME}` or `${NAME:-fallback}` with the value of
//! a key defined on an earlier line. Forward references and unknown names
//! give the fallback, or nothing. The process environment is never read.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{Context, Format, FormatError, FormatOptions};

/// Name of the environment format; also the resolver's fallback.
pub const ENV_FORMAT: &str = "env";

/// The `env` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvFormat;

impl Format for EnvFormat {
    fn name(&self) -> &str {
        ENV_FORMAT
    }

    fn suffixes(&self) -> &[&str] {
        &[".env"]
    }

    fn parse(&self, data: &str, _options: &FormatOptions) -> Result<Context, FormatError> {
        Ok(parse_dotenv(data)
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect())
    }
}

/// Parse dotenv text into ordered key/value pairs.
///
/// Later definitions of a key replace earlier ones.
pub fn parse_dotenv(data: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    for line in data.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line).trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);

        let (key, raw) = match line.split_once('=') {
            Some((key, raw)) => (key.trim(), raw.trim()),
            None => (line, ""),
        };
        if key.is_empty() {
            continue;
        }
        let value = parse_value(raw, &vars);
        vars.insert(key.to_string(), value);
    }
    vars
}

fn parse_value(raw: &str, defined: &BTreeMap<String, String>) -> String {
    if let Some(inner) = quoted(raw, '\'') {
        return inner.to_string();
    }
    if let Some(inner) = quoted(raw, '"') {
        return interpolate(&unescape(inner), defined);
    }
    interpolate(strip_comment(raw), defined)
}

/// The text between matching quotes, if `raw` is quoted with `quote`.
///
/// Only a `#comment` may follow the closing quote. Inside double quotes a
/// backslash hides the next character from the closing-quote search.
fn quoted(raw: &str, quote: char) -> Option<&str> {
    let body = raw.strip_prefix(quote)?;
    let mut chars = body.char_indices();
    let close = loop {
        match chars.next()? {
            (_, '\\') if quote == '"' => {
                chars.next();
            }
            (i, c) if c == quote => break i,
            _ => {}
        }
    };
    let rest = body[close + quote.len_utf8()..].trim_start();
    (rest.is_empty() || rest.starts_with('#')).then(|| &body[..close])
}

fn strip_comment(raw: &str) -> &str {
    match raw.find(" #") {
        Some(pos) => raw[..pos].trim_end(),
        None => raw,
    }
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn interpolate(value: &str, defined: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated reference: keep the text as written.
            out.push_str(&rest[start..]);
            return out;
        };
        let expr = &after[..end];
        let (name, fallback) = match expr.split_once(":-") {
            Some((name, fallback)) => (name, fallback),
            None => (expr, ""),
        };
        match defined.get(name.trim()) {
            Some(found) => out.push_str(found),
            None => out.push_str(fallback),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
