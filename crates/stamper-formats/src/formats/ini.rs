//! INI input.
//!
//! ```ini
//! [DEFAULT]
//! logs = /var/log/nginx
//!
//! [nginx]
//! hostname = localhost
//! webroot = /var/www/project
//! ```
//!
//! Each section becomes a top-level key holding a map of its entries. The
//! defaults bucket (`[DEFAULT]`, plus any entries before the first header) is
//! merged into every section, with the section's own entries winning, and is
//! not emitted itself.
//!
//! Syntax follows the ConfigParser conventions: `=` or `:` delimits (the
//! first one on the line), keys are lower-cased, whole-line `#`/`;` comments,
//! indented lines continue the previous value. A section header's name runs
//! to the last `]` on its line and must not be empty.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{Context, Format, FormatError, FormatOptions};

const DEFAULT_SECTION: &str = "DEFAULT";
const META_KEY: &str = "__name__";

type Section = BTreeMap<String, String>;

/// The `ini` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct IniFormat;

impl Format for IniFormat {
    fn name(&self) -> &str {
        "ini"
    }

    fn suffixes(&self) -> &[&str] {
        &[".ini"]
    }

    fn parse(&self, data: &str, _options: &FormatOptions) -> Result<Context, FormatError> {
        let parsed = IniParser::default().parse(data)?;
        Ok(parsed.into_context())
    }
}

#[derive(Default)]
struct Parsed {
    defaults: Section,
    sections: Vec<(String, Section)>,
}

impl Parsed {
    fn into_context(self) -> Context {
        let mut ctx = Context::new();
        for (name, entries) in self.sections {
            let mut merged = self.defaults.clone();
            merged.extend(entries);
            merged.remove(META_KEY);
            let map = merged
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            ctx.insert(name, Value::Object(map));
        }
        ctx
    }
}

/// Where the parser is writing entries.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Target {
    Defaults,
    Section(usize),
}

struct IniParser {
    parsed: Parsed,
    target: Target,
    /// Key and indentation of the entry a continuation line would extend.
    last: Option<(String, usize)>,
}

impl Default for IniParser {
    fn default() -> Self {
        Self {
            parsed: Parsed::default(),
            target: Target::Defaults,
            last: None,
        }
    }
}

impl IniParser {
    fn parse(mut self, data: &str) -> Result<Parsed, FormatError> {
        for (index, raw) in data.lines().enumerate() {
            let lineno = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                // A blank line ends a multi-line value.
                self.last = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();
            if let Some((key, key_indent)) = self.last.clone() {
                if indent > key_indent {
                    let entries = self.entries();
                    if let Some(value) = entries.get_mut(&key) {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                    }
                    continue;
                }
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                // The name runs to the last `]`; anything after it is ignored.
                let end = header
                    .rfind(']')
                    .ok_or_else(|| error(lineno, "unterminated section header"))?;
                let name = &header[..end];
                if name.is_empty() {
                    return Err(error(lineno, "empty section name"));
                }
                self.open_section(name, lineno)?;
                continue;
            }

            self.add_entry(trimmed, indent, lineno)?;
        }
        Ok(self.parsed)
    }

    fn open_section(&mut self, name: &str, lineno: usize) -> Result<(), FormatError> {
        self.last = None;
        if name == DEFAULT_SECTION {
            self.target = Target::Defaults;
            return Ok(());
        }
        if self.parsed.sections.iter().any(|(n, _)| n == name) {
            return Err(error(lineno, format!("section '{}' already exists", name)));
        }
        self.parsed.sections.push((name.to_string(), Section::new()));
        self.target = Target::Section(self.parsed.sections.len() - 1);
        Ok(())
    }

    fn add_entry(&mut self, line: &str, indent: usize, lineno: usize) -> Result<(), FormatError> {
        let delimiter = line
            .find(&['=', ':'][..])
            .ok_or_else(|| error(lineno, format!("expected 'key = value', found '{}'", line)))?;
        let key = line[..delimiter].trim().to_lowercase();
        let value = line[delimiter + 1..].trim().to_string();
        if key.is_empty() {
            return Err(error(lineno, "empty key"));
        }

        let entries = self.entries();
        if entries.contains_key(&key) {
            return Err(error(lineno, format!("option '{}' already exists", key)));
        }
        entries.insert(key.clone(), value);
        self.last = Some((key, indent));
        Ok(())
    }

    fn entries(&mut self) -> &mut Section {
        match self.target {
            Target::Defaults => &mut self.parsed.defaults,
            Target::Section(i) => &mut self.parsed.sections[i].1,
        }
    }
}

fn error(lineno: usize, message: impl std::fmt::Display) -> FormatError {
    FormatError::parse("ini", format!("line {}: {}", lineno, message))
}
