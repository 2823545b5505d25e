//! The [`Format`] trait and the [`Context`] it produces.

use std::fmt;

use crate::{FormatError, FormatOptions};

/// Template context: string keys to JSON-like values.
///
/// Backed by a `BTreeMap`, so iteration order is the key order and two
/// parses of the same input compare equal.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// A named input data format.
///
/// A format declares which file suffixes it claims (used for inference when
/// no `--format` is given) and which option names it accepts. Option *names*
/// are checked by [`FormatOptions::validate`] before `parse` runs; option
/// *values* are the format's own business.
///
/// # Example
///
/// ```
/// use stamper_formats::{Context, Format, FormatError, FormatOptions};
///
/// struct Lines;
///
/// impl Format for Lines {
///     fn name(&self) -> &str { "lines" }
///     fn suffixes(&self) -> &[&str] { &[".lines"] }
///
///     fn parse(&self, data: &str, _: &FormatOptions) -> Result<Context, FormatError> {
///         let lines = data.lines().map(serde_json::Value::from).collect::<Vec<_>>();
///         let mut ctx = Context::new();
///         ctx.insert("lines".into(), lines.into());
///         Ok(ctx)
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry name, as accepted by `--format`.
    fn name(&self) -> &str;

    /// File suffixes this format claims, each with its leading dot.
    fn suffixes(&self) -> &[&str] {
        &[]
    }

    /// Option names accepted by `--format-option`.
    fn option_names(&self) -> &[&str] {
        &[]
    }

    /// Parse raw text into a context.
    fn parse(&self, data: &str, options: &FormatOptions) -> Result<Context, FormatError>;
}

impl fmt::Debug for dyn Format + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format")
            .field("name", &self.name())
            .field("suffixes", &self.suffixes())
            .field("option_names", &self.option_names())
            .finish()
    }
}

/// A format built from a parser function.
///
/// Convenient for plugins that only need a name, suffixes and a function.
pub struct FnFormat<F> {
    name: &'static str,
    suffixes: &'static [&'static str],
    option_names: &'static [&'static str],
    parser: F,
}

impl<F> FnFormat<F>
where
    F: Fn(&str, &FormatOptions) -> Result<Context, FormatError> + Send + Sync,
{
    /// Create a format with no suffixes and no options.
    pub fn new(name: &'static str, parser: F) -> Self {
        Self {
            name,
            suffixes: &[],
            option_names: &[],
            parser,
        }
    }

    /// Claim file suffixes for inference.
    pub fn with_suffixes(mut self, suffixes: &'static [&'static str]) -> Self {
        self.suffixes = suffixes;
        self
    }

    /// Declare accepted option names.
    pub fn with_option_names(mut self, names: &'static [&'static str]) -> Self {
        self.option_names = names;
        self
    }
}

impl<F> Format for FnFormat<F>
where
    F: Fn(&str, &FormatOptions) -> Result<Context, FormatError> + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn suffixes(&self) -> &[&str] {
        self.suffixes
    }

    fn option_names(&self) -> &[&str] {
        self.option_names
    }

    fn parse(&self, data: &str, options: &FormatOptions) -> Result<Context, FormatError> {
        (self.parser)(data, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fn_format_delegates_to_parser() {
        let spam = FnFormat::new("spam", |_data, options| {
            let key = if options.contains("ham") { "ham" } else { "spam" };
            let mut ctx = Context::new();
            ctx.insert(key.to_string(), json!(key));
            Ok(ctx)
        })
        .with_suffixes(&[".spam"])
        .with_option_names(&["ham"]);

        assert_eq!(spam.name(), "spam");
        assert_eq!(spam.suffixes(), &[".spam"]);

        let plain = spam.parse("", &FormatOptions::none("spam")).unwrap();
        assert_eq!(plain.get("spam"), Some(&json!("spam")));

        let options = FormatOptions::validate(&spam, ["ham"]).unwrap();
        let ham = spam.parse("", &options).unwrap();
        assert_eq!(ham.get("ham"), Some(&json!("ham")));
    }

    #[test]
    fn debug_shows_name() {
        let format: Box<dyn Format> = Box::new(FnFormat::new("x", |_, _| Ok(Context::new())));
        assert!(format!("{:?}", format).contains("\"x\""));
    }
}
