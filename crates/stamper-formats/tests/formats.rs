//! Integration tests for format resolution and parsing through the public API.

use proptest::prelude::*;
use serde_json::json;
use stamper_formats::{
    is_identifier, is_reserved_keyword, parse_dotenv, resolve_format, Context, FnFormat, Format,
    FormatError, FormatOptions, FormatRegistry, FormatSelection,
};
use stamper_input::DataArg;

// ============================================================================
// Helpers
// ============================================================================

fn parse_with(
    registry: &FormatRegistry,
    format: &str,
    options: &[&str],
    data: &str,
) -> Result<Context, FormatError> {
    let format = registry.get(format)?;
    let options = FormatOptions::validate(format, options)?;
    format.parse(data, &options)
}

fn parse(format: &str, options: &[&str], data: &str) -> Result<Context, FormatError> {
    parse_with(&FormatRegistry::with_builtins(), format, options, data)
}

fn spam_format() -> impl Format {
    FnFormat::new("spam", |data, options| {
        let mut ctx = Context::new();
        let key = if options.contains("ham") { "ham" } else { "spam" };
        ctx.insert(key.to_string(), json!(data.trim()));
        Ok(ctx)
    })
    .with_suffixes(&[".spam"])
    .with_option_names(&["ham"])
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn auto_resolution_table() {
    let registry = FormatRegistry::with_builtins();
    let cases = [
        (None, "env"),
        (Some("-"), "env"),
        (Some("nginx.ini"), "ini"),
        (Some("nginx.json"), "json"),
        (Some("nginx.yaml"), "yaml"),
        (Some("nginx.yml"), "yaml"),
        (Some("nginx.env"), "env"),
    ];
    for (arg, expected) in cases {
        let data = DataArg::from_arg(arg);
        let format = resolve_format(&registry, &FormatSelection::Auto, &data).unwrap();
        assert_eq!(format.name(), expected, "data argument {:?}", arg);
    }
}

#[test]
fn plugin_suffix_resolution() {
    let registry = FormatRegistry::with_builtins().add(spam_format());
    let data = DataArg::from_arg(Some("data.spam"));
    let format = resolve_format(&registry, &FormatSelection::Auto, &data).unwrap();
    assert_eq!(format.name(), "spam");
}

#[test]
fn unknown_suffix_without_plugin() {
    let registry = FormatRegistry::with_builtins();
    let data = DataArg::from_arg(Some("data.spam"));
    let err = resolve_format(&registry, &FormatSelection::Auto, &data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no format which can read '.spam' files available"
    );
}

#[test]
fn explicit_plugin_format() {
    let registry = FormatRegistry::with_builtins().add(spam_format());
    let data = DataArg::from_arg(Some("data.json"));
    let format = resolve_format(&registry, &"spam".parse().unwrap(), &data).unwrap();
    assert_eq!(format.name(), "spam");
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn plugin_format_options() {
    let registry = FormatRegistry::with_builtins().add(spam_format());
    let ctx = parse_with(&registry, "spam", &["ham"], "eggs\n").unwrap();
    assert_eq!(ctx.get("ham"), Some(&json!("eggs")));

    let err = parse_with(&registry, "spam", &["bacon"], "eggs").unwrap_err();
    assert_eq!(
        err,
        FormatError::OptionUnknown {
            format: "spam".into(),
            option: "bacon".into()
        }
    );
}

#[test]
fn options_on_format_without_options() {
    let err = parse("env", &["array-name=x"], "A=1").unwrap_err();
    assert!(matches!(err, FormatError::OptionUnknown { .. }));
    assert!(err.is_option_error());
}

#[test]
fn array_name_value_errors() {
    let cases = [
        ("array-name", "requires a value"),
        ("array-name=a=b", "contains more than one '='"),
        ("array-name=1abc", "is not a valid identifier"),
        ("array-name=with space", "is not a valid identifier"),
        ("array-name=class", "is a reserved keyword"),
    ];
    for (option, reason) in cases {
        match parse("json", &[option], "[1]").unwrap_err() {
            FormatError::OptionValue { reason: got, .. } => assert_eq!(got, reason, "{}", option),
            other => panic!("{}: unexpected error {:?}", option, other),
        }
    }
}

#[test]
fn last_option_wins() {
    let ctx = parse(
        "yaml",
        &["sequence-name=first", "sequence-name=second"],
        "- a\n",
    )
    .unwrap();
    assert_eq!(ctx.get("second"), Some(&json!(["a"])));
    assert!(!ctx.contains_key("first"));
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn json_object_and_array() {
    let ctx = parse("json", &[], r#"{"nginx": {"hostname": "localhost"}}"#).unwrap();
    assert_eq!(ctx["nginx"]["hostname"], json!("localhost"));

    let ctx = parse("json", &["array-name=items"], r#"[1, "two", null]"#).unwrap();
    assert_eq!(ctx["items"], json!([1, "two", null]));
}

#[test]
fn json_array_requires_name() {
    let err = parse("json", &[], "[1, 2]").unwrap_err();
    assert!(matches!(err, FormatError::OptionUnsupported { .. }));
}

#[test]
fn json_object_rejects_name() {
    let err = parse("json", &["array-name=items"], "{}").unwrap_err();
    assert!(matches!(err, FormatError::OptionUnsupported { .. }));
}

#[test]
fn yaml_scalar_is_shape_error() {
    let err = parse("yaml", &[], "just a string\n").unwrap_err();
    assert!(matches!(err, FormatError::ParseShape(_)));
}

#[test]
fn malformed_input_is_parse_error() {
    for (format, data) in [("json", "{"), ("yaml", "a: [1"), ("ini", "[broken")] {
        let err = parse(format, &[], data).unwrap_err();
        assert!(
            matches!(err, FormatError::Parse { .. }),
            "{} gave {:?}",
            format,
            err
        );
    }
}

#[test]
fn same_data_in_every_format() {
    let expected = json!({"hostname": "localhost", "webroot": "/var/www/project"});

    let ini = parse("ini", &[], "[nginx]\nhostname = localhost\nwebroot = /var/www/project\n")
        .unwrap();
    let json_ctx = parse(
        "json",
        &[],
        r#"{"nginx": {"hostname": "localhost", "webroot": "/var/www/project"}}"#,
    )
    .unwrap();
    let yaml = parse(
        "yaml",
        &[],
        "nginx:\n  hostname: localhost\n  webroot: /var/www/project\n",
    )
    .unwrap();

    assert_eq!(ini["nginx"], expected);
    assert_eq!(json_ctx["nginx"], expected);
    assert_eq!(yaml["nginx"], expected);
}

// ============================================================================
// Property tests
// ============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,12}".prop_filter("not a keyword", |s| !is_reserved_keyword(s))
}

proptest! {
    /// Every generated identifier is accepted.
    #[test]
    fn identifiers_are_recognized(name in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        prop_assert!(is_identifier(&name));
    }

    /// A leading digit is never an identifier.
    #[test]
    fn leading_digit_is_rejected(name in "[0-9][A-Za-z0-9_]{0,10}") {
        prop_assert!(!is_identifier(&name));
    }

    /// Plain `KEY=value` lines round through the dotenv parser unchanged,
    /// with later definitions winning.
    #[test]
    fn dotenv_plain_pairs(
        pairs in prop::collection::vec(("[A-Z_][A-Z0-9_]{0,10}", "[a-zA-Z0-9/._-]{0,12}"), 0..20),
    ) {
        let data: String = pairs.iter().map(|(k, v)| format!("{}={}\n", k, v)).collect();
        let parsed = parse_dotenv(&data);

        let mut expected = std::collections::BTreeMap::new();
        for (k, v) in &pairs {
            expected.insert(k.clone(), v.clone());
        }
        prop_assert_eq!(parsed, expected);
    }

    /// Any valid non-keyword name nests a JSON array under that key.
    #[test]
    fn json_array_nests_under_any_valid_name(
        name in name_strategy(),
        items in prop::collection::vec(any::<i32>(), 0..10),
    ) {
        let data = serde_json::to_string(&items).unwrap();
        let option = format!("array-name={}", name);
        let ctx = parse("json", &[option.as_str()], &data).unwrap();
        prop_assert_eq!(ctx.len(), 1);
        prop_assert_eq!(&ctx[&name], &json!(items));
    }

    /// Parsing is a pure function of its input.
    #[test]
    fn parsing_is_deterministic(data in "[a-z]{1,6}: [a-z0-9]{0,6}\n") {
        let first = parse("yaml", &[], &data);
        let second = parse("yaml", &[], &data);
        prop_assert_eq!(first, second);
    }
}
