//! Input data formats for stamper.
//!
//! This crate turns raw data text into a template [`Context`]. It owns:
//!
//! - the [`Format`] trait and the built-in [`formats`] (ini, json, yaml, env);
//! - [`FormatOptions`], the validated `--format-option` values;
//! - [`FormatRegistry`], the ordered name-to-format mapping plugins extend;
//! - [`resolve_format`], which picks a format from `--format`, the data
//!   argument and the registry;
//! - [`FormatError`], the error taxonomy the CLI maps to exit codes.
//!
//! # Example
//!
//! ```
//! use stamper_formats::{resolve_format, FormatOptions, FormatRegistry, FormatSelection};
//! use stamper_input::DataArg;
//!
//! let registry = FormatRegistry::with_builtins();
//! let data = DataArg::from_arg(Some("items.json"));
//! let format = resolve_format(&registry, &FormatSelection::Auto, &data).unwrap();
//! assert_eq!(format.name(), "json");
//!
//! let options = FormatOptions::validate(format, ["array-name=items"]).unwrap();
//! let ctx = format.parse("[1, 2, 3]", &options).unwrap();
//! assert_eq!(ctx["items"], serde_json::json!([1, 2, 3]));
//! ```

mod error;
mod format;
pub mod formats;
mod options;
mod registry;
mod resolve;

pub use error::FormatError;
pub use format::{Context, FnFormat, Format};
pub use formats::{parse_dotenv, EnvFormat, IniFormat, JsonFormat, YamlFormat, ENV_FORMAT};
pub use options::{is_identifier, is_reserved_keyword, FormatOption, FormatOptions};
pub use registry::FormatRegistry;
pub use resolve::{resolve_format, FormatSelection, AUTO};
