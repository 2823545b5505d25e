//! # stamper-render
//!
//! Template rendering for stamper, backed by MiniJinja.
//!
//! - [`Engine`] loads templates by file path and renders them against a
//!   serializable context.
//! - [`EngineSettings`] picks [`Undefined`] handling and carries an optional
//!   [`Customization`] (delimiters and whitespace control from a YAML file).
//! - [`Extensions`] collects filters, tests and global functions from the
//!   built-ins ([`builtin_extensions`]) and from plugins.
//! - [`RenderError`] is the error type for all of the above.
//!
//! ```rust
//! use std::sync::Arc;
//! use stamper_input::MockEnv;
//! use stamper_render::{builtin_extensions, Engine, EngineSettings};
//!
//! let env = MockEnv::new().with_var("USER", "kolypto");
//! let engine = Engine::new(".", &EngineSettings::default(), &builtin_extensions(Arc::new(env))).unwrap();
//! let out = engine.render_str(r#"{{ "USER"|env }} / {{ env("HOME", "~") }}"#, &()).unwrap();
//! assert_eq!(out, "kolypto / ~");
//! ```

mod customize;
mod engine;
mod error;
mod extensions;
mod filters;

pub use customize::Customization;
pub use engine::{template_path, Engine, EngineSettings, Undefined};
pub use error::RenderError;
pub use extensions::{
    filter_fn, global_fn, test_fn, Extensions, FilterFn, Filters, GlobalFn, Globals, TestFn,
    Tests,
};
pub use filters::builtin_extensions;

/// MiniJinja types extensions are written against.
pub use minijinja::{Error as TemplateError, ErrorKind as TemplateErrorKind, Value};
