//! # stamper
//!
//! Render a Jinja template from the command line, with data taken from a
//! JSON, YAML, INI or dotenv file, from stdin, or from the environment.
//!
//! ```text
//! $ stamper nginx.conf.j2 nginx.json > nginx.conf
//! $ stamper --format=env nginx.conf.j2 - < prod.env
//! $ NGINX_HOSTNAME=localhost stamper nginx.conf.j2
//! ```
//!
//! The binary is a thin wrapper around [`App`], which can also be embedded
//! and extended with [`Plugin`]s:
//!
//! ```rust
//! use stamper::App;
//! use stamper_input::{MockEnv, MockStdin};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("t.j2"), "Hello, {{ NAME }}!").unwrap();
//!
//! let app = App::new(dir.path())
//!     .with_stdin(MockStdin::terminal())
//!     .with_env(MockEnv::new().with_var("NAME", "World"));
//!
//! let mut out = Vec::new();
//! app.run(["stamper", "--quiet", "t.j2"], &mut out, &mut std::io::sink()).unwrap();
//! assert_eq!(out, b"Hello, World!");
//! ```
//!
//! ## Exit status
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | any other failure |
//! | 2 | unknown `--format-option` |
//! | 3 | `--format-option` not applicable to the input |
//! | 4 | invalid `--format-option` value |

mod app;
pub mod cli;
mod context;
mod error;
mod output;
mod plugin;
mod version;

pub use app::App;
pub use cli::Cli;
pub use context::{env_context, ContextBuilder, ImportEnv};
pub use error::{
    Error, EXIT_FAILURE, EXIT_OPTION_UNKNOWN, EXIT_OPTION_UNSUPPORTED, EXIT_OPTION_VALUE,
};
pub use output::OutputDestination;
pub use plugin::{Plugin, PluginSet};
pub use version::{banner, VERSION};
