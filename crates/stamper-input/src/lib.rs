//! Data acquisition for stamper.
//!
//! `stamper-input` owns every interaction with the process boundary that the
//! rendering pipeline needs: reading standard input, reading a data file, and
//! reading (never writing) environment variables.
//!
//! # Architecture
//!
//! The crate is built around two reader traits, [`StdinReader`] and
//! [`EnvReader`], with real and mock implementations. The data argument is
//! classified once into a [`DataArg`].
//!
//! ```text
//! stamper tmpl.j2            → DataArg::Absent
//! stamper tmpl.j2 -          → DataArg::Stdin
//! stamper tmpl.j2 data.json  → DataArg::Path("data.json")
//! ```
//!
//! # Testing
//!
//! ```
//! use stamper_input::{read_stdin, MockStdin};
//!
//! let text = read_stdin(&MockStdin::piped("A=1")).unwrap();
//! assert_eq!(text, "A=1");
//! ```

pub mod env;
mod error;
mod source;

pub use env::{EnvReader, MockEnv, MockStdin, RealEnv, RealStdin, StdinReader};
pub use error::InputError;
pub use source::{read_file, read_stdin, DataArg, STDIN_ARG};
