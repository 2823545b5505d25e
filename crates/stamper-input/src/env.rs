//! Process-level inputs behind traits.
//!
//! A render touches two pieces of process state: standard input (read once,
//! and only if it is not a terminal) and the environment variable table
//! (read, never written). [`StdinReader`] and [`EnvReader`] put both behind
//! a seam so the pipeline can run against [`MockStdin`] and [`MockEnv`].

use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Read};

/// Source of the standard input stream.
pub trait StdinReader: Send + Sync {
    /// `true` for an interactive terminal, `false` for a pipe or redirect.
    fn is_terminal(&self) -> bool;

    /// Drain the stream.
    fn read_to_string(&self) -> io::Result<String>;
}

/// Read-only view of the environment variable table.
pub trait EnvReader: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;

    /// Every variable, ordered by name.
    fn vars(&self) -> BTreeMap<String, String>;
}

/// The process's own stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealStdin;

impl StdinReader for RealStdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_to_string(&self) -> io::Result<String> {
        let mut text = String::new();
        io::stdin().lock().read_to_string(&mut text)?;
        Ok(text)
    }
}

/// The process's own environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped by
/// [`vars`](EnvReader::vars) and reported as unset by [`var`](EnvReader::var).
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn vars(&self) -> BTreeMap<String, String> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// A scripted stdin: either an interactive terminal or a pipe carrying
/// fixed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockStdin {
    Terminal,
    Piped(String),
}

impl MockStdin {
    pub fn terminal() -> Self {
        MockStdin::Terminal
    }

    pub fn piped(text: impl Into<String>) -> Self {
        MockStdin::Piped(text.into())
    }
}

impl StdinReader for MockStdin {
    fn is_terminal(&self) -> bool {
        matches!(self, MockStdin::Terminal)
    }

    fn read_to_string(&self) -> io::Result<String> {
        match self {
            MockStdin::Terminal => Ok(String::new()),
            MockStdin::Piped(text) => Ok(text.clone()),
        }
    }
}

/// A fixed environment table.
///
/// ```
/// use stamper_input::{EnvReader, MockEnv};
///
/// let env: MockEnv = [("NGINX_HOSTNAME", "localhost")].into_iter().collect();
/// assert_eq!(env.var("NGINX_HOSTNAME").as_deref(), Some("localhost"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: BTreeMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MockEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |env, (k, v)| env.with_var(k, v))
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn vars(&self) -> BTreeMap<String, String> {
        self.vars.clone()
    }
}
