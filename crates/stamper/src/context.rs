//! Building the template context.
//!
//! | format | data arg  | source                                       |
//! |--------|-----------|----------------------------------------------|
//! | env    | absent    | the live environment; no parsing             |
//! | any    | `-`       | stdin                                        |
//! | other  | absent    | stdin                                        |
//! | any    | path      | the file                                     |
//!
//! Reading stdin while it is a terminal fails with "no input supplied"
//! rather than waiting for keyboard input. The import policy runs last, on
//! whichever base mapping came out of the table above.

use std::collections::BTreeMap;

use serde_json::Value;
use stamper_formats::{Context, Format, FormatOptions, ENV_FORMAT};
use stamper_input::{read_file, read_stdin, DataArg, EnvReader, StdinReader};

use crate::Error;

/// What to do with environment variables after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportEnv {
    /// Leave the context alone.
    #[default]
    None,
    /// Copy every variable into the top level, overwriting parsed keys.
    TopLevel,
    /// Store the variables as one map under this key.
    Named(String),
}

impl ImportEnv {
    /// `None` when the flag is absent, `TopLevel` for an empty name.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => ImportEnv::None,
            Some("") => ImportEnv::TopLevel,
            Some(name) => ImportEnv::Named(name.to_string()),
        }
    }

    /// Merge `vars` into `ctx` according to the policy.
    pub fn apply(&self, ctx: &mut Context, vars: BTreeMap<String, String>) {
        match self {
            ImportEnv::None => {}
            ImportEnv::TopLevel => {
                tracing::debug!(count = vars.len(), "importing environment into top level");
                ctx.extend(vars.into_iter().map(|(k, v)| (k, Value::String(v))));
            }
            ImportEnv::Named(name) => {
                tracing::debug!(key = %name, count = vars.len(), "importing environment");
                ctx.insert(name.clone(), Value::Object(env_context(vars)));
            }
        }
    }
}

/// The environment as a context of string values.
pub fn env_context(vars: BTreeMap<String, String>) -> Context {
    vars.into_iter().map(|(k, v)| (k, Value::String(v))).collect()
}

/// Produces contexts from the process-level inputs.
pub struct ContextBuilder<'a> {
    stdin: &'a dyn StdinReader,
    env: &'a dyn EnvReader,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(stdin: &'a dyn StdinReader, env: &'a dyn EnvReader) -> Self {
        Self { stdin, env }
    }

    /// Obtain the input, parse it, and apply the import policy.
    pub fn build(
        &self,
        format: &dyn Format,
        options: &FormatOptions,
        data: &DataArg,
        import: &ImportEnv,
    ) -> Result<Context, Error> {
        let mut ctx = match data {
            DataArg::Absent if format.name() == ENV_FORMAT => {
                tracing::debug!("using the live environment as context");
                env_context(self.env.vars())
            }
            DataArg::Path(path) => format.parse(&read_file(path)?, options)?,
            DataArg::Absent | DataArg::Stdin => format.parse(&read_stdin(self.stdin)?, options)?,
        };
        if *import != ImportEnv::None {
            import.apply(&mut ctx, self.env.vars());
        }
        Ok(ctx)
    }
}
