//! One invocation, start to finish.
//!
//! [`App`] owns every process-level input (working directory, stdin,
//! environment, plugins) so the whole pipeline can run in-process against
//! mocks:
//!
//! 1. parse arguments;
//! 2. resolve the format and validate its options;
//! 3. build the context and let plugins alter it;
//! 4. build the engine, let plugins configure it, render;
//! 5. write the result.
//!
//! Nothing is written to the output destination unless rendering succeeded.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use stamper_formats::{resolve_format, Format, FormatOptions, ENV_FORMAT};
use stamper_input::{DataArg, EnvReader, RealEnv, RealStdin, StdinReader, STDIN_ARG};
use stamper_render::{Customization, Engine, EngineSettings, RenderError, Undefined};

use crate::cli::Cli;
use crate::context::ContextBuilder;
use crate::output::OutputDestination;
use crate::plugin::{Plugin, PluginSet};
use crate::version::banner;
use crate::Error;

/// The stamper application.
pub struct App {
    cwd: PathBuf,
    stdin: Arc<dyn StdinReader>,
    env: Arc<dyn EnvReader>,
    plugins: PluginSet,
}

impl App {
    /// An app rooted at `cwd`, reading the real stdin and environment.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            stdin: Arc::new(RealStdin),
            env: Arc::new(RealEnv),
            plugins: PluginSet::new(),
        }
    }

    /// An app rooted at the process working directory.
    pub fn from_process() -> Result<Self, Error> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn with_stdin(mut self, stdin: impl StdinReader + 'static) -> Self {
        self.stdin = Arc::new(stdin);
        self
    }

    pub fn with_env(mut self, env: impl EnvReader + 'static) -> Self {
        self.env = Arc::new(env);
        self
    }

    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.register(plugin);
        self
    }

    pub fn plugins(&self) -> &PluginSet {
        &self.plugins
    }

    /// Run with `args` (program name first).
    ///
    /// Rendered text (or the version banner) goes to `stdout` unless an
    /// output file was requested; the informational banner goes to `stderr`.
    pub fn run<I, T>(&self, args: I, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let cli = match Cli::try_parse_from(&args) {
            Ok(cli) => cli,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                write!(stdout, "{}", err.render())?;
                return Ok(());
            }
            Err(err) => return Err(Error::Usage(err)),
        };

        let identities = self.plugins.identities();
        if cli.version {
            stdout.write_all(banner(&identities).as_bytes())?;
            return Ok(());
        }
        let Some(template) = cli.template.as_deref() else {
            return Err(Error::Usage(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "the template argument is required",
            )));
        };
        if !cli.quiet {
            stderr.write_all(banner(&identities).as_bytes())?;
        }

        let registry = self.plugins.registry();
        let data = DataArg::from_arg(cli.data.as_ref()).relative_to(&self.cwd);
        let format = resolve_format(&registry, &cli.format, &data)?;
        let options = FormatOptions::validate(format, &cli.format_options)?;

        let settings = EngineSettings {
            undefined: if cli.undefined {
                Undefined::Lenient
            } else {
                Undefined::Strict
            },
            customization: match &cli.customize {
                Some(path) => Customization::load(&self.cwd.join(path))?,
                None => Customization::default(),
            },
        };

        let ctx = ContextBuilder::new(self.stdin.as_ref(), self.env.as_ref()).build(
            format,
            &options,
            &data,
            &cli.import_policy(),
        )?;
        let ctx = self.plugins.alter_context(ctx);

        let extensions = self.plugins.extensions(Arc::clone(&self.env));
        let mut engine = Engine::new(&self.cwd, &settings, &extensions)?;
        self.plugins.configure_engine(&mut engine);
        let rendered = engine
            .render(&template.to_string_lossy(), &ctx)
            .map_err(|err| self.explain(err, format, &data, &args))?;

        let destination = OutputDestination::from_arg(cli.output_file.as_deref(), &self.cwd);
        destination
            .write_text(&rendered, stdout)
            .map_err(|source| match &destination {
                OutputDestination::File(path) => Error::Output {
                    path: path.clone(),
                    source,
                },
                OutputDestination::Stdout => Error::Io(source),
            })
    }

    /// Attach the pipe hint to an undefined-variable error when the user
    /// most likely meant to pipe a dotenv file without passing `-`.
    fn explain(&self, err: RenderError, format: &dyn Format, data: &DataArg, args: &[OsString]) -> Error {
        let wants_hint = matches!(err, RenderError::UndefinedVariable(_))
            && format.name() == ENV_FORMAT
            && data.is_absent()
            && !self.stdin.is_terminal();
        if wants_hint {
            Error::Hinted {
                error: err,
                hint: pipe_hint(args),
            }
        } else {
            Error::Render(err)
        }
    }
}

fn pipe_hint(args: &[OsString]) -> String {
    let command = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stamper".to_string());
    let mut invocation = vec![command];
    invocation.extend(args.iter().skip(1).map(|a| a.to_string_lossy().into_owned()));
    invocation.push(STDIN_ARG.to_string());
    format!(
        "If you're trying to pipe a .env file, please run me with a '-' as the data file name:\n$ {}",
        invocation.join(" ")
    )
}
