//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use stamper_formats::{FormatSelection, AUTO};

use crate::context::ImportEnv;

/// Render a Jinja template with data from a file, stdin, or the environment.
#[derive(Debug, Parser)]
#[command(
    name = "stamper",
    about = "Command-line interface to Jinja templates for shell scripts",
    disable_version_flag = true
)]
pub struct Cli {
    /// Display the version of this program and any registered plugins.
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,

    /// Input data format; `auto` infers it from the data file name.
    #[arg(short = 'f', long, value_name = "NAME", default_value = AUTO)]
    pub format: FormatSelection,

    /// Option for the data parser, `name` or `name=value`. Repeatable.
    #[arg(long = "format-option", value_name = "OPTION")]
    pub format_options: Vec<String>,

    /// Import environment variables as `VAR`. Without a name they are
    /// imported into the top level.
    ///
    /// The name is optional, so `-e t.j2` reads `t.j2` as the name. Write
    /// `--import-env=` or put `-e` after the template and data arguments.
    #[arg(
        short = 'e',
        long = "import-env",
        value_name = "VAR",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub import_env: Option<String>,

    /// Allow undefined variables in templates; they render as empty strings.
    #[arg(long)]
    pub undefined: bool,

    /// Suppress informational messages.
    #[arg(long)]
    pub quiet: bool,

    /// Write the result to a file instead of stdout.
    #[arg(short = 'o', long = "output-file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// YAML file with template syntax settings.
    #[arg(long, value_name = "PATH")]
    pub customize: Option<PathBuf>,

    /// Template file to process.
    #[arg(required_unless_present = "version")]
    pub template: Option<PathBuf>,

    /// Input data file; `-` reads stdin.
    pub data: Option<PathBuf>,
}

impl Cli {
    /// The environment import policy these arguments ask for.
    pub fn import_policy(&self) -> ImportEnv {
        ImportEnv::from_arg(self.import_env.as_deref())
    }
}
