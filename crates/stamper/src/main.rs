use std::io;
use std::process::ExitCode;

use console::style;
use stamper::{App, Error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log filter variable, e.g. `STAMPER_LOG=debug`.
const LOG_ENV: &str = "STAMPER_LOG";

fn main() -> ExitCode {
    init_tracing();

    let result = App::from_process().and_then(|app| {
        let stdout = io::stdout();
        app.run(std::env::args_os(), &mut stdout.lock(), &mut io::stderr())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn report(err: &Error) {
    match err {
        // clap prints its own "error:" prefix and usage line.
        Error::Usage(usage) => {
            let _ = usage.print();
        }
        other => eprintln!("{} {}", style("error:").for_stderr().red().bold(), other),
    }
}
