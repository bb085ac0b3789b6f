pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod navigator;

use std::io;
use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use actions::Action;
use dispatch::Globals;

/// Parse the command line into the shared options and the action to run
pub fn start() -> Result<(Globals, Action)> {
    let matches = commands::new().get_matches();
    let globals = dispatch::globals(&matches)?;
    let action = dispatch::handler(&matches)?;
    Ok((globals, action))
}

/// Initialize the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `-v`. When logging to a file the
/// returned guard must be held until exit so buffered lines are flushed.
pub fn init_tracing(verbosity: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            Ok(None)
        }
    }
}
