//! awwdio - a terminal client for the awwdio video room service.
//!
//! Signs in with a one-time password, keeps the session between runs, and
//! sends authenticated requests to the awwdio API.

mod cli;

use anyhow::{Context, Result};
use awwdio_core::{AppContext, Config, Environment};
use tracing::{debug, info};

use cli::actions::Action;
use cli::navigator::TerminalNavigator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let (globals, action) = cli::start()?;
    let _log_guard = cli::init_tracing(globals.verbosity, globals.log_file.as_deref())?;
    info!("awwdio starting");

    // Design tokens need neither configuration nor a session
    if let Action::Theme { tailwind } = action {
        return cli::actions::theme(tailwind);
    }

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = globals.api_url {
        config.api_base_url = url;
    }
    if let Some(storage) = globals.storage {
        config.storage = storage;
    }
    debug!(api = %config.api_base_url, storage = ?config.storage, "Configuration loaded");

    if let Action::Config { save } = action {
        return cli::actions::config(&config, save);
    }

    let storage = config.open_storage().context("Failed to open session storage")?;
    let ctx = AppContext::new(config, storage, Environment::interactive(TerminalNavigator))
        .context("Failed to create HTTP client")?;

    let result = cli::actions::run(action, &ctx).await;
    info!("awwdio shutting down");
    result
}
