//! Ticketmaster service entry point.
//!
//! Configuration precedence, lowest to highest: built-in defaults, the
//! config file, `TICKETMASTER_*` environment variables, command-line flags.

use std::path::PathBuf;

use anyhow::Context;
use ticketmaster_executor::{Config, Database, Executor, CONFIG_FILE_NAME};
use ticketmaster_server::commands::build_cli;
use ticketmaster_server::logging::init_tracing;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    let explicit_config = matches.get_one::<PathBuf>("config").cloned();
    let config_path = explicit_config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if matches.get_flag("init-config") {
        Config::write_default_if_missing(&config_path)?;
        println!("Config file ready at {}", config_path.display());
        return Ok(());
    }

    // An explicitly named file must exist; the default one may not.
    let mut config = match explicit_config {
        Some(path) => Config::from_file(&path)?,
        None => Config::load_or_default(&config_path)?,
    };
    config.apply_env_overrides()?;
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.server.bind = bind.clone();
    }

    init_tracing(&config.logging)?;

    let db = Database::open(&config.storage).context("failed to open document store")?;
    let executor = Executor::new(&db);

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(
        target: "ticketmaster::server",
        addr = %listener.local_addr()?,
        storage = %config.storage.mode,
        "Listening"
    );

    ticketmaster_server::serve(listener, executor, shutdown_signal()).await?;
    info!(target: "ticketmaster::server", "Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(target: "ticketmaster::server", error = %e, "Failed to listen for ctrl-c");
        return;
    }
    info!(target: "ticketmaster::server", "Received ctrl-c, draining requests");
}
