//! assetwatch - serve a game directory and keep its asset manifest in sync.

mod cli;
mod config;
mod logger;
mod manifest;
mod utils;
mod watch;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, serve::DevServer};
use config::AppConfig;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Arc::new(AppConfig::load(&cli)?);

    match cli.resolved_command() {
        Commands::Generate => generate_once(&config),
        Commands::Serve { .. } => serve(config),
    }
}

/// Write the manifest and exit.
fn generate_once(config: &AppConfig) -> Result<()> {
    manifest::regenerate(config).context("manifest generation failed")?;
    Ok(())
}

/// Initial generation, then server and watcher until Ctrl+C.
fn serve(config: Arc<AppConfig>) -> Result<()> {
    // Setup Ctrl+C handler before any blocking operations
    let shutdown_rx = cli::serve::setup_shutdown_handler()?;

    let dev_server = start(config)?;
    crate::debug!("serve"; "listening on {}, Ctrl+C to stop", dev_server.addr());

    let _ = shutdown_rx.recv();
    dev_server.shutdown();
    Ok(())
}

/// Generate once, then bind the server and start the watcher.
///
/// A failed startup generation is fatal and nothing is bound;
/// later failures are handled by the watcher.
fn start(config: Arc<AppConfig>) -> Result<DevServer> {
    manifest::regenerate(&config).context("initial manifest generation failed")?;
    DevServer::start(config)
}
