// src/main.rs

mod cli;
mod config;
mod dataset;
mod engine;
mod errors;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use cli::Cli;
use config::Config;
use tui::tracing_layer::UiLogCollectorLayer;
use tui::{run_tui, UiLogEntry};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first: the config override and the log settings
    // both feed subscriber setup.
    let cli_args = Cli::parse();

    let config = match Config::load(cli_args.config.as_deref()) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            if cli_args.config.is_some() {
                // An explicitly named config that does not load is fatal.
                return Err(e);
            }
            eprintln!("No usable configuration found ({e:#}); using defaults");
            Arc::new(Config::default())
        }
    };

    // Logs go to a rotated file plus the in-app log view; stdout stays
    // clean for the TUI and for the headless commands' output.
    // RUST_LOG=rowscope=trace,warn overrides the configured level.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let log_dir = shellexpand::tilde(&config.logging.log_dir).into_owned();
    let file_appender = if config.logging.rotate_daily {
        tracing_appender::rolling::daily(&log_dir, "rowscope.log")
    } else {
        tracing_appender::rolling::never(&log_dir, "rowscope.log")
    };
    let (log_writer, _log_guard) = tracing_appender::non_blocking(file_appender);

    let (log_tx, log_rx) = mpsc::unbounded_channel::<UiLogEntry>();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer)
                .with_ansi(false),
        )
        .with(UiLogCollectorLayer::new(log_tx))
        .init();

    info!("Starting rowscope...");
    debug!("Loaded app config: {:?}", config);

    if let Some(command) = cli_args.command {
        info!("Handling CLI command...");
        return cli::handle_command(command, Arc::clone(&config)).await;
    }

    let data_path = cli_args
        .data
        .clone()
        .or_else(|| config.dataset.default_path.as_ref().map(PathBuf::from));

    match data_path {
        Some(path) if !cli_args.headless => {
            info!("Launching TUI for {}", path.display());
            run_tui(Arc::clone(&config), path, log_rx).await?;
        }
        Some(path) => {
            info!("Headless mode, no command. Exiting.");
            println!(
                "rowscope running headless; nothing to do for {}. Try a subcommand.",
                path.display()
            );
        }
        None => {
            warn!("No data file given and no dataset.default_path configured");
            anyhow::bail!(
                "no data file given; pass FILE on the command line or set dataset.default_path"
            );
        }
    }

    info!("rowscope shutting down.");
    Ok(())
}
