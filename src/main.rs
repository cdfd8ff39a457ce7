// Hide console window in release builds (Windows GUI app)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod app;
mod cli;
mod config;
mod context;
mod debounce;
mod fetch;
mod models;
mod router;
mod state;
mod store;
mod ui;
mod util;
mod views;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;
use crate::context::AppContext;

/// Default log filter: chatty for the window, quiet for terminal commands
fn default_filter(cli_mode: bool, verbose: bool) -> &'static str {
    match (cli_mode, verbose) {
        (_, true) => "ertflix=debug,info",
        (true, false) => "ertflix=warn",
        (false, false) => "ertflix=debug,info",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                default_filter(cli.command.is_some(), cli.output.verbose).into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(command) = cli.command {
        return cli::run(command, &cli.output).await;
    }

    tracing::info!("Starting Ertflix");

    let config = Config::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let ctx = AppContext::from_config(&config)?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 760.0])
        .with_min_inner_size([640.0, 480.0])
        .with_title("Ertflix");

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Ertflix",
        native_options,
        Box::new(|cc| Ok(Box::new(app::ErtflixApp::new(cc, config, ctx)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false, false), "ertflix=debug,info");
        assert_eq!(default_filter(true, false), "ertflix=warn");
        assert_eq!(default_filter(true, true), "ertflix=debug,info");
    }
}
