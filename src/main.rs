//! ValueCraft Server Binary
//!
//! Starts the ValueCraft web server that provides the REST API for the
//! value-assessment flow builder frontend, serving both the build (author)
//! and present (viewer) modes.
//!
//! # Usage
//!
//! ```bash
//! # Start with configured defaults (port 3001, platform data directory)
//! valuecraft
//!
//! # Specify port and bundle storage directory
//! valuecraft --port 8080 --data-dir ~/my-projects
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valuecraft::config::Config;
use valuecraft::constants::{APP_NAME, DEMO_PROJECT_ID};
use valuecraft::web;

/// ValueCraft Server - REST API for the value-assessment flow builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Directory holding published project bundles.
    /// Defaults to the platform-specific projects directory:
    /// - Linux: ~/.config/ValueCraft/projects/
    /// - macOS: ~/Library/Application Support/ValueCraft/projects/
    /// - Windows: %APPDATA%\ValueCraft\projects\
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load or create configuration, then apply CLI overrides
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid host/port combination")?;

    tracing::info!(
        "{} serving build mode at /api/build and present mode at /api/present (demo project: {})",
        APP_NAME,
        DEMO_PROJECT_ID
    );

    web::run_server(config, addr).await
}
