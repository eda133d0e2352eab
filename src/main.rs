//! SetPebble Companion Bridge
//!
//! Relays a JSON settings blob between the SetPebble configuration service
//! and the host device:
//!
//! - On a watch app trigger, replay the last cached settings and refresh
//!   from the service in the background
//! - On request, open the configuration page in the host web view
//! - When the page closes, persist its response as the new cache and
//!   forward it to the watch
//!
//! Host events arrive as JSON lines on stdin; outgoing frames leave on
//! stdout. Sync failures never block the watch: they are observed, logged,
//! and dropped.

mod bridge;
mod config;
mod host;
mod platform;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bridge::Bridge;
use config::{get_or_create_account_token, Settings};
use host::{run_event_loop, StdioHost};
use store::FileStore;

/// SetPebble Companion Bridge
#[derive(Parser, Debug)]
#[command(name = "setpebble-bridge")]
#[command(version, about = "SetPebble settings bridge for wearable companions")]
struct Args {
    /// Integration token within the SetPebble namespace
    #[arg(short, long, env = "SETPEBBLE_TOKEN")]
    token: Option<String>,

    /// Account identifier override
    #[arg(short, long, env = "SETPEBBLE_ACCOUNT")]
    account: Option<String>,

    /// Base URL of the SetPebble service
    #[arg(long, env = "SETPEBBLE_BASE_URL")]
    base_url: Option<String>,

    /// Directory for the settings cache
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, env = "SETPEBBLE_DEBUG")]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging. Logs go to stderr: stdout carries host frames.
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SetPebble bridge"
    );

    // Load settings
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path).await?,
        None => Settings::load().await?,
    };

    // Override settings from CLI
    if let Some(token) = &args.token {
        settings.token = token.clone();
    }
    if let Some(url) = &args.base_url {
        settings.base_url = url.clone();
    }
    if let Some(account) = &args.account {
        settings.account_token = Some(account.clone());
    }

    // Resolve the account identifier: override, or persisted identity
    let account = match settings.account_token.clone() {
        Some(account) => account,
        None => get_or_create_account_token().await?.as_str(),
    };

    let store = FileStore::new(args.cache_dir.clone().unwrap_or_else(platform::cache_dir));
    let host = StdioHost::new(account);

    let bridge = Bridge::new(&settings.token, &settings.base_url, store, host)
        .context("Failed to create settings bridge")?;

    tracing::info!(
        token = %settings.token,
        base_url = %settings.base_url,
        "Bridge ready, waiting for host events"
    );

    run_event_loop(&bridge).await
}
