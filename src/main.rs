//! Aurora Ring - space-weather severity ring
//!
//! Polls the NOAA SWPC feeds every interval, drives the 24-pixel severity ring,
//! and raises an alert whenever a severity score rises.
//!
//! # Usage
//!
//! ```bash
//! # Poll forever with ./aurora.toml or built-in defaults
//! cargo run --release
//!
//! # One cycle, then exit
//! cargo run --release -- --once
//!
//! # Explicit config and a faster interval
//! ./aurora-ring --config /etc/aurora/aurora.toml --interval 30
//! ```
//!
//! # Environment Variables
//!
//! - `AURORA_CONFIG`: Path to the TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use aurora_ring::acquisition::{FieldFetcher, HttpTransport};
use aurora_ring::config::AuroraConfig;
use aurora_ring::display::{ConsoleRing, DisplaySink, NullDisplay};
use aurora_ring::notify::{LogNotifier, NotificationSink, WebhookNotifier};
use aurora_ring::pipeline::PollLoop;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "aurora-ring")]
#[command(about = "Space-weather severity ring and rising-edge alerts")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides AURORA_CONFIG and ./aurora.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Override the poll interval (seconds)
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,
}

// ============================================================================
// Setup
// ============================================================================

fn load_config(args: &CliArgs) -> Result<AuroraConfig> {
    let mut config = match args.config {
        Some(ref path) => AuroraConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AuroraConfig::load(),
    };

    if let Some(secs) = args.interval {
        config.poll.interval_secs = secs;
        config
            .validate()
            .context("Invalid --interval override")?;
    }

    Ok(config)
}

fn build_display(config: &AuroraConfig) -> Box<dyn DisplaySink> {
    if config.display.console {
        Box::new(ConsoleRing::new())
    } else {
        Box::new(NullDisplay)
    }
}

fn build_notifier(config: &AuroraConfig) -> Box<dyn NotificationSink> {
    match config.notify.webhook_url {
        Some(ref url) => match WebhookNotifier::new(url) {
            Ok(sink) => {
                info!("Alerts: webhook");
                Box::new(sink)
            }
            Err(e) => {
                warn!(error = %e, "Webhook client unavailable, alerts will be logged");
                Box::new(LogNotifier)
            }
        },
        None => {
            info!("Alerts: log (no webhook configured)");
            Box::new(LogNotifier)
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Aurora Ring - space-weather severity display");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let transport =
        HttpTransport::new(&config.feeds).context("Failed to build feed HTTP client")?;
    let fetcher = FieldFetcher::new(transport, config.feeds.clone());

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, finishing current cycle...");
        shutdown_token.cancel();
    });

    let mut poll_loop = PollLoop::new(
        fetcher,
        build_display(&config),
        build_notifier(&config),
        cancel_token,
    )
    .with_interval(config.poll.interval())
    .with_ranges(config.scales);

    if args.once {
        let report = poll_loop
            .run_cycle()
            .await
            .context("Severity scale misconfigured")?;
        info!(
            failed_groups = report.failed_groups.len(),
            alerted = report.message.is_some(),
            "✓ Single cycle complete"
        );
        return Ok(());
    }

    let stats = poll_loop
        .run()
        .await
        .context("Poll loop stopped on a severity scale error")?;

    info!(cycles = stats.cycles, "✓ Aurora Ring shutdown complete");
    Ok(())
}
