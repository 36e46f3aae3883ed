//! Freight Rates API (v1)
//!
//! Serves daily average shipping prices between an origin and a destination,
//! each given as a 5-letter location code or a region slug.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────────┐
//!                       │                    FREIGHT RATES                     │
//!   GET /rates          │  ┌─────────┐    ┌──────────┐    ┌────────────────┐   │
//!   ────────────────────┼─▶│  http   │───▶│  tokens  │───▶│     rates      │   │
//!                       │  │ params  │    │ validate │    │    service     │   │
//!                       │  └─────────┘    └────┬─────┘    └───────┬────────┘   │
//!                       │                      │                  │            │
//!                       │                      ▼                  ▼            │
//!                       │              ┌──────────────┐   ┌──────────────┐     │
//!                       │              │   regions    │   │    store     │─────┼──▶ SQLite
//!                       │              │ (read-only   │   │ (parameter-  │     │
//!                       │              │  index)      │   │  ized SQL)   │     │
//!                       │              └──────────────┘   └──────────────┘     │
//!                       │                                                      │
//!                       │  config · observability · lifecycle                  │
//!                       └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use freight_rates::config::{load_config, RatesConfig};
use freight_rates::lifecycle::{self, Shutdown};
use freight_rates::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "freight-rates")]
#[command(about = "HTTP API for daily freight rate averages", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides the config file).
    #[arg(short, long)]
    database: Option<String>,

    /// Bind address (overrides the config file).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => RatesConfig::default(),
    };
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability.log_level);

    tracing::info!("freight-rates v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path,
        min_records = config.aggregation.min_records,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    if let Err(e) = lifecycle::run(config, &shutdown).await {
        tracing::error!(error = %e, "Rates service failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
