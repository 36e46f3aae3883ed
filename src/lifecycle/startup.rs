//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter
//! - Open the data store
//! - Load reference data and build the descendant index
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Reference data is fully loaded before the listener is bound

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RatesConfig;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::rates::RateService;
use crate::regions::{LoadError, ReferenceData};
use crate::store::{RateStore, RegionSource, SqliteStore, StoreError};

/// Errors that prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open data store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Load reference data from `store` and assemble the handler state.
pub async fn build_state<S>(config: &RatesConfig, store: Arc<S>) -> Result<AppState, LoadError>
where
    S: RegionSource + RateStore + 'static,
{
    let reference = ReferenceData::load(store.as_ref()).await?;
    metrics::record_reference_data(reference.region_count(), reference.location_code_count());

    Ok(AppState {
        reference: Arc::new(reference),
        regions: store.clone(),
        rates: RateService::new(store, config.aggregation.clone()),
        defaults: config.defaults.clone(),
    })
}

/// Open the SQLite store named in the config.
pub async fn open_store(config: &RatesConfig) -> Result<Arc<SqliteStore>, StoreError> {
    let store = SqliteStore::open(Path::new(&config.database.path))?;
    if config.database.create_schema {
        store.init_schema().await?;
        tracing::info!("Database schema ensured");
    }
    Ok(Arc::new(store))
}

/// Start every subsystem and serve until shutdown.
pub async fn run(config: RatesConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    // The recorder must exist before reference data gauges are set.
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = open_store(&config).await?;
    let state = build_state(&config, store).await?;

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let server = HttpServer::new(config, state);
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
