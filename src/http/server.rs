//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind server to listener
//! - Stop gracefully on the lifecycle shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{QueryDefaults, RatesConfig};
use crate::http::handlers::{get_rates, health, root, track_metrics};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::signals::shutdown_signal;
use crate::rates::RateService;
use crate::regions::ReferenceData;
use crate::store::RegionSource;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Location codes and descendant index, read-only after startup.
    pub reference: Arc<ReferenceData>,
    /// Per-request region → location code lookups.
    pub regions: Arc<dyn RegionSource>,
    pub rates: RateService,
    pub defaults: QueryDefaults,
}

/// HTTP server for the rates API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: RatesConfig, state: AppState) -> Self {
        Self {
            router: build_router(&config, state),
        }
    }

    /// Run the server until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                    _ = shutdown_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RatesConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/rates", get(get_rates))
        .route("/rates/", get(get_rates))
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(set_request_id_layer())
}
