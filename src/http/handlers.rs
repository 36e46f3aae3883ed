//! Route handlers.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::Request,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::http::params::{ParamError, RatesParams};
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::rates::DailyRate;
use crate::tokens::validate_endpoints;

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "regions": state.reference.region_count(),
        "location_codes": state.reference.location_code_count(),
    }))
}

/// `GET /rates?date_from&date_to&origin&destination`
///
/// Parameters are checked for format first, then origin and destination are
/// validated and resolved in that order, and finally the store is queried.
pub async fn get_rates(
    State(state): State<AppState>,
    params: Result<Query<RatesParams>, QueryRejection>,
) -> Result<Json<Vec<DailyRate>>, ApiError> {
    let Query(params) = params.map_err(|e| ParamError::Malformed(e.body_text()))?;
    let request = params.into_request(&state.defaults)?;

    let endpoints = validate_endpoints(
        &request.origin,
        &request.destination,
        &state.reference,
        state.regions.as_ref(),
    )
    .await?;

    let rates = state
        .rates
        .rates(
            request.date_from,
            request.date_to,
            endpoints.origin,
            endpoints.destination,
        )
        .await?;

    tracing::debug!(
        origin = %request.origin,
        destination = %request.destination,
        days = rates.len(),
        "Rates served"
    );

    Ok(Json(rates))
}

/// Records request count and latency for every response.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    metrics::record_request(status, start_time);
    tracing::debug!(
        request_id = %request_id,
        path = %path,
        status,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request completed"
    );
    response
}
