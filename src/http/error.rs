//! Mapping of request failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::http::params::ParamError;
use crate::observability::metrics;
use crate::store::StoreError;
use crate::tokens::{PipelineError, TokenError};

/// Any failure while serving a rates request. Body is `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Params(#[from] ParamError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Token(e) => ApiError::Token(e),
            PipelineError::Store(e) => ApiError::Store(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Params(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Token(TokenError::InvalidCharacters { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Token(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Data store request failed");
                "Failed to read rates from the data store".to_string()
            }
            ApiError::Token(e) => {
                tracing::info!(side = %e.side(), kind = e.kind(), detail = %e, "Rejected token");
                metrics::record_validation_failure(e.side().as_str(), e.kind());
                e.to_string()
            }
            ApiError::Params(e) => {
                tracing::info!(detail = %e, "Rejected query parameters");
                metrics::record_validation_failure("params", "malformed");
                e.to_string()
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
