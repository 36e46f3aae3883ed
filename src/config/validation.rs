//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, minimum record count >= 1)
//! - Check that query defaults would themselves pass request validation
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RatesConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RatesConfig;
use crate::http::params::{parse_date, token_length_ok};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid socket address for {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },

    #[error("{field} is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field} must be 5 to 20 characters: {value}")]
    InvalidToken { field: &'static str, value: String },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RatesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }

    if config.aggregation.min_records == 0 {
        errors.push(ValidationError::Zero { field: "aggregation.min_records" });
    }

    if config.aggregation.decimal_places > 10 {
        errors.push(ValidationError::OutOfRange {
            field: "aggregation.decimal_places",
            value: config.aggregation.decimal_places,
        });
    }

    for (field, value) in [
        ("defaults.date_from", &config.defaults.date_from),
        ("defaults.date_to", &config.defaults.date_to),
    ] {
        if parse_date(value).is_none() {
            errors.push(ValidationError::InvalidDate { field, value: value.clone() });
        }
    }

    for (field, value) in [
        ("defaults.origin", &config.defaults.origin),
        ("defaults.destination", &config.defaults.destination),
    ] {
        if !token_length_ok(value) {
            errors.push(ValidationError::InvalidToken { field, value: value.clone() });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
