//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the rates service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the rates service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RatesConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Backing SQLite database.
    pub database: DatabaseConfig,

    /// Daily average aggregation policy.
    pub aggregation: AggregationConfig,

    /// Query parameter defaults for `GET /rates`.
    pub defaults: QueryDefaults,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file holding regions, ports and prices.
    pub path: String,

    /// Create missing tables on startup. Existing tables are left alone.
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "rates.db".to_string(),
            create_schema: true,
        }
    }
}

/// Aggregation policy for daily averages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Minimum contributing price records for a day's average to be reported.
    pub min_records: u32,

    /// Decimal places the average is rounded to.
    pub decimal_places: u32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            min_records: 4,
            decimal_places: 2,
        }
    }
}

/// Defaults applied when a query parameter is absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryDefaults {
    pub date_from: String,
    pub date_to: String,
    pub origin: String,
    pub destination: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            date_from: "2016-01-01".to_string(),
            date_to: "2016-01-10".to_string(),
            origin: "CNSGH".to_string(),
            destination: "north_europe_main".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
