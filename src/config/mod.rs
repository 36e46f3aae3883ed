//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → command-line overrides (main.rs)
//!     → RatesConfig (validated, immutable)
//!     → shared with the HTTP layer and the startup sequence
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AggregationConfig, DatabaseConfig, ListenerConfig, ObservabilityConfig, QueryDefaults,
    RatesConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
