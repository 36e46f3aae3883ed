//! Freight rate averages between locations and regions.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rates;
pub mod regions;
pub mod store;
pub mod tokens;

pub use config::RatesConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
