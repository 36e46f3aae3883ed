//! Freight rate aggregation.

pub mod service;
pub mod types;

pub use service::RateService;
pub use types::{aggregate_daily, DailyRate, PriceRecord, RateQuery};
