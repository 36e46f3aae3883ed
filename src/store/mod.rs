//! External collaborators: the region source and the rate data store.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RegionSource::regions()         → regions::ReferenceData (descendant index)
//!     RegionSource::location_codes()  → regions::ReferenceData (code set)
//!
//! Per request:
//!     RegionSource::location_codes_in(descendants) → codes for a region token
//!     RateStore::average_prices(RateQuery)          → per-day averages
//! ```
//!
//! # Design Decisions
//! - Code sets and dates travel as structured values, never as SQL text
//! - Implementations are shared behind `Arc<dyn ...>` by all requests
//! - No retries or timeouts at this layer; failures surface as `StoreError`

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::rates::types::{DailyRate, RateQuery};
use crate::regions::types::{RegionRow, RegionSlug};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors raised by a region source or data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be interpreted.
    #[error("invalid stored value: {0}")]
    InvalidData(String),

    /// The store is not reachable (closed connection, failed worker).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Source of the region hierarchy and location codes.
#[async_trait]
pub trait RegionSource: Send + Sync {
    /// All region rows, ordered by parent slug.
    async fn regions(&self) -> StoreResult<Vec<RegionRow>>;

    /// Every valid location code.
    async fn location_codes(&self) -> StoreResult<Vec<String>>;

    /// Location codes directly attached to any of `slugs`.
    async fn location_codes_in(&self, slugs: &[RegionSlug]) -> StoreResult<Vec<String>>;
}

/// Store able to compute daily average prices.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Per-day averages for `query`, ordered by day ascending.
    async fn average_prices(&self, query: &RateQuery) -> StoreResult<Vec<DailyRate>>;
}
