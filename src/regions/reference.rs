//! Process-wide reference data loaded once at startup.

use std::collections::HashSet;

use thiserror::Error;

use crate::regions::resolver::DescendantIndex;
use crate::regions::types::RegionError;
use crate::store::{RegionSource, StoreError};

/// Errors that abort reference data loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read reference data: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Region(#[from] RegionError),
}

/// Valid location codes and the region descendant index.
///
/// Built before the listener starts and never mutated afterwards, so request
/// handlers share it through an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    location_codes: HashSet<String>,
    index: DescendantIndex,
}

impl ReferenceData {
    pub fn new(location_codes: impl IntoIterator<Item = String>, index: DescendantIndex) -> Self {
        Self {
            location_codes: location_codes.into_iter().collect(),
            index,
        }
    }

    /// Load regions and location codes from `source` and build the index.
    pub async fn load(source: &dyn RegionSource) -> Result<Self, LoadError> {
        let rows = source.regions().await?;
        tracing::info!(rows = rows.len(), "Region rows loaded");

        let index = DescendantIndex::build(&rows)?;
        tracing::info!(regions = index.len(), "Region slugs traversed and stored in memory");

        let codes = source.location_codes().await?;
        let data = Self::new(codes, index);
        tracing::info!(location_codes = data.location_codes.len(), "Location codes stored in memory");

        Ok(data)
    }

    pub fn is_location_code(&self, code: &str) -> bool {
        self.location_codes.contains(code)
    }

    pub fn is_region(&self, slug: &str) -> bool {
        self.index.contains(slug)
    }

    pub fn index(&self) -> &DescendantIndex {
        &self.index
    }

    pub fn location_code_count(&self) -> usize {
        self.location_codes.len()
    }

    pub fn region_count(&self) -> usize {
        self.index.len()
    }
}
