//! Region hierarchy types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a named region (letters and underscore, e.g. `north_europe_main`).
pub type RegionSlug = String;

/// One row of the region table as returned by the region source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRow {
    pub slug: RegionSlug,
    pub name: String,
    /// `None` for a top-level region.
    pub parent_slug: Option<RegionSlug>,
}

impl RegionRow {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, parent_slug: Option<&str>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            parent_slug: parent_slug.map(str::to_string),
        }
    }
}

/// Errors in the region data detected while building the descendant index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// A region is reachable from itself through the parent→child relation.
    #[error("region hierarchy contains a cycle through '{slug}'")]
    Cycle { slug: RegionSlug },
}

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionError>;
