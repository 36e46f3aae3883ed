//! Region hierarchy subsystem.
//!
//! # Data Flow
//! ```text
//! RegionSource rows {slug, name, parent_slug}
//!     → graph.rs (group into parent → children)
//!     → resolver.rs (breadth-first closure per slug, cycle check)
//!     → reference.rs (DescendantIndex + location code set)
//!     → Arc<ReferenceData> shared read-only with request handlers
//! ```

pub mod graph;
pub mod reference;
pub mod resolver;
pub mod types;

pub use graph::{build_parent_child_map, ParentChildMap};
pub use reference::{LoadError, ReferenceData};
pub use resolver::{resolve, resolve_checked, DescendantIndex};
pub use types::{RegionError, RegionRow, RegionSlug};
