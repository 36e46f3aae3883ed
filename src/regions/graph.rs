//! Parent→children adjacency built from the flat region table.

use std::collections::HashMap;

use crate::regions::types::{RegionRow, RegionSlug};

/// Map of parent slug → direct child slugs, in source order.
///
/// Top-level regions (rows without a parent) are kept in a separate root
/// grouping which is never consulted when resolving a region's children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentChildMap {
    children: HashMap<RegionSlug, Vec<RegionSlug>>,
    roots: Vec<RegionSlug>,
}

impl ParentChildMap {
    /// Direct children of `slug`, if it has any.
    pub fn children_of(&self, slug: &str) -> Option<&[RegionSlug]> {
        self.children.get(slug).map(Vec::as_slice)
    }

    /// Regions without a parent.
    pub fn roots(&self) -> &[RegionSlug] {
        &self.roots
    }

    /// Number of regions that have at least one child.
    pub fn parent_count(&self) -> usize {
        self.children.len()
    }

    /// Every parent slug that has at least one child.
    pub fn parents(&self) -> impl Iterator<Item = &RegionSlug> {
        self.children.keys()
    }

    fn push(&mut self, parent: Option<&RegionSlug>, child: RegionSlug) {
        match parent {
            Some(parent) => self.children.entry(parent.clone()).or_default().push(child),
            None => self.roots.push(child),
        }
    }
}

/// Group region rows into a parent→children map.
///
/// Rows do not need to arrive sorted: grouping is by key rather than by
/// adjacent run, and children keep the order they had in `rows`.
pub fn build_parent_child_map<'a, I>(rows: I) -> ParentChildMap
where
    I: IntoIterator<Item = &'a RegionRow>,
{
    let mut map = ParentChildMap::default();
    for row in rows {
        map.push(row.parent_slug.as_ref(), row.slug.clone());
    }
    map
}
