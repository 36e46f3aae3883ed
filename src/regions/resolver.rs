//! Descendant resolution over the region hierarchy.
//!
//! # Responsibilities
//! - Expand a region into itself plus every transitive child (breadth-first)
//! - Materialize the slug → descendants index once at startup
//! - Reject hierarchies in which a region is its own descendant
//!
//! # Design Decisions
//! - Traversal tracks visited slugs, so it terminates on any input
//! - A region reached through two parents appears once
//! - The index is read-only after construction and needs no locking

use std::collections::{HashMap, HashSet, VecDeque};

use crate::regions::graph::{build_parent_child_map, ParentChildMap};
use crate::regions::types::{RegionError, RegionResult, RegionRow, RegionSlug};

/// Expand `slug` into itself followed by all its descendants, breadth-first.
///
/// A slug with no entry in `map` is a leaf and resolves to `[slug]`.
/// Unknown slugs are treated the same way; existence is checked by callers.
pub fn resolve(slug: &str, map: &ParentChildMap) -> Vec<RegionSlug> {
    traverse(slug, map).0
}

/// Like [`resolve`], but fails if `slug` is reachable from itself.
pub fn resolve_checked(slug: &str, map: &ParentChildMap) -> RegionResult<Vec<RegionSlug>> {
    match traverse(slug, map) {
        (_, true) => Err(RegionError::Cycle { slug: slug.to_string() }),
        (descendants, false) => Ok(descendants),
    }
}

/// Breadth-first walk. Returns the ordered slugs and whether the walk came
/// back around to `slug`.
fn traverse(slug: &str, map: &ParentChildMap) -> (Vec<RegionSlug>, bool) {
    let mut result = vec![slug.to_string()];
    let mut visited: HashSet<&str> = HashSet::from([slug]);
    let mut queue: VecDeque<&RegionSlug> = VecDeque::new();
    let mut cyclic = false;

    if let Some(children) = map.children_of(slug) {
        queue.extend(children);
    }

    while let Some(child) = queue.pop_front() {
        if child == slug {
            cyclic = true;
            continue;
        }
        if !visited.insert(child.as_str()) {
            continue;
        }
        result.push(child.clone());
        if let Some(grandchildren) = map.children_of(child) {
            queue.extend(grandchildren);
        }
    }

    (result, cyclic)
}

/// Precomputed mapping from every known region to its descendant closure.
#[derive(Debug, Clone, Default)]
pub struct DescendantIndex {
    descendants: HashMap<RegionSlug, Vec<RegionSlug>>,
}

impl DescendantIndex {
    /// Build the index from raw region rows.
    ///
    /// Every slug that appears as a row's slug or as a parent becomes a key.
    /// Fails on the first region found to be its own descendant.
    pub fn build(rows: &[RegionRow]) -> RegionResult<Self> {
        let map = build_parent_child_map(rows);

        let slugs = rows
            .iter()
            .map(|row| &row.slug)
            .chain(map.parents());

        let mut descendants = HashMap::new();
        for slug in slugs {
            if descendants.contains_key(slug) {
                continue;
            }
            let resolved = resolve_checked(slug, &map)?;
            descendants.insert(slug.clone(), resolved);
        }

        tracing::debug!(
            regions = descendants.len(),
            parents = map.parent_count(),
            roots = map.roots().len(),
            "Descendant index built"
        );

        Ok(Self { descendants })
    }

    /// Whether `slug` names a known region.
    pub fn contains(&self, slug: &str) -> bool {
        self.descendants.contains_key(slug)
    }

    /// The region itself followed by all its descendants.
    pub fn descendants(&self, slug: &str) -> Option<&[RegionSlug]> {
        self.descendants.get(slug).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.descendants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descendants.is_empty()
    }
}
