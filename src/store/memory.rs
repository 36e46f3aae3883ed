//! In-process store holding regions, ports and price records.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::rates::types::{aggregate_daily, DailyRate, PriceRecord, RateQuery};
use crate::regions::types::{RegionRow, RegionSlug};
use crate::store::{RateStore, RegionSource, StoreError, StoreResult};

/// A location code and the region it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub code: String,
    pub parent_slug: RegionSlug,
}

/// Store backed by plain vectors. Aggregation follows the same rule as
/// the SQL in [`crate::store::SqliteStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    regions: Vec<RegionRow>,
    ports: Vec<Port>,
    prices: Vec<PriceRecord>,
    rate_queries: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, slug: &str, parent_slug: Option<&str>) -> Self {
        self.regions.push(RegionRow::new(slug, slug, parent_slug));
        self
    }

    pub fn with_port(mut self, code: &str, parent_slug: &str) -> Self {
        self.ports.push(Port {
            code: code.to_string(),
            parent_slug: parent_slug.to_string(),
        });
        self
    }

    pub fn with_prices(mut self, records: impl IntoIterator<Item = PriceRecord>) -> Self {
        self.prices.extend(records);
        self
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of aggregation queries served so far.
    pub fn rate_query_count(&self) -> usize {
        self.rate_queries.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RegionSource for MemoryStore {
    async fn regions(&self) -> StoreResult<Vec<RegionRow>> {
        self.check_available()?;
        let mut rows = self.regions.clone();
        // Stable: rows sharing a parent keep insertion order.
        rows.sort_by(|a, b| a.parent_slug.cmp(&b.parent_slug));
        Ok(rows)
    }

    async fn location_codes(&self) -> StoreResult<Vec<String>> {
        self.check_available()?;
        Ok(self.ports.iter().map(|p| p.code.clone()).collect())
    }

    async fn location_codes_in(&self, slugs: &[RegionSlug]) -> StoreResult<Vec<String>> {
        self.check_available()?;
        let wanted: HashSet<&str> = slugs.iter().map(String::as_str).collect();
        Ok(self
            .ports
            .iter()
            .filter(|p| wanted.contains(p.parent_slug.as_str()))
            .map(|p| p.code.clone())
            .collect())
    }
}

#[async_trait]
impl RateStore for MemoryStore {
    async fn average_prices(&self, query: &RateQuery) -> StoreResult<Vec<DailyRate>> {
        self.check_available()?;
        self.rate_queries.fetch_add(1, Ordering::SeqCst);
        Ok(aggregate_daily(&self.prices, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_region("scandinavia", Some("north_europe_main"))
            .with_region("north_europe_main", None)
            .with_region("norway_south_west", Some("scandinavia"))
            .with_port("NOSVG", "norway_south_west")
            .with_port("SEGOT", "scandinavia")
            .with_port("NLRTM", "north_europe_main")
    }

    #[tokio::test]
    async fn test_regions_sorted_by_parent() {
        let rows = store().regions().await.unwrap();
        let parents: Vec<_> = rows.iter().map(|r| r.parent_slug.as_deref()).collect();
        assert_eq!(parents, vec![None, Some("north_europe_main"), Some("scandinavia")]);
    }

    #[tokio::test]
    async fn test_location_codes_in() {
        let store = store();
        let mut codes = store
            .location_codes_in(&["scandinavia".into(), "norway_south_west".into()])
            .await
            .unwrap();
        codes.sort();
        assert_eq!(codes, vec!["NOSVG", "SEGOT"]);
        assert_eq!(store.location_codes().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = store();
        store.set_failing(true);
        assert!(matches!(store.regions().await, Err(StoreError::Unavailable(_))));

        let day = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let query = RateQuery {
            date_from: day,
            date_to: day,
            origin: vec!["NLRTM".into()],
            destination: vec!["NOSVG".into()],
            min_records: 4,
            decimal_places: 2,
        };
        assert!(store.average_prices(&query).await.is_err());
        assert_eq!(store.rate_query_count(), 0);
    }
}
