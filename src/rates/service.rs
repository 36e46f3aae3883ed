//! Rate query façade over the data store.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::AggregationConfig;
use crate::rates::types::{DailyRate, RateQuery};
use crate::store::{RateStore, StoreResult};

/// Issues aggregation queries with the configured policy.
#[derive(Clone)]
pub struct RateService {
    store: Arc<dyn RateStore>,
    policy: AggregationConfig,
}

impl RateService {
    pub fn new(store: Arc<dyn RateStore>, policy: AggregationConfig) -> Self {
        Self { store, policy }
    }

    /// Daily average prices between two sets of location codes.
    ///
    /// `date_from > date_to` is passed through and simply matches nothing.
    /// When either code set is empty no query is issued.
    pub async fn rates(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        origin: Vec<String>,
        destination: Vec<String>,
    ) -> StoreResult<Vec<DailyRate>> {
        if origin.is_empty() || destination.is_empty() {
            tracing::debug!(
                origin_codes = origin.len(),
                destination_codes = destination.len(),
                "Empty location set, skipping rate query"
            );
            return Ok(Vec::new());
        }

        let query = RateQuery {
            date_from,
            date_to,
            origin,
            destination,
            min_records: self.policy.min_records,
            decimal_places: self.policy.decimal_places,
        };

        tracing::debug!(
            %date_from,
            %date_to,
            origin_codes = query.origin.len(),
            destination_codes = query.destination.len(),
            "Querying average prices"
        );

        self.store.average_prices(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::types::PriceRecord;
    use crate::store::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 1, d).unwrap()
    }

    fn store() -> Arc<MemoryStore> {
        let records = (0..5).map(|i| PriceRecord::new("CNSGH", "NLRTM", day(1), 100.0 + i as f64));
        Arc::new(MemoryStore::new().with_prices(records))
    }

    #[tokio::test]
    async fn test_rates_uses_policy() {
        let store = store();
        let service = RateService::new(store.clone(), AggregationConfig::default());

        let rates = service
            .rates(day(1), day(10), vec!["CNSGH".into()], vec!["NLRTM".into()])
            .await
            .unwrap();
        assert_eq!(rates, vec![DailyRate { day: day(1), average_price: Some(102.0) }]);

        let strict = RateService::new(
            store.clone(),
            AggregationConfig { min_records: 6, decimal_places: 2 },
        );
        let rates = strict
            .rates(day(1), day(10), vec!["CNSGH".into()], vec!["NLRTM".into()])
            .await
            .unwrap();
        assert_eq!(rates[0].average_price, None);
        assert_eq!(store.rate_query_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_code_set_skips_store() {
        let store = store();
        let service = RateService::new(store.clone(), AggregationConfig::default());

        let rates = service
            .rates(day(1), day(10), Vec::new(), vec!["NLRTM".into()])
            .await
            .unwrap();
        assert!(rates.is_empty());
        assert_eq!(store.rate_query_count(), 0);
    }

    #[tokio::test]
    async fn test_inverted_range_matches_nothing() {
        let service = RateService::new(store(), AggregationConfig::default());
        let rates = service
            .rates(day(10), day(1), vec!["CNSGH".into()], vec!["NLRTM".into()])
            .await
            .unwrap();
        assert!(rates.is_empty());
    }
}
