//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use freight_rates::config::RatesConfig;
use freight_rates::http::{build_router, AppState};
use freight_rates::lifecycle::build_state;
use freight_rates::rates::PriceRecord;
use freight_rates::store::MemoryStore;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 1, d).unwrap()
}

fn prices(orig: &str, dest_prices: &[(&str, f64)], d: u32) -> Vec<PriceRecord> {
    dest_prices
        .iter()
        .map(|(dest, price)| PriceRecord::new(orig, dest, day(d), *price))
        .collect()
}

/// Regions, ports and prices resembling the production data set.
///
/// For CNSGH → north_europe_main over 2016-01-01..10:
/// - day 1: four records, average 1150.0
/// - day 2: three records, no average
/// - day 3: four records, average 1000.25
pub fn sample_store() -> MemoryStore {
    let mut records = Vec::new();
    records.extend(prices(
        "CNSGH",
        &[("NLRTM", 1000.0), ("GBSOU", 1100.0), ("DEHAM", 1200.0), ("BEANR", 1300.0)],
        1,
    ));
    records.extend(prices("CNQIN", &[("NLRTM", 2000.0)], 1));
    records.extend(prices(
        "CNSGH",
        &[("NLRTM", 1000.0), ("NLRTM", 1010.0), ("DEHAM", 1020.0)],
        2,
    ));
    records.extend(prices(
        "CNSGH",
        &[("NLRTM", 1000.0), ("BEZEE", 1000.0), ("FRLEH", 1000.0), ("GBFXT", 1001.0)],
        3,
    ));
    records.extend(prices(
        "CNSGH",
        &[("PLGDN", 500.0), ("PLGDN", 500.0), ("FIHEL", 500.0), ("FIHEL", 500.0)],
        4,
    ));
    records.extend(prices(
        "CNSGH",
        &[("NLRTM", 9000.0), ("NLRTM", 9000.0), ("NLRTM", 9000.0), ("NLRTM", 9000.0)],
        11,
    ));

    MemoryStore::new()
        .with_region("china_main", None)
        .with_region("north_europe_main", None)
        .with_region("baltic", None)
        .with_region("scandinavia", None)
        .with_region("china_north_main", Some("china_main"))
        .with_region("china_south_main", Some("china_main"))
        .with_region("china_east_main", Some("china_main"))
        .with_region("uk_main", Some("north_europe_main"))
        .with_region("poland_main", Some("baltic"))
        .with_region("finland_main", Some("baltic"))
        .with_region("baltic_main", Some("baltic"))
        .with_region("norway_south_west", Some("scandinavia"))
        .with_port("CNSGH", "china_east_main")
        .with_port("CNQIN", "china_north_main")
        .with_port("NLRTM", "north_europe_main")
        .with_port("BEZEE", "north_europe_main")
        .with_port("FRLEH", "north_europe_main")
        .with_port("DEBRV", "north_europe_main")
        .with_port("BEANR", "north_europe_main")
        .with_port("DEHAM", "north_europe_main")
        .with_port("GBFXT", "uk_main")
        .with_port("GBSOU", "uk_main")
        .with_port("PLGDN", "poland_main")
        .with_port("FIHEL", "finland_main")
        .with_port("NOSVG", "norway_south_west")
        .with_prices(records)
}

/// Router over [`sample_store`], plus a handle on the store.
pub async fn sample_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(sample_store());
    let config = RatesConfig::default();
    let state: AppState = build_state(&config, store.clone()).await.unwrap();
    (build_router(&config, state), store)
}

/// Send a GET through the router and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
