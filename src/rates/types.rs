//! Rate query types and the daily aggregation rule.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fully resolved aggregation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuery {
    /// First day of the range (inclusive).
    pub date_from: NaiveDate,
    /// Last day of the range (inclusive).
    pub date_to: NaiveDate,
    /// Origin location codes.
    pub origin: Vec<String>,
    /// Destination location codes.
    pub destination: Vec<String>,
    /// Days with fewer contributing records report no average.
    pub min_records: u32,
    /// Decimal places the average is rounded to.
    pub decimal_places: u32,
}

/// Average price for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRate {
    pub day: NaiveDate,
    /// `None` when too few records contributed.
    pub average_price: Option<f64>,
}

/// A single price observation between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub orig_code: String,
    pub dest_code: String,
    pub day: NaiveDate,
    pub price: Option<f64>,
}

impl PriceRecord {
    pub fn new(orig_code: &str, dest_code: &str, day: NaiveDate, price: f64) -> Self {
        Self {
            orig_code: orig_code.to_string(),
            dest_code: dest_code.to_string(),
            day,
            price: Some(price),
        }
    }

    fn matches(&self, query: &RateQuery) -> bool {
        self.day >= query.date_from
            && self.day <= query.date_to
            && query.origin.iter().any(|c| *c == self.orig_code)
            && query.destination.iter().any(|c| *c == self.dest_code)
    }
}

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Aggregate price records into per-day averages for `query`.
///
/// Records with no price are ignored. A day appears in the output if at
/// least one priced record matched; its average is `None` unless
/// `query.min_records` or more records contributed. Output is ordered by day.
pub fn aggregate_daily<'a, I>(records: I, query: &RateQuery) -> Vec<DailyRate>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let mut days: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();

    for record in records {
        let Some(price) = record.price else { continue };
        if !record.matches(query) {
            continue;
        }
        let entry = days.entry(record.day).or_insert((0.0, 0));
        entry.0 += price;
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(day, (sum, count))| DailyRate {
            day,
            average_price: (count >= query.min_records)
                .then(|| round_to(sum / count as f64, query.decimal_places)),
        })
        .collect()
}
