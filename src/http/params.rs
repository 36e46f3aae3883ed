//! Query parameter parsing for `GET /rates`.
//!
//! # Responsibilities
//! - Fill absent parameters from the configured defaults
//! - Check dates against the `YYYY-M-D` pattern and the calendar
//! - Enforce the 5..=20 length bound on origin and destination
//!
//! Character and existence checks on the tokens happen later, in
//! [`crate::tokens`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::config::QueryDefaults;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("date pattern is a valid regex")
});

pub const TOKEN_MIN_LEN: usize = 5;
pub const TOKEN_MAX_LEN: usize = 20;

/// Raw query string of `GET /rates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatesParams {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Parameters after defaults and format checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub origin: String,
    pub destination: String,
}

/// A malformed query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{param} must be a date in YYYY-M-D format")]
    InvalidDate { param: &'static str, value: String },

    #[error("{param} must be between 5 and 20 characters")]
    InvalidLength { param: &'static str, value: String },

    #[error("malformed query string: {0}")]
    Malformed(String),
}

/// Parse a `YYYY-M-D` date. Returns `None` for a pattern mismatch or a day
/// that does not exist.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(raw)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Whether an origin/destination token has an acceptable length.
pub fn token_length_ok(token: &str) -> bool {
    (TOKEN_MIN_LEN..=TOKEN_MAX_LEN).contains(&token.chars().count())
}

impl RatesParams {
    /// Apply defaults and check formats, in parameter order.
    pub fn into_request(self, defaults: &QueryDefaults) -> Result<RatesRequest, ParamError> {
        let date_from = date_param("date_from", self.date_from, &defaults.date_from)?;
        let date_to = date_param("date_to", self.date_to, &defaults.date_to)?;
        let origin = token_param("origin", self.origin, &defaults.origin)?;
        let destination = token_param("destination", self.destination, &defaults.destination)?;

        Ok(RatesRequest {
            date_from,
            date_to,
            origin,
            destination,
        })
    }
}

fn date_param(
    param: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<NaiveDate, ParamError> {
    let value = value.unwrap_or_else(|| default.to_string());
    parse_date(&value).ok_or(ParamError::InvalidDate { param, value })
}

fn token_param(
    param: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<String, ParamError> {
    let value = value.unwrap_or_else(|| default.to_string());
    if token_length_ok(&value) {
        Ok(value)
    } else {
        Err(ParamError::InvalidLength { param, value })
    }
}
