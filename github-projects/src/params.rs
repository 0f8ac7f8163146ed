//! Request parameter extraction
//!
//! Inputs arrive as a query string (GET) or a JSON / form body (POST). Both are
//! normalized into a [`RequestInput`] multimap, from which [`FilterCriteria`]
//! is derived. Numeric and date parameters are parsed permissively: anything
//! that does not parse is treated as unset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_LIMIT: usize = 6;
pub const MAX_LIMIT: usize = 50;

/// GitHub handle: 1-39 alphanumerics, hyphens allowed only inside
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,37}[a-zA-Z0-9])?$").unwrap()
});

/// Raw request parameters, keyed by name; repeated keys keep every value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInput {
    values: BTreeMap<String, Vec<String>>,
}

impl RequestInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Parse a URL query string or urlencoded form body
    pub fn from_urlencoded(raw: &[u8]) -> Self {
        let mut input = Self::new();
        for (key, value) in url::form_urlencoded::parse(raw) {
            input.insert(key, value);
        }
        input
    }

    /// Build from a JSON body
    ///
    /// Strings and numbers are taken as values, arrays contribute each string
    /// or number element. Other shapes, and non-object bodies, are ignored.
    pub fn from_json(body: &Value) -> Self {
        let mut input = Self::new();
        let Some(object) = body.as_object() else {
            return input;
        };

        for (key, value) in object {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = json_scalar(item) {
                            input.insert(key.as_str(), text);
                        }
                    }
                }
                other => {
                    if let Some(text) = json_scalar(other) {
                        input.insert(key.as_str(), text);
                    }
                }
            }
        }
        input
    }

    /// First value for `key`, trimmed
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(|value| value.trim().to_string())
    }

    /// All values for `key` joined with commas, split back apart, trimmed,
    /// with empty items dropped
    pub fn list(&self, key: &str) -> Vec<String> {
        let Some(values) = self.values.get(key) else {
            return Vec::new();
        };

        values
            .join(",")
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn json_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a finite number, or `None`
pub fn parse_number(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse the result limit: default for unset, non-numeric or non-positive
/// input, otherwise floored and clamped to `1..=MAX_LIMIT`
pub fn parse_limit(value: Option<&str>) -> usize {
    match parse_number(value) {
        Some(n) if n > 0.0 => (n.floor() as usize).clamp(1, MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

/// Timestamp formats without an offset, read as UTC
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date or timestamp, or `None`
///
/// Accepts RFC 3339 timestamps, minute-precision timestamps with an offset
/// (`YYYY-MM-DDTHH:MM+02:00` or `Z`), naive timestamps to the second or
/// minute (read as UTC), and the date forms `YYYY-MM-DD`, `YYYY-MM` and
/// `YYYY` (first instant of the period, UTC).
pub fn parse_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    // A trailing `Z` on a naive form means UTC, which is how naive forms are read anyway
    let naive = value.strip_suffix('Z').unwrap_or(value);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }

    parse_calendar_date(value)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; missing parts default to the first
fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    match value.split_once('-') {
        Some((year, month)) if is_digits(year, 4) && is_digits(month, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        None if is_digits(value, 4) => NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1),
        _ => None,
    }
}

/// Check an owner identifier against the GitHub handle pattern
pub fn is_valid_username(user: &str) -> bool {
    USERNAME_RE.is_match(user)
}

/// Everything a request asks for, validated
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub user: String,
    /// Always within `1..=MAX_LIMIT`
    pub limit: usize,
    /// Any-of match, case-insensitive
    pub languages: Vec<String>,
    /// All-of match, case-insensitive
    pub topics: Vec<String>,
    pub min_size: Option<f64>,
    pub max_size: Option<f64>,
    pub min_stars: Option<f64>,
    pub max_stars: Option<f64>,
    pub updated_since: Option<DateTime<Utc>>,
    pub updated_until: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    /// Extract and validate criteria from request input
    ///
    /// `user` falls back to `default_user` only when the request does not
    /// carry the key at all; an explicit empty value is rejected.
    pub fn from_input(input: &RequestInput, default_user: Option<&str>) -> ApiResult<Self> {
        let user = input
            .scalar("user")
            .or_else(|| default_user.map(|u| u.trim().to_string()))
            .ok_or(ApiError::InvalidUser)?;

        if !is_valid_username(&user) {
            return Err(ApiError::InvalidUser);
        }

        let number = |key: &str| parse_number(input.scalar(key).as_deref());
        let date = |key: &str| parse_date(input.scalar(key).as_deref());

        Ok(Self {
            limit: parse_limit(input.scalar("limit").as_deref()),
            languages: input.list("language"),
            topics: input.list("topic"),
            min_size: number("min_size"),
            max_size: number("max_size"),
            min_stars: number("min_stars"),
            max_stars: number("max_stars"),
            updated_since: date("updated_since"),
            updated_until: date("updated_until"),
            user,
        })
    }
}
