//! Lenient field deserializers for documents written by older clients.
//!
//! The browser dashboard stored form input verbatim, so numeric fields show
//! up as strings (`"totalArea": "5000"`), ids as timestamps, and blank date
//! inputs as `""`. These helpers accept those shapes instead of rejecting the
//! whole collection.

use chrono::{DateTime, NaiveDate};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Null => Some(0.0),
        _ => None,
    }
}

/// A number, a numeric string, or null/blank (read as zero).
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number_from_value(&value)
        .filter(|n| n.is_finite())
        .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", value)))
}

/// Like [`number`], but null and blank strings map to `None`.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        _ => number_from_value(&value)
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", value))),
    }
}

/// A non-negative whole number, possibly encoded as a string.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match number_from_value(&value) {
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            value
        ))),
    }
}

/// Entity ids: integers, integral floats (`Date.now()` round-tripped through
/// JSON), or numeric strings. Missing ids read as zero and are backfilled by
/// [`crate::mutation::backfill_missing_ids`].
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Null => Some(0),
        _ => None,
    };
    parsed.ok_or_else(|| D::Error::custom(format!("expected an entity id, got {}", value)))
}

/// `YYYY-MM-DD`, an RFC 3339 timestamp, or null/blank.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                return Ok(Some(date));
            }
            DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| Some(dt.date_naive()))
                .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", trimmed, e)))
        }
        _ => Err(D::Error::custom(format!("expected a date string, got {}", value))),
    }
}
