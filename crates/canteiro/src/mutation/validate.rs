use chrono::NaiveDate;

use crate::error::ValidationError;

pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed.to_string())
}

pub(crate) fn required_date(
    field: &'static str,
    value: Option<NaiveDate>,
) -> Result<NaiveDate, ValidationError> {
    value.ok_or(ValidationError::Required { field })
}

pub(crate) fn amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount { field, value });
    }
    Ok(value)
}

pub(crate) fn percent(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::InvalidPercent { field, value });
    }
    Ok(value)
}

/// `start` must be strictly before `end`; checked only when both are set.
pub(crate) fn strictly_before(
    start_field: &'static str,
    start: Option<NaiveDate>,
    end_field: &'static str,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start >= end => Err(ValidationError::DateOrder {
            start_field,
            start,
            end_field,
            end,
        }),
        _ => Ok(()),
    }
}

/// Like [`strictly_before`] but a same-day range is accepted.
pub(crate) fn not_after(
    start_field: &'static str,
    start: Option<NaiveDate>,
    end_field: &'static str,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::DateOrder {
            start_field,
            start,
            end_field,
            end,
        }),
        _ => Ok(()),
    }
}
