//! Value validation for submitted custom field data.
//!
//! Pure and stateless. A value is checked against an optional
//! [`ValidationKind`] and a requiredness flag; only dates are coerced, every
//! other kind is validated and passed through as given.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::FieldValue;

/// Validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Email,
    Number,
    Date,
}

/// Why a value was rejected. Displays as the reason shown after the field
/// label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("required")]
    Required,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid number")]
    InvalidNumber,
    #[error("Invalid date")]
    InvalidDate,
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern compiles")
});

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Check `value` and return the cleaned value.
///
/// Empty values (null or `""`) fail when required and otherwise pass through
/// untouched, skipping the kind check.
pub fn validate(
    value: &FieldValue,
    kind: Option<ValidationKind>,
    is_required: bool,
) -> Result<FieldValue, Rejection> {
    if value.is_empty() {
        return if is_required {
            Err(Rejection::Required)
        } else {
            Ok(value.clone())
        };
    }

    match kind {
        None => Ok(value.clone()),
        Some(ValidationKind::Email) => match value {
            FieldValue::Text(s) if EMAIL.is_match(s) => Ok(value.clone()),
            _ => Err(Rejection::InvalidEmail),
        },
        Some(ValidationKind::Number) => match value {
            FieldValue::Number(n) if n.is_finite() => Ok(value.clone()),
            FieldValue::Text(s) if parse_number(s).is_some() => Ok(value.clone()),
            _ => Err(Rejection::InvalidNumber),
        },
        Some(ValidationKind::Date) => match value {
            FieldValue::Date(_) => Ok(value.clone()),
            FieldValue::Text(s) => parse_date(s)
                .map(FieldValue::Date)
                .ok_or(Rejection::InvalidDate),
            _ => Err(Rejection::InvalidDate),
        },
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a calendar date or timestamp. Values without an offset are UTC;
/// plain dates land on midnight.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
        }
    }
    None
}
