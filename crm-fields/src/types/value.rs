//! Loosely-typed submitted values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value stored under a field id in a record's custom data.
///
/// Null, numbers and strings are plain on the wire. Dates are written as
/// `{"date": "<rfc3339>"}`, so a string always reads back as
/// [`FieldValue::Text`] even when it looks like a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "WireValue", into = "WireValue")]
pub enum FieldValue {
    #[default]
    Null,
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Null,
    Number(f64),
    Text(String),
    Date { date: DateTime<Utc> },
}

impl From<WireValue> for FieldValue {
    fn from(wire: WireValue) -> Self {
        match wire {
            WireValue::Null => Self::Null,
            WireValue::Number(n) => Self::Number(n),
            WireValue::Text(s) => Self::Text(s),
            WireValue::Date { date } => Self::Date(date),
        }
    }
}

impl From<FieldValue> for WireValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Self::Null,
            FieldValue::Number(n) => Self::Number(n),
            FieldValue::Text(s) => Self::Text(s),
            FieldValue::Date(date) => Self::Date { date },
        }
    }
}

impl FieldValue {
    /// Empty string or null. Required fields reject these.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::from(0.0).is_empty());
    }

    #[test]
    fn json_shapes() {
        let v: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, FieldValue::Null);
        let v: FieldValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, FieldValue::Number(2.5));
        let v: FieldValue = serde_json::from_str("\"1231\"").unwrap();
        assert_eq!(v, FieldValue::from("1231"));
        let v: FieldValue = serde_json::from_str("\"2017-01-01T00:00:00Z\"").unwrap();
        assert_eq!(v, FieldValue::from("2017-01-01T00:00:00Z"));
        let v: FieldValue = serde_json::from_str(r#"{"date": "2017-01-01T00:00:00Z"}"#).unwrap();
        assert!(v.as_date().is_some());
    }

    #[test]
    fn dates_and_timestamp_text_survive_yaml() {
        let date: DateTime<Utc> = "2017-01-01T00:00:00Z".parse().unwrap();
        let values = vec![
            FieldValue::from("2017-01-01T00:00:00Z"),
            FieldValue::Date(date),
            FieldValue::Number(3.0),
            FieldValue::Null,
        ];

        let yaml = serde_yaml_ng::to_string(&values).unwrap();
        let back: Vec<FieldValue> = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(back, values);
        assert_eq!(
            serde_json::to_value(FieldValue::Date(date)).unwrap(),
            serde_json::json!({ "date": "2017-01-01T00:00:00Z" })
        );
    }
}
