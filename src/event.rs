// src/event.rs
//! Data model for one economic-calendar row plus the impact severity order.
//!
//! FMP reports timestamps as naive `"%Y-%m-%d %H:%M:%S"` strings; they are
//! parsed as UTC and carried as `DateTime<FixedOffset>` so a calendar can be
//! re-anchored to a display offset without touching the instant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("unrecognized impact label: {0:?}")]
    UnrecognizedImpact(String),
    #[error("invalid event timestamp: {0:?}")]
    InvalidTimestamp(String),
    #[error("invalid UTC offset: {0:?} (expected +HH:MM or -HH:MM)")]
    InvalidOffset(String),
}

/// Categorical severity of an announcement. `rank()` gives the total order
/// used by the reducer: High=1 is the most severe and wins a duplicate pair.
///
/// The set is closed on purpose: any other label must fail at the ingestion
/// boundary instead of being ranked wrong silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Numeric severity rank; lower is more severe.
    pub fn rank(self) -> u8 {
        match self {
            Impact::High => 1,
            Impact::Medium => 2,
            Impact::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

impl FromStr for Impact {
    type Err = CalendarError;

    /// Case-sensitive exact match, mirroring the provider's labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Impact::High),
            "Medium" => Ok(Impact::Medium),
            "Low" => Ok(Impact::Low),
            other => Err(CalendarError::UnrecognizedImpact(other.to_string())),
        }
    }
}

impl TryFrom<String> for Impact {
    type Error = CalendarError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Impact> for String {
    fn from(i: Impact) -> String {
        i.as_str().to_string()
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One announcement row as returned by the FMP economic-calendar endpoint.
/// Numeric fields are passthrough: the reducer never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(with = "fmp_date")]
    pub date: DateTime<FixedOffset>,
    pub country: String,
    pub currency: String,
    /// Free-text event title, e.g. "Non-Farm Payrolls (MoM)".
    pub event: String,
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(
        default,
        rename = "changePercentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub change_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Serde support for FMP's naive timestamps.
///
/// Deserialization accepts either the provider's `"%Y-%m-%d %H:%M:%S"` form
/// (interpreted as UTC) or an RFC 3339 string with an explicit offset.
/// Serialization always emits RFC 3339 so the offset survives round-trips.
pub mod fmp_date {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    const FMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn parse(s: &str) -> Result<DateTime<FixedOffset>, CalendarError> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, FMP_FORMAT) {
            let utc = Utc.from_utc_datetime(&naive);
            return Ok(utc.fixed_offset());
        }
        DateTime::parse_from_rfc3339(s).map_err(|_| CalendarError::InvalidTimestamp(s.to_string()))
    }

    pub fn serialize<S: Serializer>(
        dt: &DateTime<FixedOffset>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let s = String::deserialize(de)?;
        parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_rank_orders_high_first() {
        assert_eq!(Impact::High.rank(), 1);
        assert_eq!(Impact::Medium.rank(), 2);
        assert_eq!(Impact::Low.rank(), 3);
        assert!(Impact::High.rank() < Impact::Low.rank());
    }

    #[test]
    fn impact_parse_is_case_sensitive_and_closed() {
        assert_eq!("High".parse::<Impact>().unwrap(), Impact::High);
        assert_eq!(
            "high".parse::<Impact>().unwrap_err(),
            CalendarError::UnrecognizedImpact("high".into())
        );
        assert!("None".parse::<Impact>().is_err());
        assert!("".parse::<Impact>().is_err());
    }

    #[test]
    fn event_row_parses_from_fmp_json() {
        let raw = r#"{
            "date": "2024-01-05 13:30:00",
            "country": "US",
            "currency": "USD",
            "event": "Non-Farm Payrolls (MoM)",
            "impact": "High",
            "previous": 199.0,
            "estimate": 170.0,
            "actual": null,
            "change": 0.0,
            "changePercentage": 0.0,
            "unit": "K"
        }"#;
        let ev: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(ev.event, "Non-Farm Payrolls (MoM)");
        assert_eq!(ev.impact, Impact::High);
        assert_eq!(ev.date.to_rfc3339(), "2024-01-05T13:30:00+00:00");
        assert_eq!(ev.previous, Some(199.0));
        assert_eq!(ev.actual, None);
        assert_eq!(ev.category, None);
    }

    #[test]
    fn unknown_impact_fails_the_whole_row() {
        let raw = r#"{
            "date": "2024-01-05 13:30:00",
            "country": "US",
            "currency": "USD",
            "event": "CPI",
            "impact": "Severe"
        }"#;
        let err = serde_json::from_str::<Event>(raw).unwrap_err().to_string();
        assert!(err.contains("unrecognized impact label"), "{err}");
    }

    #[test]
    fn malformed_timestamp_fails_the_whole_row() {
        let raw = r#"{
            "date": "tomorrow-ish",
            "country": "US",
            "currency": "USD",
            "event": "CPI",
            "impact": "Low"
        }"#;
        let err = serde_json::from_str::<Event>(raw).unwrap_err().to_string();
        assert!(err.contains("invalid event timestamp"), "{err}");
    }

    #[test]
    fn rfc3339_offset_round_trips() {
        let dt = fmp_date::parse("2024-01-05T08:30:00-05:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        // Same instant as the naive-UTC form.
        let utc = fmp_date::parse("2024-01-05 13:30:00").unwrap();
        assert_eq!(dt, utc);
    }
}
