//! # Timestamp Value Object
//!
//! UTC point in time stamped onto every aggregated profile.
//!
//! Serializes as RFC 3339 with millisecond precision and a `Z` suffix, the
//! format browsers produce with `Date.prototype.toISOString`.
//!
//! # Examples
//!
//! ```
//! use profile_aggregator::domain::value_objects::timestamp::Timestamp;
//!
//! let ts = Timestamp::from_millis(1_725_148_800_123).unwrap();
//! assert_eq!(ts.to_iso8601(), "2024-09-01T00:00:00.123Z");
//! ```

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A UTC timestamp rendered with millisecond precision.
///
/// # Invariants
///
/// - Always in UTC timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Returns Unix milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Formats the timestamp as ISO 8601 with millisecond precision.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.0 >= before);
        assert!(ts.0 <= after);
    }

    #[test]
    fn iso8601_keeps_milliseconds_and_zulu_suffix() {
        let ts = Timestamp::from_millis(1_704_067_200_007).unwrap();
        assert_eq!(ts.to_iso8601(), "2024-01-01T00:00:00.007Z");
        assert_eq!(ts.to_string(), ts.to_iso8601());
    }

    #[test]
    fn serializes_as_json_string() {
        let ts = Timestamp::from_millis(1_725_148_800_000).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-09-01T00:00:00.000Z\"");
    }

    #[test]
    fn deserializes_offset_timestamps_into_utc() {
        let ts: Timestamp = serde_json::from_str("\"2024-09-01T02:00:00.000+02:00\"").unwrap();
        assert_eq!(ts.timestamp_millis(), 1_725_148_800_000);
    }

    #[test]
    fn rejects_malformed_input() {
        let result: Result<Timestamp, _> = serde_json::from_str("\"yesterday\"");
        assert!(result.is_err());
    }
}
