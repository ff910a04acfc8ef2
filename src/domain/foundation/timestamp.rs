//! Timestamp value object for immutable points in time.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ValidationError;

/// Immutable point in time, always UTC.
///
/// Displays and serializes as RFC 3339 truncated to whole seconds
/// (`2025-08-16T11:38:00Z`), the format used in policy artifacts and
/// evaluation results. Ordering keeps full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parses an RFC 3339 string, normalizing any offset to UTC.
    pub fn parse_rfc3339(value: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| ValidationError::invalid_format("timestamp", e.to_string()))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Timestamp::parse_rfc3339(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Timestamp(Utc::now());
        let ts = Timestamp::now();
        let after = Timestamp(Utc::now());

        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn parse_rfc3339_normalizes_offset() {
        let ts = Timestamp::parse_rfc3339("2025-08-16T19:38:00+08:00").unwrap();
        assert_eq!(ts.to_string(), "2025-08-16T11:38:00Z");
    }

    #[test]
    fn parse_rfc3339_rejects_garbage() {
        assert!(Timestamp::parse_rfc3339("last tuesday").is_err());
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2025-08-16T11:38:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts, Timestamp::parse_rfc3339("2025-08-16T11:38:00Z").unwrap());
    }

    #[test]
    fn deserializing_garbage_fails() {
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }

    #[test]
    fn serializes_without_fractional_seconds() {
        let ts = Timestamp::parse_rfc3339("2025-08-16T11:38:00.123456789Z").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2025-08-16T11:38:00Z\"");

        let now = serde_json::to_string(&Timestamp::now()).unwrap();
        assert!(!now.contains('.'), "unexpected sub-second precision: {}", now);
    }

    #[test]
    fn ordering_keeps_sub_second_precision() {
        let earlier = Timestamp::parse_rfc3339("2025-08-01T00:00:00.100Z").unwrap();
        let later = Timestamp::parse_rfc3339("2025-08-01T00:00:00.200Z").unwrap();

        assert!(later > earlier);
        assert_eq!(earlier.to_string(), later.to_string());
    }
}
