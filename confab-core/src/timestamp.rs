//! Timestamp (de)serialization helpers.
//!
//! The backend emits ISO 8601 timestamps without a UTC offset
//! (`2024-05-01T12:34:56.789012`), while well-formed RFC 3339 strings may
//! appear as well. Fields using this module accept both and serialize back
//! as RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{self, Deserialize, Deserializer, Serializer};

/// Parse an ISO 8601 timestamp, tolerating a missing UTC offset.
///
/// Offset-less timestamps are interpreted as UTC.
///
/// # Errors
///
/// Returns an error if the string parses as neither RFC 3339 nor a naive
/// ISO 8601 datetime.
pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match s.parse::<DateTime<Utc>>() {
        Ok(dt) => Ok(dt),
        Err(err) => match s.parse::<NaiveDateTime>() {
            Ok(naive) => Ok(naive.and_utc()),
            Err(_) => Err(err),
        },
    }
}

/// Serde `serialize_with` implementation.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Serde `deserialize_with` implementation.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}
