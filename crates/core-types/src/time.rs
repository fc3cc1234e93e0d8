use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 timestamp into UTC.
///
/// Accepts full RFC 3339 strings with an offset, naive date-times with a `T` or a space
/// separator (with or without a trailing `Z`), and bare dates (midnight). Naive values are
/// taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = trimmed.trim_end_matches(['Z', 'z']);
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| CoreError::InvalidTimestamp(raw.to_string()))
}

/// `serde(deserialize_with)` adapter around [`parse_timestamp`].
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_naive_iso_as_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 9, 15, 0).unwrap();
        assert_eq!(parse_timestamp("2025-01-01T09:15:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-01-01 09:15:00").unwrap(), expected);
        assert_eq!(parse_timestamp(" 2025-01-01T09:15:00Z ").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-01-01T09:15").unwrap(), expected);
    }

    #[test]
    fn converts_offsets_to_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 3, 45, 0).unwrap();
        assert_eq!(parse_timestamp("2025-01-01T09:15:00+05:30").unwrap(), expected);
    }

    #[test]
    fn bare_date_is_midnight() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-06-03").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(CoreError::InvalidTimestamp("yesterday".to_string()))
        );
        assert!(parse_timestamp("").is_err());
    }
}
