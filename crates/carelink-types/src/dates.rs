//! Date parsing for API payloads.
//!
//! Callers send either full RFC 3339 timestamps or bare `YYYY-MM-DD` dates;
//! bare dates resolve to midnight UTC. Responses always emit RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::TypeError;

/// Parse an API-supplied date string.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, TypeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(TypeError::InvalidDate(s.to_string()))
}

/// Serde helper for optional payload date fields.
///
/// Use with `#[serde(default, deserialize_with = "dates::deserialize_opt")]`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;
    use serde::Deserialize as _;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_date(&s).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_date("2023-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let dt = parse_date("1990-01-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "1990-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("not a date").is_err());
        assert!(parse_date("2023-13-45").is_err());
    }

    #[test]
    fn deserializes_optional_field() {
        #[derive(serde::Deserialize)]
        struct Payload {
            #[serde(default, deserialize_with = "deserialize_opt")]
            when: Option<DateTime<Utc>>,
        }

        let p: Payload = serde_json::from_str(r#"{"when": "2023-01-01"}"#).unwrap();
        assert!(p.when.is_some());

        let p: Payload = serde_json::from_str(r#"{}"#).unwrap();
        assert!(p.when.is_none());

        let p: Payload = serde_json::from_str(r#"{"when": ""}"#).unwrap();
        assert!(p.when.is_none());

        assert!(serde_json::from_str::<Payload>(r#"{"when": "bogus"}"#).is_err());
    }
}
