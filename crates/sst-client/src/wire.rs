//! Helpers for turning backend JSON into canonical records.
//!
//! Each resource module declares a private wire struct with the backend's
//! field names (and the camelCase spellings older clients wrote) and a
//! `TryFrom<Wire>` into the canonical type. The conversion error is a plain
//! message; [`parse_list`] and [`parse_one`] prefix it with the entity name
//! and wrap it in [`ClientError::Malformed`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

pub fn parse_list<W, T>(entity: &str, body: Option<Value>) -> Result<Vec<T>, ClientError>
where
    W: DeserializeOwned,
    T: TryFrom<W, Error = String>,
{
    let body = body.ok_or_else(|| ClientError::Malformed(format!("{entity} list: empty body")))?;
    let rows: Vec<W> = serde_json::from_value(body)
        .map_err(|e| ClientError::Malformed(format!("{entity} list: {e}")))?;
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(|e| ClientError::Malformed(format!("{entity}: {e}"))))
        .collect()
}

pub fn parse_one<W, T>(entity: &str, body: Option<Value>) -> Result<T, ClientError>
where
    W: DeserializeOwned,
    T: TryFrom<W, Error = String>,
{
    let body = body.ok_or_else(|| ClientError::Malformed(format!("{entity}: empty body")))?;
    let row: W = serde_json::from_value(body)
        .map_err(|e| ClientError::Malformed(format!("{entity}: {e}")))?;
    T::try_from(row).map_err(|e| ClientError::Malformed(format!("{entity}: {e}")))
}

/// A present, non-blank string.
pub fn required(id: i64, field: &str, value: Option<String>) -> Result<String, String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("#{id} is missing `{field}`"))
}

/// Blank strings become `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `YYYY-MM-DD`, or the date part of an ISO timestamp.
pub fn date(id: i64, field: &str, raw: &str) -> Result<NaiveDate, String> {
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|_| format!("#{id} has a malformed date in `{field}`: {raw:?}"))
}

pub fn optional_date(id: i64, field: &str, raw: Option<String>) -> Result<Option<NaiveDate>, String> {
    optional(raw).map(|r| date(id, field, &r)).transpose()
}

/// RFC 3339, or a naive ISO timestamp taken as UTC.
pub fn timestamp(id: i64, field: &str, raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|t| t.and_utc()))
        .map_err(|_| format!("#{id} has a malformed timestamp in `{field}`: {raw:?}"))
}

/// A number sent either as JSON number or numeric string. Null and blank
/// strings are `None`.
pub fn flex_f64(id: i64, field: &str, raw: Option<&Value>) -> Result<Option<f64>, String> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .replace(',', ".")
            .parse()
            .map(Some)
            .map_err(|_| format!("#{id} has a non-numeric `{field}`: {s:?}")),
        Some(other) => Err(format!("#{id} has a non-numeric `{field}`: {other}")),
    }
}

pub fn flex_u8(id: i64, field: &str, raw: Option<&Value>) -> Result<Option<u8>, String> {
    let Some(value) = flex_f64(id, field, raw)? else {
        return Ok(None);
    };
    if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        return Err(format!("#{id} has an out-of-range `{field}`: {value}"));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(Some(value as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_plain_and_timestamp_prefix() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(date(1, "data", "2025-01-10").unwrap(), expected);
        assert_eq!(date(1, "data", "2025-01-10T00:00:00").unwrap(), expected);
        assert!(date(1, "data", "10/01/2025").unwrap_err().contains("`data`"));
    }

    #[test]
    fn timestamp_accepts_naive_and_offset() {
        assert!(timestamp(1, "created_at", "2025-01-10T12:30:00.123456").is_ok());
        assert!(timestamp(1, "created_at", "2025-01-10T12:30:00Z").is_ok());
        assert!(timestamp(1, "created_at", "ontem").is_err());
    }

    #[test]
    fn flexible_numbers() {
        let n = serde_json::json!(8.5);
        let s = serde_json::json!("7,5");
        let blank = serde_json::json!("");
        let bad = serde_json::json!("oito");
        assert_eq!(flex_f64(1, "jornada", Some(&n)).unwrap(), Some(8.5));
        assert_eq!(flex_f64(1, "jornada", Some(&s)).unwrap(), Some(7.5));
        assert_eq!(flex_f64(1, "jornada", Some(&blank)).unwrap(), None);
        assert_eq!(flex_f64(1, "jornada", None).unwrap(), None);
        assert!(flex_f64(1, "jornada", Some(&bad)).is_err());
        assert_eq!(flex_u8(1, "dias", Some(&serde_json::json!("5"))).unwrap(), Some(5));
        assert!(flex_u8(1, "dias", Some(&serde_json::json!(2.5))).is_err());
    }

    #[test]
    fn required_rejects_blank() {
        assert_eq!(required(3, "nome", Some("Ana".into())).unwrap(), "Ana");
        assert_eq!(
            required(3, "nome", Some("  ".into())).unwrap_err(),
            "#3 is missing `nome`"
        );
        assert!(required(3, "nome", None).is_err());
    }
}
