use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use model::core::{data_type::ValueType, value::Value};
use std::str::FromStr;
use uuid::Uuid;

pub type CoercionResult = std::result::Result<Value, String>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Converts a filter literal into a value of `value_type`.
///
/// Text is passed through untouched; every other type ignores surrounding
/// whitespace. The error string describes why the literal was rejected.
pub fn coerce(literal: &str, value_type: &ValueType) -> CoercionResult {
    let trimmed = literal.trim();
    match value_type {
        ValueType::String => Ok(Value::String(literal.to_string())),
        ValueType::Int => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| e.to_string()),
        ValueType::Uint => trimmed
            .parse::<u64>()
            .map(Value::Uint)
            .map_err(|e| e.to_string()),
        ValueType::Float => parse_float(trimmed),
        ValueType::Decimal => BigDecimal::from_str(trimmed)
            .map(Value::Decimal)
            .map_err(|e| e.to_string()),
        ValueType::Boolean => parse_bool(trimmed),
        ValueType::Uuid => Uuid::parse_str(trimmed)
            .map(Value::Uuid)
            .map_err(|e| e.to_string()),
        ValueType::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|_| "expected a date formatted as YYYY-MM-DD".to_string()),
        ValueType::Timestamp => parse_timestamp(trimmed),
        ValueType::Enum(variants) => parse_enum(trimmed, variants),
    }
}

fn parse_float(literal: &str) -> CoercionResult {
    let value = literal.parse::<f64>().map_err(|e| e.to_string())?;
    if value.is_nan() {
        return Err("NaN is not comparable".to_string());
    }
    Ok(Value::Float(value))
}

fn parse_bool(literal: &str) -> CoercionResult {
    match literal.to_lowercase().as_str() {
        "true" | "1" => Ok(Value::Boolean(true)),
        "false" | "0" => Ok(Value::Boolean(false)),
        _ => Err("expected true, false, 1 or 0".to_string()),
    }
}

fn parse_timestamp(literal: &str) -> CoercionResult {
    if let Ok(ts) = DateTime::parse_from_rfc3339(literal) {
        return Ok(Value::Timestamp(ts.with_timezone(&Utc)));
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(literal, format) {
            return Ok(Value::Timestamp(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(literal, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Value::Timestamp(naive.and_utc()))
        .ok_or_else(|| "expected an RFC 3339 timestamp, 'YYYY-MM-DD HH:MM:SS' or a date".to_string())
}

// An enum without declared variants accepts any name as given.
fn parse_enum(literal: &str, variants: &[String]) -> CoercionResult {
    if variants.is_empty() {
        return Ok(Value::Enum(literal.to_string()));
    }

    variants
        .iter()
        .find(|variant| variant.eq_ignore_ascii_case(literal))
        .map(|variant| Value::Enum(variant.clone()))
        .ok_or_else(|| format!("expected one of: {}", variants.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce("42", &ValueType::Int), Ok(Value::Int(42)));
        assert_eq!(coerce(" -7 ", &ValueType::Int), Ok(Value::Int(-7)));
        assert_eq!(coerce("7", &ValueType::Uint), Ok(Value::Uint(7)));
        assert!(coerce("-7", &ValueType::Uint).is_err());
        assert!(coerce("abc", &ValueType::Int).is_err());
        assert!(coerce("1.5", &ValueType::Int).is_err());
    }

    #[test]
    fn test_coerce_float_and_decimal() {
        assert_eq!(coerce("2.5", &ValueType::Float), Ok(Value::Float(2.5)));
        assert!(coerce("NaN", &ValueType::Float).is_err());
        assert_eq!(
            coerce("10.25", &ValueType::Decimal),
            Ok(Value::Decimal(BigDecimal::from_str("10.25").unwrap()))
        );
        assert!(coerce("ten", &ValueType::Decimal).is_err());
    }

    #[test]
    fn test_coerce_bool() {
        for (literal, expected) in [("true", true), ("TRUE", true), ("1", true), ("false", false), ("0", false)] {
            assert_eq!(coerce(literal, &ValueType::Boolean), Ok(Value::Boolean(expected)));
        }
        assert!(coerce("yes", &ValueType::Boolean).is_err());
    }

    #[test]
    fn test_coerce_string_keeps_text() {
        assert_eq!(
            coerce(" spaced ", &ValueType::String),
            Ok(Value::String(" spaced ".to_string()))
        );
    }

    #[test]
    fn test_coerce_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(coerce(&id.to_string(), &ValueType::Uuid), Ok(Value::Uuid(id)));
        assert!(coerce("not-a-uuid", &ValueType::Uuid).is_err());
    }

    #[test]
    fn test_coerce_date_and_timestamp() {
        let date = coerce("2024-03-01", &ValueType::Date).unwrap();
        assert_eq!(date, Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(coerce("03/01/2024", &ValueType::Date).is_err());

        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(
            coerce("2024-03-01T12:30:00Z", &ValueType::Timestamp),
            Ok(Value::Timestamp(expected))
        );
        assert_eq!(
            coerce("2024-03-01 12:30:00", &ValueType::Timestamp),
            Ok(Value::Timestamp(expected))
        );

        match coerce("2024-03-01", &ValueType::Timestamp) {
            Ok(Value::Timestamp(ts)) => {
                assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 1));
                assert_eq!(ts.hour(), 0);
            }
            other => panic!("expected timestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_coerce_enum() {
        let status = ValueType::Enum(vec!["Active".to_string(), "Closed".to_string()]);
        assert_eq!(coerce("active", &status), Ok(Value::Enum("Active".to_string())));
        assert_eq!(
            coerce("Pending", &status),
            Err("expected one of: Active, Closed".to_string())
        );
        assert_eq!(
            coerce("anything", &ValueType::Enum(Vec::new())),
            Ok(Value::Enum("anything".to_string()))
        );
    }
}
