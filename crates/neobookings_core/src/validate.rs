//! Argument checks shared by every operation.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value, json};

use crate::envelope::Language;
use crate::error::{GatewayError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fail with `MISSING_REQUIRED_FIELDS` when any field is absent or null.
pub fn require_fields(arguments: &Map<String, Value>, fields: &[&str]) -> Result<()> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|field| arguments.get(**field).is_none_or(Value::is_null))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GatewayError::missing_fields(missing))
    }
}

/// The `language` argument, or `default` when it is absent.
pub fn language(arguments: &Map<String, Value>, default: Language) -> Result<Language> {
    match arguments.get("language") {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(code)) => code.trim().parse(),
        Some(other) => Err(GatewayError::validation_with(
            format!("language must be a string, got {}", json_type(other)),
            "INVALID_LANGUAGE",
            json!({ "language": other }),
        )),
    }
}

/// Trim and enforce an optional maximum length in characters.
pub fn sanitize_string(value: &str, max_length: Option<usize>) -> Result<String> {
    let trimmed = value.trim();
    match max_length {
        Some(max) if trimmed.chars().count() > max => Err(GatewayError::validation(format!(
            "String exceeds maximum length of {} characters",
            max
        ))),
        _ => Ok(trimmed.to_string()),
    }
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        GatewayError::validation_with(
            format!("Invalid date format. Expected YYYY-MM-DD, got: {}", value),
            "INVALID_DATE",
            json!({ "field": field, "value": value }),
        )
    })
}

pub fn parse_datetime(field: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| {
        GatewayError::validation_with(
            format!(
                "Invalid datetime format. Expected YYYY-MM-DDTHH:MM:SS, got: {}",
                value
            ),
            "INVALID_DATETIME",
            json!({ "field": field, "value": value }),
        )
    })
}

/// Accepts either a plain date or a full datetime; dates map to midnight.
pub fn parse_date_or_datetime(field: &str, value: &str) -> Result<NaiveDateTime> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            GatewayError::validation_with(
                format!(
                    "Invalid date format. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got: {}",
                    value
                ),
                "INVALID_DATE",
                json!({ "field": field, "value": value }),
            )
        })
}

/// How two dates of a range must relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRule {
    /// The end may equal the start.
    NotBefore,
    /// The end must come after the start (stays of at least one night).
    StrictlyAfter,
}

pub fn check_date_range(from: &str, to: &str, rule: RangeRule) -> Result<()> {
    let start = parse_date_or_datetime("date_from", from)?;
    let end = parse_date_or_datetime("date_to", to)?;
    let ok = match rule {
        RangeRule::NotBefore => end >= start,
        RangeRule::StrictlyAfter => end > start,
    };
    if ok {
        Ok(())
    } else {
        let message = match rule {
            RangeRule::NotBefore => "date_from cannot be later than date_to",
            RangeRule::StrictlyAfter => "date_to must be after date_from",
        };
        Err(GatewayError::validation_with(
            message,
            "INVALID_DATE_RANGE",
            json!({ "date_from": from, "date_to": to }),
        ))
    }
}

/// JSON type name as it appears in schemas.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_i64() || number.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn null_counts_as_missing() {
        let error = require_fields(
            &args(json!({"basket_id": null, "language": "es"})),
            &["basket_id", "order_id"],
        )
        .unwrap_err();
        assert_eq!(
            error.details().unwrap()["missing_fields"],
            json!(["basket_id", "order_id"])
        );
    }

    #[test]
    fn language_defaults_and_rejects_unknown_codes() {
        assert_eq!(language(&Map::new(), Language::Fr).unwrap(), Language::Fr);
        assert_eq!(language(&args(json!({"language": "pt"})), Language::Es).unwrap(), Language::Pt);

        let error = language(&args(json!({"language": "xx"})), Language::Es).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.message().contains("Supported: es, en, fr, de, it, pt"));
    }

    #[test]
    fn strings_are_trimmed_then_measured() {
        assert_eq!(sanitize_string("  BASKET-1  ", Some(8)).unwrap(), "BASKET-1");
        let error = sanitize_string("123456789", Some(8)).unwrap_err();
        assert_eq!(error.message(), "String exceeds maximum length of 8 characters");
    }

    #[test]
    fn dates_and_datetimes() {
        assert!(parse_date("date_from", "2025-02-28").is_ok());
        assert!(parse_date("date_from", "2025-02-30").is_err());
        assert!(parse_datetime("event_date", "2025-01-01T10:30:00").is_ok());
        assert!(parse_datetime("event_date", "2025-01-01").is_err());
        assert!(parse_date_or_datetime("date_from", "2025-01-01").is_ok());
    }

    #[test]
    fn date_ranges() {
        assert!(check_date_range("2025-03-01", "2025-03-01", RangeRule::NotBefore).is_ok());
        assert!(check_date_range("2025-03-01", "2025-03-01", RangeRule::StrictlyAfter).is_err());

        let error = check_date_range("2025-03-05", "2025-03-01", RangeRule::NotBefore).unwrap_err();
        assert_eq!(error.error_code(), Some("INVALID_DATE_RANGE"));
    }
}
