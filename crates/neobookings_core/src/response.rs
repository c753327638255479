//! Caller-facing response envelope and parsing of the upstream `Response` block.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::utc_timestamp;
use crate::error::GatewayError;

/// Uniform result of every operation.
///
/// `data` is present exactly when `success` is true and `error` exactly when
/// it is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ResponseEnvelope {
    pub fn success(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            timestamp: utc_timestamp(),
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: &GatewayError) -> Self {
        Self {
            success: false,
            timestamp: utc_timestamp(),
            message: Some(error.caller_message()),
            data: None,
            error: Some(error.payload()),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Shortcut into the success payload.
    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(key))
    }
}

/// One entry of the upstream `Response.Error` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpstreamError {
    #[serde(default)]
    pub code: Value,
    #[serde(default)]
    pub description: String,
}

impl UpstreamError {
    /// Read one entry field by field. Missing or null descriptions fall back
    /// to "Unknown error"; a bare string is taken as the description.
    pub fn from_entry(entry: &Value) -> Self {
        let (code, description) = match entry {
            Value::Object(_) => (
                entry.get("Code").cloned().unwrap_or(Value::Null),
                entry.get("Description").and_then(text_of),
            ),
            other => (Value::Null, text_of(other)),
        };
        Self {
            code,
            description: description.unwrap_or_else(|| "Unknown error".to_string()),
        }
    }

    pub fn code_text(&self) -> String {
        text_of(&self.code).unwrap_or_else(|| "UNKNOWN".to_string())
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// The diagnostic fields of an upstream `Response` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpstreamStatus {
    /// Raw `StatusCode`, `Null` when absent.
    pub status_code: Value,
    pub errors: Vec<UpstreamError>,
    pub time_response: Option<Value>,
}

impl UpstreamStatus {
    /// Read a `Response` object. Each field is taken on its own, so one
    /// oddly shaped field never hides the others.
    pub fn from_block(block: &Map<String, Value>) -> Self {
        let errors = match block.get("Error") {
            Some(Value::Array(entries)) => entries.iter().map(UpstreamError::from_entry).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(entry) => vec![UpstreamError::from_entry(entry)],
        };
        Self {
            status_code: block.get("StatusCode").cloned().unwrap_or(Value::Null),
            errors,
            time_response: block.get("TimeResponse").cloned(),
        }
    }

    /// Numeric status code, accepting numbers or numeric strings.
    pub fn status_code(&self) -> Option<i64> {
        match &self.status_code {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Only an explicit 200 counts as success; a missing or unreadable
    /// code does not.
    pub fn is_success(&self) -> bool {
        self.status_code() == Some(200)
    }

    /// Status code as shown in messages. Absent codes read as 0.
    pub fn status_text(&self) -> String {
        match self.status_code() {
            Some(code) => code.to_string(),
            None => text_of(&self.status_code).unwrap_or_else(|| "0".to_string()),
        }
    }

    pub fn errors(&self) -> &[UpstreamError] {
        &self.errors
    }

    /// `CODE: Description; CODE: Description`
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|error| format!("{}: {}", error.code_text(), error.description))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn success_and_failure_are_mutually_exclusive() {
        let ok = ResponseEnvelope::success(json!({"token": "abc"}), "done");
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());
        assert_eq!(ok.data_field("token"), Some(&json!("abc")));

        let failed = ResponseEnvelope::failure(&GatewayError::api("Endpoint not found: /X"));
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert_eq!(failed.message(), "API error: Endpoint not found: /X");
    }

    fn status_of(body: Value) -> UpstreamStatus {
        match body.get("Response") {
            Some(Value::Object(block)) => UpstreamStatus::from_block(block),
            _ => panic!("no Response object in {body}"),
        }
    }

    #[test]
    fn upstream_status_tolerates_loose_shapes() {
        let status = status_of(json!({
            "Response": {
                "StatusCode": "500",
                "Error": [{"Code": 12, "Description": "Invalid basket"}, {"Description": "Locked"}],
                "TimeResponse": 31
            }
        }));
        assert_eq!(status.status_code(), Some(500));
        assert_eq!(status.error_summary(), "12: Invalid basket; UNKNOWN: Locked");
        assert_eq!(status.time_response, Some(json!(31)));

        let status = status_of(json!({"Response": {"StatusCode": 200, "Error": null}}));
        assert!(status.errors().is_empty());
        assert!(status.is_success());
    }

    #[test]
    fn null_descriptions_and_single_error_objects_are_kept() {
        let status = status_of(json!({
            "Response": {"StatusCode": 500, "Error": [{"Code": "E1", "Description": null}]}
        }));
        assert_eq!(status.status_code(), Some(500));
        assert_eq!(status.error_summary(), "E1: Unknown error");

        let status = status_of(json!({
            "Response": {"StatusCode": 500, "Error": {"Code": "E1", "Description": "x"}}
        }));
        assert_eq!(status.error_summary(), "E1: x");
    }

    #[test]
    fn missing_or_unreadable_status_codes_are_not_success() {
        let missing = status_of(json!({"Response": {}}));
        assert!(!missing.is_success());
        assert_eq!(missing.status_text(), "0");

        let garbled = status_of(json!({"Response": {"StatusCode": "OK"}}));
        assert!(!garbled.is_success());
        assert_eq!(garbled.status_text(), "OK");
    }
}
