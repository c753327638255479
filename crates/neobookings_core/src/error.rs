use miette::Diagnostic;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Coarse classification of a failed operation.
///
/// Every failure reported to a caller maps onto exactly one of these, and the
/// kind decides the message prefix of the failure envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Authentication,
    Api,
    Unexpected,
}

impl ErrorKind {
    pub fn message_prefix(self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation error",
            ErrorKind::Authentication => "Authentication failed",
            ErrorKind::Api => "API error",
            ErrorKind::Unexpected => "Unexpected error",
        }
    }
}

#[derive(Error, Diagnostic, Debug, Clone)]
pub enum GatewayError {
    #[error("{message}")]
    #[diagnostic(
        code(neobookings::validation),
        help("Check the arguments against the tool's input schema")
    )]
    Validation {
        message: String,
        error_code: Option<String>,
        details: Value,
    },

    #[error("{message}")]
    #[diagnostic(
        code(neobookings::authentication),
        help("Verify NEO_CLIENT_CODE, NEO_SYSTEM_CODE, NEO_USERNAME and NEO_PASSWORD")
    )]
    Authentication {
        message: String,
        error_code: Option<String>,
        details: Value,
    },

    #[error("{message}")]
    #[diagnostic(
        code(neobookings::api),
        help("The upstream API rejected the request or could not be reached")
    )]
    Api {
        message: String,
        error_code: Option<String>,
        details: Value,
    },

    #[error("{message}")]
    #[diagnostic(code(neobookings::unexpected))]
    Unexpected { message: String, error_type: String },
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            error_code: None,
            details: json!({}),
        }
    }

    pub fn validation_with(
        message: impl Into<String>,
        error_code: impl Into<String>,
        details: Value,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            error_code: Some(error_code.into()),
            details,
        }
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self::validation_with(
            format!("Missing required fields: {}", fields.join(", ")),
            "MISSING_REQUIRED_FIELDS",
            json!({ "missing_fields": fields }),
        )
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            error_code: None,
            details: json!({}),
        }
    }

    pub fn authentication_with(
        message: impl Into<String>,
        error_code: impl Into<String>,
        details: Value,
    ) -> Self {
        Self::Authentication {
            message: message.into(),
            error_code: Some(error_code.into()),
            details,
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            error_code: None,
            details: json!({}),
        }
    }

    pub fn api_with(
        message: impl Into<String>,
        error_code: impl Into<String>,
        details: Value,
    ) -> Self {
        Self::Api {
            message: message.into(),
            error_code: Some(error_code.into()),
            details,
        }
    }

    /// Wrap an error nobody planned for, keeping the name of its type.
    pub fn unexpected<E: std::fmt::Display + ?Sized>(error: &E) -> Self {
        let full = std::any::type_name::<E>();
        Self::Unexpected {
            message: error.to_string(),
            error_type: full.rsplit("::").next().unwrap_or(full).to_string(),
        }
    }

    /// Build an unexpected error out of a caught panic payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "operation panicked".to_string()
        };
        Self::Unexpected {
            message,
            error_type: "panic".to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Validation { .. } => ErrorKind::Validation,
            GatewayError::Authentication { .. } => ErrorKind::Authentication,
            GatewayError::Api { .. } => ErrorKind::Api,
            GatewayError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Validation { message, .. }
            | GatewayError::Authentication { message, .. }
            | GatewayError::Api { message, .. }
            | GatewayError::Unexpected { message, .. } => message,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            GatewayError::Validation { error_code, .. }
            | GatewayError::Authentication { error_code, .. }
            | GatewayError::Api { error_code, .. } => error_code.as_deref(),
            GatewayError::Unexpected { .. } => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            GatewayError::Validation { details, .. }
            | GatewayError::Authentication { details, .. }
            | GatewayError::Api { details, .. } => Some(details),
            GatewayError::Unexpected { .. } => None,
        }
    }

    /// The `error` object of a failure envelope.
    pub fn payload(&self) -> Value {
        match self {
            GatewayError::Unexpected { error_type, .. } => json!({ "error_type": error_type }),
            _ => json!({
                "error_code": self.error_code(),
                "details": self.details().cloned().unwrap_or_else(|| json!({})),
            }),
        }
    }

    /// Message as shown to callers, prefixed by the error kind.
    pub fn caller_message(&self) -> String {
        format!("{}: {}", self.kind().message_prefix(), self.message())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(error: serde_json::Error) -> Self {
        Self::unexpected(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_carries_the_field_list() {
        let error = GatewayError::missing_fields(vec!["basket_id".into(), "hotel_ids".into()]);
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.error_code(), Some("MISSING_REQUIRED_FIELDS"));
        assert_eq!(
            error.payload(),
            json!({
                "error_code": "MISSING_REQUIRED_FIELDS",
                "details": { "missing_fields": ["basket_id", "hotel_ids"] }
            })
        );
    }

    #[test]
    fn caller_message_uses_kind_prefix() {
        assert_eq!(
            GatewayError::api("Endpoint not found: /NopeRQ").caller_message(),
            "API error: Endpoint not found: /NopeRQ"
        );
        assert_eq!(
            GatewayError::authentication("No token").caller_message(),
            "Authentication failed: No token"
        );
    }

    #[test]
    fn unexpected_keeps_short_type_name() {
        let parse = serde_json::from_str::<Value>("{").unwrap_err();
        let error = GatewayError::from(parse);
        assert_eq!(error.kind(), ErrorKind::Unexpected);
        assert_eq!(error.payload(), json!({ "error_type": "Error" }));
    }

    #[test]
    fn panic_payloads_become_unexpected_errors() {
        let error = GatewayError::from_panic(Box::new("boom"));
        assert_eq!(error.message(), "boom");
        assert_eq!(error.payload(), json!({ "error_type": "panic" }));
    }

    #[test]
    fn diagnostics_render_codes() {
        let report = Report::new(GatewayError::authentication("bad credentials"));
        let output = format!("{:?}", report);
        assert!(output.contains("neobookings::authentication"));
    }
}
