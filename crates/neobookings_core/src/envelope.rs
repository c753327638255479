//! Request metadata and the outbound envelope every upstream call carries.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::config::Credentials;
use crate::error::{GatewayError, Result};

/// Languages accepted by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Fr,
    De,
    It,
    Pt,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Es,
        Language::En,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
        }
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|language| language.code()).collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.code() == value)
            .ok_or_else(|| {
                GatewayError::validation_with(
                    format!(
                        "Invalid language code '{}'. Supported: {}",
                        value,
                        Self::codes().join(", ")
                    ),
                    "INVALID_LANGUAGE",
                    json!({ "language": value, "supported": Self::codes() }),
                )
            })
    }
}

/// UTC timestamp in the `YYYY-MM-DDTHH:MM:SS.ffffffZ` form the upstream expects.
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// The `Request` block of an outbound payload.
///
/// A fresh instance is minted for every call; the id only correlates log
/// lines and upstream traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestMetadata {
    pub request_id: String,
    pub timestamp: String,
    pub language: Language,
}

impl RequestMetadata {
    pub fn new(language: Language) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            timestamp: utc_timestamp(),
            language,
        }
    }
}

/// Standardized wrapper for a single outbound call.
#[derive(Debug, Clone)]
pub struct Envelope {
    metadata: RequestMetadata,
    credentials: Option<Value>,
}

impl Envelope {
    /// Envelope for an authenticated business call.
    pub fn standard(language: Language) -> Self {
        Self {
            metadata: RequestMetadata::new(language),
            credentials: None,
        }
    }

    /// Envelope for the authentication call, carrying the credentials block.
    pub fn authentication(language: Language, credentials: &Credentials) -> Self {
        Self {
            metadata: RequestMetadata::new(language),
            credentials: Some(credentials.to_wire()),
        }
    }

    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }

    pub fn request_id(&self) -> &str {
        &self.metadata.request_id
    }

    /// Merge operation fields into the envelope. `Request` and `Credentials`
    /// always win over same-named body keys.
    pub fn into_payload(self, body: Map<String, Value>) -> Value {
        let mut payload = body;
        payload.insert(
            "Request".to_string(),
            json!({
                "RequestId": self.metadata.request_id,
                "Timestamp": self.metadata.timestamp,
                "Language": self.metadata.language.code(),
            }),
        );
        if let Some(credentials) = self.credentials {
            payload.insert("Credentials".to_string(), credentials);
        }
        Value::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn language_parses_lowercase_codes_only() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert!("FR".parse::<Language>().is_err());
        let error = "xx".parse::<Language>().unwrap_err();
        assert!(error.message().contains("Supported: es, en, fr, de, it, pt"));
    }

    #[test]
    fn envelopes_differ_only_in_id_and_timestamp() {
        let first = Envelope::standard(Language::En);
        let second = Envelope::standard(Language::En);
        assert_ne!(first.request_id(), second.request_id());
        assert_eq!(first.metadata().language, second.metadata().language);

        let payload = first.into_payload(Map::new());
        let request = payload.get("Request").unwrap();
        assert_eq!(request["Language"], "en");
        assert!(request["Timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(payload.get("Credentials").is_none());
    }

    #[test]
    fn authentication_envelope_carries_wire_credentials() {
        let credentials = Credentials {
            client_code: "neo".into(),
            system_code: "XML".into(),
            username: "user".into(),
            password: "secret".into(),
        };
        let payload = Envelope::authentication(Language::Es, &credentials).into_payload(Map::new());
        assert_eq!(
            payload["Credentials"],
            json!({
                "ClientCode": "neo",
                "SystemCode": "XML",
                "Username": "user",
                "Password": "secret",
            })
        );
    }

    #[test]
    fn request_block_cannot_be_overridden_by_body() {
        let mut body = Map::new();
        body.insert("Request".into(), json!("spoofed"));
        body.insert("BasketId".into(), json!("B-1"));
        let envelope = Envelope::standard(Language::Es);
        let id = envelope.request_id().to_string();
        let payload = envelope.into_payload(body);
        assert_eq!(payload["Request"]["RequestId"], id);
        assert_eq!(payload["BasketId"], "B-1");
    }

    #[test]
    fn metadata_serializes_with_wire_keys() {
        let metadata = RequestMetadata::new(Language::Pt);
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["Language"], "pt");
        assert!(value.get("RequestId").is_some());
    }
}
