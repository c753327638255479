//! The generic operation pipeline.
//!
//! Every tool runs the same sequence: validate, authenticate, call, normalize.
//! [`Gateway::execute`] implements it once; tools only describe what differs.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{Instrument, Span, error, field, info, info_span};

use crate::auth::{AuthOutcome, Authenticator};
use crate::cache::TokenCache;
use crate::client::{AUTHENTICATION_ENDPOINT, GatewayClient};
use crate::config::NeobookingsConfig;
use crate::envelope::{Envelope, Language, RequestMetadata};
use crate::error::{ErrorKind, GatewayError, Result};
use crate::response::ResponseEnvelope;
use crate::transport::{Connector, ReqwestConnector};

/// Validated arguments ready to be wrapped in an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub language: Language,
    pub body: Map<String, Value>,
}

/// Context handed to [`Operation::normalize`].
pub struct Invocation<'a> {
    pub language: Language,
    /// Metadata of the call whose body is being normalized.
    pub metadata: &'a RequestMetadata,
    pub auth: &'a AuthOutcome,
    pub config: &'a NeobookingsConfig,
}

/// What a single tool contributes to the pipeline.
pub trait Operation: Send + Sync {
    fn name(&self) -> &str;

    fn endpoint(&self) -> &str;

    /// Validate caller arguments and build the business body.
    fn prepare(&self, arguments: &Map<String, Value>, default_language: Language) -> Result<Prepared>;

    /// Turn the raw upstream body into the operation's `data` fields.
    fn normalize(&self, raw: &Value, invocation: &Invocation<'_>) -> Result<Map<String, Value>>;

    fn success_message(&self) -> String {
        format!("{} completed successfully", self.name())
    }
}

/// Shared entry point for running operations. Cheap to clone.
#[derive(Clone)]
pub struct Gateway {
    config: Arc<NeobookingsConfig>,
    connector: Arc<dyn Connector>,
    authenticator: Authenticator,
}

impl Gateway {
    /// Gateway talking to the real API through reqwest.
    pub fn new(config: Arc<NeobookingsConfig>) -> Self {
        Self::with_connector(config, Arc::new(ReqwestConnector))
    }

    pub fn with_connector(config: Arc<NeobookingsConfig>, connector: Arc<dyn Connector>) -> Self {
        let mut authenticator = Authenticator::new(config.credentials.clone());
        if config.token_cache.enabled {
            authenticator = authenticator.with_cache(Arc::new(TokenCache::new(config.token_cache.ttl())));
        }
        Self {
            config,
            connector,
            authenticator,
        }
    }

    pub fn config(&self) -> &NeobookingsConfig {
        &self.config
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Run one operation end to end. Never fails: every error, panics
    /// included, is folded into a failure envelope.
    pub async fn execute(&self, operation: &dyn Operation, arguments: &Map<String, Value>) -> ResponseEnvelope {
        let span = info_span!(
            "operation",
            tool = operation.name(),
            request_id = field::Empty
        );

        let result = AssertUnwindSafe(self.run(operation, arguments, &span))
            .catch_unwind()
            .instrument(span.clone())
            .await
            .unwrap_or_else(|panic| Err(GatewayError::from_panic(panic)));

        match result {
            Ok(data) => ResponseEnvelope::success(Value::Object(data), operation.success_message()),
            Err(failure) => {
                span.in_scope(|| {
                    error!(
                        kind = ?failure.kind(),
                        error_code = failure.error_code().unwrap_or("none"),
                        "{} failed: {}",
                        operation.name(),
                        failure.message()
                    );
                });
                ResponseEnvelope::failure(&failure)
            }
        }
    }

    async fn run(
        &self,
        operation: &dyn Operation,
        arguments: &Map<String, Value>,
        span: &Span,
    ) -> Result<Map<String, Value>> {
        let prepared = operation.prepare(arguments, self.config.api.default_language)?;
        let language = prepared.language;

        let mut client = GatewayClient::connect(&self.config, self.connector.as_ref())?;

        if operation.endpoint() == AUTHENTICATION_ENDPOINT {
            let auth = self.authenticator.authenticate_fresh(&mut client, language).await?;
            let metadata = auth
                .metadata
                .clone()
                .unwrap_or_else(|| RequestMetadata::new(language));
            span.record("request_id", metadata.request_id.as_str());
            return self.finish(operation, &auth.raw, language, &metadata, &auth);
        }

        let auth = self.authenticator.authenticate(&mut client, language).await?;

        let envelope = Envelope::standard(language);
        let metadata = envelope.metadata().clone();
        span.record("request_id", metadata.request_id.as_str());
        let payload = envelope.into_payload(prepared.body);

        info!(endpoint = operation.endpoint(), "Calling {}", operation.name());
        let raw = match client.post(operation.endpoint(), &payload, true).await {
            Err(rejected) if rejected.kind() == ErrorKind::Authentication && auth.cached => {
                self.authenticator.invalidate();
                return Err(rejected);
            }
            other => other?,
        };

        self.finish(operation, &raw, language, &metadata, &auth)
    }

    fn finish(
        &self,
        operation: &dyn Operation,
        raw: &Value,
        language: Language,
        metadata: &RequestMetadata,
        auth: &AuthOutcome,
    ) -> Result<Map<String, Value>> {
        let invocation = Invocation {
            language,
            metadata,
            auth,
            config: &self.config,
        };
        let mut data = operation.normalize(raw, &invocation)?;
        data.insert("request_metadata".to_string(), serde_json::to_value(metadata)?);
        data.insert(
            "api_response".to_string(),
            raw.get("Response")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
        );
        Ok(data)
    }
}
