//! Gateway client: HTTP dispatch, bearer tokens and failure classification.

use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::{ApiConfig, NeobookingsConfig, RetryPolicy};
use crate::error::{GatewayError, Result};
use crate::response::UpstreamStatus;
use crate::transport::{Connector, HttpRequest, HttpResponse, HttpTransport, TransportError};

pub const AUTHENTICATION_ENDPOINT: &str = "/AuthenticatorRQ";

/// Opaque bearer credential. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First characters of the token, for display.
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(20).collect();
        if head.len() < self.0.len() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} chars>)", self.0.chars().count())
    }
}

/// Per-invocation HTTP context. Holds at most one token and is dropped,
/// together with its connection pool, when the invocation ends.
pub struct GatewayClient {
    api: ApiConfig,
    retry: RetryPolicy,
    transport: Arc<dyn HttpTransport>,
    token: Option<Token>,
}

impl GatewayClient {
    pub fn new(api: ApiConfig, retry: RetryPolicy, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            api,
            retry,
            transport,
            token: None,
        }
    }

    pub fn connect(config: &NeobookingsConfig, connector: &dyn Connector) -> Result<Self> {
        let transport = connector.connect(&config.api)?;
        Ok(Self::new(config.api.clone(), config.retry.clone(), transport))
    }

    /// Attach a bearer token to every later call. Replaces any previous one.
    pub fn set_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// POST `payload` to `endpoint` and return the parsed body.
    pub async fn post(&self, endpoint: &str, payload: &Value, require_auth: bool) -> Result<Value> {
        if require_auth && self.token.is_none() {
            return Err(GatewayError::authentication_with(
                "Authentication token required but not set",
                "TOKEN_REQUIRED",
                json!({ "endpoint": endpoint }),
            ));
        }

        let request_id = payload
            .pointer("/Request/RequestId")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        info!(
            endpoint,
            has_token = self.token.is_some(),
            request_id,
            "Making API request"
        );

        let request = HttpRequest {
            url: self.api.endpoint_url(endpoint),
            body: payload.clone(),
            bearer: self.token.as_ref().map(|token| token.as_str().to_string()),
        };

        let response = self.dispatch(endpoint, request).await?;
        let body = classify_response(endpoint, response)?;

        debug!(endpoint, request_id, "API request successful");
        Ok(body)
    }

    async fn dispatch(&self, endpoint: &str, request: HttpRequest) -> Result<HttpResponse> {
        let mut attempt = 0u32;
        loop {
            match self.transport.post_json(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(error) if error.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff_for(attempt);
                    attempt += 1;
                    warn!(
                        endpoint,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Transport failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(TransportError::Timeout) => {
                    return Err(GatewayError::api_with(
                        format!("Request timeout for endpoint: {}", endpoint),
                        "TIMEOUT",
                        json!({
                            "endpoint": endpoint,
                            "timeout_secs": self.api.timeout_secs,
                            "attempts": attempt + 1,
                        }),
                    ));
                }
                Err(error) => {
                    return Err(GatewayError::api_with(
                        format!("Request failed for endpoint {}: {}", endpoint, error),
                        "REQUEST_FAILED",
                        json!({ "endpoint": endpoint, "attempts": attempt + 1 }),
                    ));
                }
            }
        }
    }
}

/// Turn a raw response into parsed JSON or the matching gateway error.
///
/// Checks run in order: HTTP 401, HTTP 404, any other status of 400 or
/// above, JSON parsing, then the upstream `Response.StatusCode`. Bodies
/// without a `Response` key pass through; a `Response` block without a
/// `StatusCode` of 200 does not.
pub fn classify_response(endpoint: &str, response: HttpResponse) -> Result<Value> {
    match response.status {
        401 => {
            return Err(GatewayError::authentication_with(
                "Authentication failed - invalid token or credentials",
                "UNAUTHORIZED",
                json!({ "http_status": 401, "endpoint": endpoint }),
            ));
        }
        404 => {
            return Err(GatewayError::api_with(
                format!("Endpoint not found: {}", endpoint),
                "ENDPOINT_NOT_FOUND",
                json!({ "http_status": 404, "endpoint": endpoint }),
            ));
        }
        status if status >= 400 => {
            return Err(GatewayError::api_with(
                format!("API request failed with status {}: {}", status, response.body),
                "HTTP_ERROR",
                json!({
                    "http_status": status,
                    "endpoint": endpoint,
                    "body": response.body,
                }),
            ));
        }
        _ => {}
    }

    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        GatewayError::api_with(
            format!("Failed to parse JSON response: {}", e),
            "INVALID_JSON",
            json!({
                "http_status": response.status,
                "endpoint": endpoint,
                "body": response.body,
            }),
        )
    })?;

    let status = match body.get("Response") {
        None => None,
        Some(Value::Object(block)) => Some(UpstreamStatus::from_block(block)),
        Some(other) => {
            return Err(GatewayError::api_with(
                "API returned a malformed Response block",
                "INVALID_RESPONSE",
                json!({ "endpoint": endpoint, "response": other }),
            ));
        }
    };
    let Some(status) = status else {
        return Ok(body);
    };

    if !status.is_success() {
        let message = if status.errors().is_empty() {
            format!("API returned status code {}", status.status_text())
        } else {
            format!("API returned errors: {}", status.error_summary())
        };
        return Err(GatewayError::api_with(
            message,
            "UPSTREAM_ERROR",
            json!({
                "status_code": status.status_code,
                "endpoint": endpoint,
                "errors": status.errors(),
            }),
        ));
    }

    Ok(body)
}
