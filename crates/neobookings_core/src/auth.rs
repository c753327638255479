//! The authentication step every operation runs before its business call.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::cache::{CachedToken, TokenCache};
use crate::client::{AUTHENTICATION_ENDPOINT, GatewayClient, Token};
use crate::config::Credentials;
use crate::envelope::{Envelope, Language, RequestMetadata};
use crate::error::{GatewayError, Result};

/// What an authentication step produced.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: Token,
    /// Metadata of the authentication call; `None` when the token was cached.
    pub metadata: Option<RequestMetadata>,
    /// Full upstream body of the authentication call.
    pub raw: Value,
    pub cached: bool,
}

impl AuthOutcome {
    /// The upstream `Response` block, or an empty object.
    pub fn api_response(&self) -> Value {
        self.raw.get("Response").cloned().unwrap_or_else(|| json!({}))
    }
}

#[derive(Clone)]
pub struct Authenticator {
    credentials: Arc<Credentials>,
    cache: Option<Arc<TokenCache>>,
}

impl Authenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<TokenCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn cache(&self) -> Option<&Arc<TokenCache>> {
        self.cache.as_ref()
    }

    /// Obtain a token and attach it to `client`, reusing a cached one when
    /// the cache is enabled and the entry is still fresh.
    pub async fn authenticate(
        &self,
        client: &mut GatewayClient,
        language: Language,
    ) -> Result<AuthOutcome> {
        let Some(cache) = &self.cache else {
            return self.exchange(client, language).await;
        };

        let slot = cache.slot(&self.credentials);
        let mut entry = slot.lock().await;
        if let Some(cached) = entry.as_ref().filter(|cached| cached.is_fresh(cache.ttl())) {
            debug!("Reusing cached authentication token");
            client.set_token(cached.token.clone());
            return Ok(AuthOutcome {
                token: cached.token.clone(),
                metadata: None,
                raw: cached.response.clone(),
                cached: true,
            });
        }

        let outcome = self.exchange(client, language).await?;
        *entry = Some(CachedToken::new(outcome.token.clone(), outcome.raw.clone()));
        Ok(outcome)
    }

    /// Always perform the round trip. A cache, when present, is refreshed
    /// with the new token.
    pub async fn authenticate_fresh(
        &self,
        client: &mut GatewayClient,
        language: Language,
    ) -> Result<AuthOutcome> {
        let outcome = self.exchange(client, language).await?;
        if let Some(cache) = &self.cache {
            let slot = cache.slot(&self.credentials);
            *slot.lock().await = Some(CachedToken::new(outcome.token.clone(), outcome.raw.clone()));
        }
        Ok(outcome)
    }

    /// Drop any cached token for these credentials.
    pub fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&self.credentials);
        }
    }

    async fn exchange(&self, client: &mut GatewayClient, language: Language) -> Result<AuthOutcome> {
        let envelope = Envelope::authentication(language, &self.credentials);
        let metadata = envelope.metadata().clone();
        let payload = envelope.into_payload(Map::new());

        let raw = client
            .post(AUTHENTICATION_ENDPOINT, &payload, false)
            .await
            .map_err(|error| match error {
                GatewayError::Api {
                    message,
                    error_code,
                    details,
                } => GatewayError::Authentication {
                    message: format!("Authentication request failed: {}", message),
                    error_code,
                    details,
                },
                other => other,
            })?;

        let token = raw
            .get("Token")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(Token::new)
            .ok_or_else(|| {
                GatewayError::authentication_with(
                    "No token received from authentication endpoint",
                    "NO_TOKEN",
                    json!({ "api_response": raw.get("Response").cloned().unwrap_or(Value::Null) }),
                )
            })?;

        client.set_token(token.clone());
        info!(
            request_id = %metadata.request_id,
            language = %language,
            "Authentication successful"
        );

        Ok(AuthOutcome {
            token,
            metadata: Some(metadata),
            raw,
            cached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, RetryPolicy};
    use crate::error::ErrorKind;
    use crate::transport::{HttpResponse, MockHttpTransport};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn client(mock: Arc<MockHttpTransport>) -> GatewayClient {
        GatewayClient::new(ApiConfig::default(), RetryPolicy::default(), mock)
    }

    fn token_body(token: &str) -> HttpResponse {
        HttpResponse::json(200, &json!({"Token": token, "Response": {"StatusCode": 200}}))
    }

    #[tokio::test]
    async fn sends_credentials_and_sets_the_token() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post_json()
            .withf(|request| {
                request.url.ends_with(AUTHENTICATION_ENDPOINT)
                    && request.bearer.is_none()
                    && request.body["Credentials"]["Username"] == "neomcp"
                    && request.body["Request"]["Language"] == "en"
            })
            .times(1)
            .returning(|_| Ok(token_body("abc123")));

        let mut client = client(Arc::new(mock));
        let outcome = Authenticator::new(Credentials::default())
            .authenticate(&mut client, Language::En)
            .await
            .unwrap();

        assert_eq!(outcome.token.as_str(), "abc123");
        assert!(!outcome.cached);
        assert_eq!(outcome.api_response(), json!({"StatusCode": 200}));
        assert_eq!(client.token().map(Token::as_str), Some("abc123"));
    }

    #[tokio::test]
    async fn missing_token_is_an_authentication_error() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post_json()
            .times(1)
            .returning(|_| Ok(HttpResponse::json(200, &json!({}))));

        let mut client = client(Arc::new(mock));
        let error = Authenticator::new(Credentials::default())
            .authenticate(&mut client, Language::Es)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert_eq!(error.message(), "No token received from authentication endpoint");
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn upstream_rejection_surfaces_as_authentication_failure() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post_json().times(1).returning(|_| {
            Ok(HttpResponse::json(
                200,
                &json!({"Response": {"StatusCode": 403, "Error": [{"Code": "AUTH", "Description": "Bad user"}]}}),
            ))
        });

        let mut client = client(Arc::new(mock));
        let error = Authenticator::new(Credentials::default())
            .authenticate(&mut client, Language::Es)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert!(error.message().contains("AUTH: Bad user"));
    }

    #[tokio::test]
    async fn cache_reuses_tokens_across_clients() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post_json().times(1).returning(|_| Ok(token_body("cached")));
        let mock = Arc::new(mock);

        let authenticator = Authenticator::new(Credentials::default())
            .with_cache(Arc::new(TokenCache::new(Duration::from_secs(60))));

        for round in 0..3 {
            let mut client = client(mock.clone());
            let outcome = authenticator.authenticate(&mut client, Language::Es).await.unwrap();
            assert_eq!(outcome.cached, round > 0);
            assert_eq!(client.token().map(Token::as_str), Some("cached"));
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_refresh() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post_json().times(1).returning(|_| Ok(token_body("shared")));
        let mock = Arc::new(mock);

        let authenticator = Authenticator::new(Credentials::default())
            .with_cache(Arc::new(TokenCache::new(Duration::from_secs(60))));

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let authenticator = authenticator.clone();
                let mock = mock.clone();
                tokio::spawn(async move {
                    let mut client = client(mock);
                    authenticator.authenticate(&mut client, Language::Es).await
                })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            assert_eq!(result.unwrap().unwrap().token.as_str(), "shared");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_refreshed() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post_json().times(2).returning(|_| Ok(token_body("again")));
        let mock = Arc::new(mock);

        let authenticator = Authenticator::new(Credentials::default())
            .with_cache(Arc::new(TokenCache::new(Duration::from_secs(5))));

        let mut first = client(mock.clone());
        authenticator.authenticate(&mut first, Language::Es).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;
        let mut second = client(mock.clone());
        let outcome = authenticator.authenticate(&mut second, Language::Es).await.unwrap();
        assert!(!outcome.cached);
    }
}
