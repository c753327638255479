//! HTTP transport seam between the gateway client and the network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use thiserror::Error;

use crate::config::ApiConfig;
use crate::error::{GatewayError, Result};

/// A JSON POST about to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub body: Value,
    pub bearer: Option<String>,
}

/// Raw upstream answer, before any classification.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Whether a retry policy may try the call again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Timeout | TransportError::Connect(_))
    }

    fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport. One instance per operation invocation.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                GatewayError::api_with(
                    format!("Failed to build HTTP client: {}", e),
                    "CLIENT_INIT_FAILED",
                    json!({}),
                )
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(TransportError::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::from_reqwest)?;

        Ok(HttpResponse { status, body })
    }
}

/// Produces the transport an invocation talks through.
pub trait Connector: Send + Sync {
    fn connect(&self, api: &ApiConfig) -> Result<Arc<dyn HttpTransport>>;
}

/// Opens a fresh reqwest client per invocation, dropped with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    fn connect(&self, api: &ApiConfig) -> Result<Arc<dyn HttpTransport>> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(api.timeout())?);
        Ok(transport)
    }
}

/// A shared transport handed to every invocation; used by tests and benches.
impl<T: HttpTransport + 'static> Connector for Arc<T> {
    fn connect(&self, _api: &ApiConfig) -> Result<Arc<dyn HttpTransport>> {
        let transport: Arc<dyn HttpTransport> = self.clone();
        Ok(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn one_shot_server(raw_response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            socket.write_all(raw_response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[test]
    fn only_timeouts_and_connect_failures_are_retryable() {
        assert!(TransportError::Timeout.is_retryable());
        assert!(TransportError::Connect("refused".into()).is_retryable());
        assert!(!TransportError::Other("bad body".into()).is_retryable());
    }

    #[tokio::test]
    async fn reqwest_transport_returns_status_and_body() {
        let base = one_shot_server(
            "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
        )
        .await;
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport
            .post_json(HttpRequest {
                url: format!("{}/AuthenticatorRQ", base),
                body: json!({"Request": {}}),
                bearer: Some("abc".into()),
            })
            .await
            .unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn reqwest_transport_reports_timeouts() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the socket open without ever answering.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let transport = ReqwestTransport::new(Duration::from_millis(200)).unwrap();
        let error = transport
            .post_json(HttpRequest {
                url: format!("http://{}/ZoneSearchRQ", addr),
                body: json!({}),
                bearer: None,
            })
            .await
            .unwrap_err();
        assert_eq!(error, TransportError::Timeout);
    }
}
