//! Neobookings Core - authenticated request gateway
//!
//! This crate builds request envelopes, acquires session tokens, dispatches
//! calls to the Neobookings API and folds every outcome into a uniform
//! response envelope. Individual operations plug in through [`Operation`].

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod pipeline;
pub mod response;
pub mod transport;
pub mod validate;

pub use auth::{AuthOutcome, Authenticator};
pub use cache::TokenCache;
pub use client::{AUTHENTICATION_ENDPOINT, GatewayClient, Token};
pub use config::{ConfigError, Credentials, NeobookingsConfig};
pub use envelope::{Envelope, Language, RequestMetadata};
pub use error::{ErrorKind, GatewayError, Result};
pub use pipeline::{Gateway, Invocation, Operation, Prepared};
pub use response::{ResponseEnvelope, UpstreamStatus};
pub use transport::{Connector, HttpRequest, HttpResponse, HttpTransport, ReqwestConnector, TransportError};

#[cfg(any(test, feature = "mock"))]
pub use transport::MockHttpTransport;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Credentials, ErrorKind, Gateway, GatewayError, Invocation, Language, NeobookingsConfig,
        Operation, Prepared, RequestMetadata, ResponseEnvelope, Result,
    };
}
