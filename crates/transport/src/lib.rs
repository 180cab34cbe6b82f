//! Production HTTP transport adapter.
//!
//! Implements the [`client::HttpTransport`] trait over `reqwest`. Clients built
//! against real services use [`ReqwestTransport`]; tests use the recording
//! transport in the `testing` crate instead.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection pooling, TLS, timeouts, and the mapping
//! between `reqwest` types and the framework's request/response values live
//! here. The [`client`] crate sees only [`client::HttpTransport`].
//!
//! The transport does not retry, follow application-level redirects, or
//! interpret status codes.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use client::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Default overall request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default connection timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 20;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timeouts applied to every request sent through a [`ReqwestTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Overall request timeout, in seconds.
    pub timeout_secs: u64,
    /// Connection establishment timeout, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// The underlying HTTP client could not be created.
#[derive(Debug, Error)]
#[error("Failed to create HTTP client: {0}")]
pub struct TransportSetupError(#[from] reqwest::Error);

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// [`HttpTransport`] backed by a pooled `reqwest::Client`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with [`TransportConfig::default`] timeouts.
    pub fn new() -> Result<Self, TransportSetupError> {
        Self::with_config(&TransportConfig::default())
    }

    /// Creates a transport with the given timeouts.
    pub fn with_config(config: &TransportConfig) -> Result<Self, TransportSetupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        debug!(
            timeout_secs = config.timeout_secs,
            connect_timeout_secs = config.connect_timeout_secs,
            "HTTP transport created"
        );
        Ok(Self { client })
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn to_reqwest(&self, request: HttpRequest) -> Result<reqwest::Request, TransportError> {
        let mut builder = self.client.request(to_method(request.method), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        builder.build().map_err(map_error)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = self.to_reqwest(request)?;
        trace!(method = %request.method(), url = %request.url(), "Dispatching HTTP request");

        let response = self.client.execute(request).await.map_err(map_error)?;
        let status = response.status().as_u16();

        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            // Non-visible-ASCII header values are dropped.
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }
        let body = response.bytes().await.map_err(map_error)?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

fn to_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
    }
}

fn map_error(e: reqwest::Error) -> TransportError {
    let message = e.to_string();
    if e.is_timeout() {
        TransportError::Timeout { message }
    } else if e.is_connect() {
        TransportError::Connect { message }
    } else {
        TransportError::Other { message }
    }
}

// ---------------------------------------------------------------------------
