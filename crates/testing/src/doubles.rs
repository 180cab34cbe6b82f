//! Small test doubles for the client capability traits.

use std::sync::atomic::{AtomicUsize, Ordering};

use client::{
    ClientError, ClientRequest, ClientRequestInitializer, HttpRequest, HttpRequestInitializer,
    SubscriptionManager,
};

/// Request initialiser that counts its invocations.
///
/// Implements both [`HttpRequestInitializer`] and [`ClientRequestInitializer`]
/// with separate counters, and can stamp a header (HTTP hook) or a query
/// parameter (client hook) on every request it sees.
#[derive(Debug, Default)]
pub struct MockRequestInitializer {
    header: Option<(String, String)>,
    query: Option<(String, String)>,
    http_calls: AtomicUsize,
    client_calls: AtomicUsize,
}

impl MockRequestInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header on every [`HttpRequest`] passed to the HTTP hook.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header = Some((name.into(), value.into()));
        self
    }

    /// Sets a query parameter on every [`ClientRequest`] passed to the client hook.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query = Some((name.into(), value.into()));
        self
    }

    /// Number of times the HTTP hook ran.
    pub fn http_calls(&self) -> usize {
        self.http_calls.load(Ordering::SeqCst)
    }

    /// Number of times the client hook ran.
    pub fn client_calls(&self) -> usize {
        self.client_calls.load(Ordering::SeqCst)
    }
}

impl HttpRequestInitializer for MockRequestInitializer {
    fn initialize(&self, request: &mut HttpRequest) -> Result<(), ClientError> {
        self.http_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((name, value)) = &self.header {
            request.set_header(name, value.as_str());
        }
        Ok(())
    }
}

impl ClientRequestInitializer for MockRequestInitializer {
    fn initialize(&self, request: &mut ClientRequest) -> Result<(), ClientError> {
        self.client_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((name, value)) = &self.query {
            request.set_query(name.as_str(), value.as_str());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------

/// Subscription manager handle that only carries a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoopSubscriptionManager {
    name: String,
}

impl NoopSubscriptionManager {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SubscriptionManager for NoopSubscriptionManager {
    fn name(&self) -> &str {
        &self.name
    }
}
