//! Recording HTTP transport for tests.
//!
//! [`MockHttpTransport`] never touches the network. Every request is recorded;
//! replies are taken from a FIFO queue of canned outcomes and, once the queue
//! is empty, from a default response (`200` with body `{}` unless replaced).

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use tracing::trace;

/// A request seen by a [`MockHttpTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// The request exactly as the client handed it over.
    pub request: HttpRequest,
    /// When the transport received it.
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    ConnectFailure(String),
    Timeout(String),
}

#[derive(Debug)]
struct MockTransportState {
    queued: VecDeque<Reply>,
    default_response: HttpResponse,
    requests: Vec<RecordedRequest>,
}

/// [`HttpTransport`] that records requests and replays canned replies.
#[derive(Debug)]
pub struct MockHttpTransport {
    state: Mutex<MockTransportState>,
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHttpTransport {
    /// Creates a transport answering `200 {}` to every request.
    pub fn new() -> Self {
        Self::with_default_response(HttpResponse::json(200, &serde_json::json!({})))
    }

    /// Creates a transport answering `response` once the queue is empty.
    pub fn with_default_response(response: HttpResponse) -> Self {
        Self {
            state: Mutex::new(MockTransportState {
                queued: VecDeque::new(),
                default_response: response,
                requests: Vec::new(),
            }),
        }
    }

    /// Queues `response` for the next unanswered request.
    pub fn push_response(&self, response: HttpResponse) {
        self.lock().queued.push_back(Reply::Response(response));
    }

    /// Queues a JSON response for the next unanswered request.
    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push_response(HttpResponse::json(status, body));
    }

    /// Queues a connection failure for the next unanswered request.
    pub fn push_connect_failure(&self, message: impl Into<String>) {
        self.lock()
            .queued
            .push_back(Reply::ConnectFailure(message.into()));
    }

    /// Queues a timeout for the next unanswered request.
    pub fn push_timeout(&self, message: impl Into<String>) {
        self.lock().queued.push_back(Reply::Timeout(message.into()));
    }

    /// Returns every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.lock().requests.last().map(|r| r.request.clone())
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Returns how many queued replies have not been consumed yet.
    pub fn pending_replies(&self) -> usize {
        self.lock().queued.len()
    }

    /// Forgets recorded requests and queued replies; the default response stays.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.queued.clear();
        state.requests.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportState> {
        // A panicking test must not hide what was recorded before it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        trace!(method = %request.method, url = %request.url, "Mock transport received request");
        state.requests.push(RecordedRequest {
            request,
            recorded_at: Utc::now(),
        });

        match state.queued.pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::ConnectFailure(message)) => Err(TransportError::Connect { message }),
            Some(Reply::Timeout(message)) => Err(TransportError::Timeout { message }),
            None => Ok(state.default_response.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
