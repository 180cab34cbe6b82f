//! Capability traits a client is assembled from.
//!
//! A client holds each capability as an `Arc<dyn Trait>` handle; it never owns
//! the underlying resource exclusively. All traits are `Send + Sync` so a
//! constructed client can be shared across tasks.
//!
//! | Trait | Called |
//! |-------|--------|
//! | [`HttpTransport`] | once per executed request, to send it |
//! | [`ClientRequestInitializer`] | before a [`ClientRequest`] is resolved |
//! | [`HttpRequestInitializer`] | after resolution, before sending |
//! | [`ObjectParser`] | on the body of a successful typed request |
//! | [`SubscriptionManager`] | never by this crate; carried for the caller |

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{ClientError, ClientRequest, HttpRequest, HttpResponse, ParseError, TransportError};

/// Sends fully resolved HTTP requests.
///
/// Implementations must not interpret the status code; a 404 is a successful
/// transport round trip.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// Sends `request` and returns the raw response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Short name used in log events.
    fn name(&self) -> &str {
        "http"
    }
}

/// Prepares every outgoing [`HttpRequest`] (e.g. to attach credentials).
pub trait HttpRequestInitializer: Send + Sync + Debug {
    /// Mutates `request` before it is handed to the transport.
    fn initialize(&self, request: &mut HttpRequest) -> Result<(), ClientError>;
}

/// Prepares every [`ClientRequest`] before it is resolved against the base URL
/// (e.g. to add an API key parameter).
pub trait ClientRequestInitializer: Send + Sync + Debug {
    /// Mutates `request` before it is turned into an [`HttpRequest`].
    fn initialize(&self, request: &mut ClientRequest) -> Result<(), ClientError>;
}

/// Translates wire payloads into JSON values.
///
/// Typed results are produced from the value with [`crate::parse_as`].
pub trait ObjectParser: Send + Sync + Debug {
    /// Content type this parser reads and writes.
    fn content_type(&self) -> &str;

    /// Parses a response body.
    fn parse_value(&self, content: &[u8]) -> Result<serde_json::Value, ParseError>;
}

/// Opaque handle to a push-notification subscription manager.
///
/// Clients store and return the handle verbatim.
pub trait SubscriptionManager: Send + Sync + Debug {
    /// Name identifying the manager in logs.
    fn name(&self) -> &str;
}
