//! Error types for the client framework.
//!
//! [`ClientError`] is the single error type returned by client construction and
//! request execution. Transport and parser implementations report their own
//! narrower errors ([`TransportError`], [`ParseError`]), which convert into
//! [`ClientError`] with `?`.
//!
//! Nothing in this workspace catches and translates these errors on the way up:
//! a mock client returns exactly what the base state returned.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Client-level errors
// ---------------------------------------------------------------------------

/// Errors produced while configuring a client or executing a request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The root URL could not be accepted.
    #[error("Invalid root URL '{value}': {reason}")]
    InvalidRootUrl {
        /// The value as supplied by the caller.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The service path could not be accepted.
    #[error("Invalid service path '{value}': {reason}")]
    InvalidServicePath {
        /// The value as supplied by the caller.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A settings document could not be read.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A request could not be turned into an HTTP request.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// A request initialiser refused or failed to prepare a request.
    #[error("Request initialisation failed: {message}")]
    Initializer {
        /// Description reported by the initialiser.
        message: String,
    },

    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-success status code.
    #[error("HTTP {status} returned by {url}")]
    HttpStatus {
        /// Response status code.
        status: u16,
        /// Request URL, without query parameters.
        url: String,
        /// Response body decoded lossily as UTF-8.
        body: String,
    },

    /// A typed response was requested but the client has no object parser.
    #[error("No object parser is configured for this client")]
    MissingParser,

    /// The response body could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

// ---------------------------------------------------------------------------
// Component errors
// ---------------------------------------------------------------------------

/// Failure reported by an [`crate::HttpTransport`] implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("Connection failed: {message}")]
    Connect {
        /// Description from the underlying client.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Description from the underlying client.
        message: String,
    },

    /// Any other transport failure.
    #[error("Transport failure: {message}")]
    Other {
        /// Description from the underlying client.
        message: String,
    },
}

/// Failure reported by an [`crate::ObjectParser`] implementation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not valid JSON or does not match the requested type.
    #[error("Failed to parse response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload was rejected by the parser for another reason.
    #[error("Malformed response body: {message}")]
    Malformed {
        /// Description of the problem.
        message: String,
    },
}
