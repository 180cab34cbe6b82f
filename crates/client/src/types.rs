//! Request and response value types.
//!
//! [`ClientRequest`] is what callers build: a method, a path relative to the
//! client's base URL, query parameters, and optional JSON content.
//! [`HttpRequest`] and [`HttpResponse`] are what crosses the
//! [`crate::HttpTransport`] boundary; they carry no framework state so a
//! transport can be implemented without depending on the rest of the crate.
//!
//! Header names are stored lowercase.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// HTTP method
// ---------------------------------------------------------------------------

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transport-level request / response
// ---------------------------------------------------------------------------

/// A fully resolved HTTP request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    /// Query parameters in the order they are appended to the URL.
    pub query: Vec<(String, String)>,
    /// Request headers keyed by lowercase name.
    pub headers: BTreeMap<String, String>,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no query parameters, headers, or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Returns the value of header `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the first value of query parameter `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A response as returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response headers keyed by lowercase name.
    pub headers: BTreeMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Creates a response carrying `value` as a JSON body.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        let mut response = Self::new(status, value.to_string());
        response.set_header("content-type", "application/json; charset=UTF-8");
        response
    }

    /// Sets a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Returns the value of header `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

// ---------------------------------------------------------------------------
// Client-level request
// ---------------------------------------------------------------------------

/// A request against a service, expressed relative to the client's base URL.
///
/// The path is resolved when the request is executed:
///
/// - `files/abc` is appended to the base URL (`root URL + service path`).
/// - `/upload/files` is resolved against the origin of the root URL.
/// - `https://...` / `http://...` is used unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRequest {
    method: HttpMethod,
    path: String,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    content: Option<serde_json::Value>,
}

impl ClientRequest {
    /// Creates a request with no parameters or content.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            content: None,
        }
    }

    /// Returns the request method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the unresolved request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Adds a query parameter, returning the request for chaining.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_query(name, value);
        self
    }

    /// Sets a query parameter, replacing any existing value.
    pub fn set_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.insert(name.into(), value.into());
    }

    /// Returns the query parameters, ordered by name.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Sets a request header, replacing any existing value.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Returns the request headers keyed by lowercase name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Attaches JSON content, returning the request for chaining.
    #[must_use]
    pub fn with_content(mut self, content: serde_json::Value) -> Self {
        self.content = Some(content);
        self
    }

    /// Returns the JSON content, if any.
    pub fn content(&self) -> Option<&serde_json::Value> {
        self.content.as_ref()
    }
}
