//! Shared client state and the [`ApiClient`] trait.
//!
//! Every concrete service client embeds one [`ClientCore`] and implements
//! [`ApiClient`] by returning it from [`ApiClient::core`]. The trait supplies
//! all accessors and request execution on top of that single method, so a
//! concrete client adds only its service-specific surface.
//!
//! A [`ClientCore`] is immutable once constructed.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    parse_as, ClientError, ClientRequest, ClientRequestInitializer, HttpRequest,
    HttpRequestInitializer, HttpResponse, HttpTransport, ObjectParser, RootUrl, ServicePath,
    SubscriptionManager,
};

/// Product token appended to every `User-Agent` header.
pub const FRAMEWORK_AGENT: &str = concat!("api-client-rust/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Base state
// ---------------------------------------------------------------------------

/// Configuration shared by every client: transport, addressing, parsing, and
/// the optional per-request hooks.
#[derive(Debug, Clone)]
pub struct ClientCore {
    transport: Arc<dyn HttpTransport>,
    http_request_initializer: Option<Arc<dyn HttpRequestInitializer>>,
    root_url: RootUrl,
    service_path: ServicePath,
    object_parser: Option<Arc<dyn ObjectParser>>,
    client_request_initializer: Option<Arc<dyn ClientRequestInitializer>>,
    application_name: Option<String>,
    subscription_manager: Option<Arc<dyn SubscriptionManager>>,
    suppress_pattern_checks: bool,
}

impl ClientCore {
    /// Creates the base state with default values for every optional setting.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRootUrl`] or
    /// [`ClientError::InvalidServicePath`] if the URL parts cannot be normalised.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        http_request_initializer: Option<Arc<dyn HttpRequestInitializer>>,
        root_url: &str,
        service_path: &str,
        object_parser: Arc<dyn ObjectParser>,
    ) -> Result<Self, ClientError> {
        Self::with_options(
            transport,
            http_request_initializer,
            root_url,
            service_path,
            Some(object_parser),
            None,
            None,
            None,
            false,
        )
    }

    /// Creates the base state with every setting supplied explicitly.
    ///
    /// `application_name` is sent in the `User-Agent` header of every request;
    /// a warning is logged when it is absent. `suppress_pattern_checks` is
    /// carried for generated request types that validate required parameters
    /// against discovery patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRootUrl`] or
    /// [`ClientError::InvalidServicePath`] if the URL parts cannot be normalised.
    #[allow(clippy::too_many_arguments)]
    pub fn with_options(
        transport: Arc<dyn HttpTransport>,
        http_request_initializer: Option<Arc<dyn HttpRequestInitializer>>,
        root_url: &str,
        service_path: &str,
        object_parser: Option<Arc<dyn ObjectParser>>,
        client_request_initializer: Option<Arc<dyn ClientRequestInitializer>>,
        application_name: Option<String>,
        subscription_manager: Option<Arc<dyn SubscriptionManager>>,
        suppress_pattern_checks: bool,
    ) -> Result<Self, ClientError> {
        let root_url = RootUrl::parse(root_url)?;
        let service_path = ServicePath::parse(service_path)?;

        if application_name.is_none() {
            warn!(
                root_url = %root_url,
                "Application name is not set; call set_application_name on the client builder"
            );
        }
        debug!(
            root_url = %root_url,
            service_path = %service_path,
            transport = transport.name(),
            suppress_pattern_checks,
            "Client configured"
        );

        Ok(Self {
            transport,
            http_request_initializer,
            root_url,
            service_path,
            object_parser,
            client_request_initializer,
            application_name,
            subscription_manager,
            suppress_pattern_checks,
        })
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    pub fn http_request_initializer(&self) -> Option<&Arc<dyn HttpRequestInitializer>> {
        self.http_request_initializer.as_ref()
    }

    pub fn root_url(&self) -> &RootUrl {
        &self.root_url
    }

    pub fn service_path(&self) -> &ServicePath {
        &self.service_path
    }

    /// Returns `root URL + service path`.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.root_url, self.service_path)
    }

    pub fn object_parser(&self) -> Option<&Arc<dyn ObjectParser>> {
        self.object_parser.as_ref()
    }

    pub fn client_request_initializer(&self) -> Option<&Arc<dyn ClientRequestInitializer>> {
        self.client_request_initializer.as_ref()
    }

    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    pub fn subscription_manager(&self) -> Option<&Arc<dyn SubscriptionManager>> {
        self.subscription_manager.as_ref()
    }

    pub fn suppress_pattern_checks(&self) -> bool {
        self.suppress_pattern_checks
    }

    /// Returns the `User-Agent` header value sent with every request.
    pub fn user_agent(&self) -> String {
        match &self.application_name {
            Some(name) => format!("{name} {FRAMEWORK_AGENT}"),
            None => FRAMEWORK_AGENT.to_string(),
        }
    }

    /// Runs the client-request initialiser, if one is configured.
    pub fn initialize(&self, request: &mut ClientRequest) -> Result<(), ClientError> {
        match &self.client_request_initializer {
            Some(initializer) => initializer.initialize(request),
            None => Ok(()),
        }
    }

    /// Resolves `request` into the [`HttpRequest`] the transport will receive.
    ///
    /// Runs the client-request initialiser first and the HTTP request
    /// initialiser last, so the latter sees the final URL and headers.
    pub fn build_http_request(&self, mut request: ClientRequest) -> Result<HttpRequest, ClientError> {
        self.initialize(&mut request)?;

        let mut http = HttpRequest::new(request.method(), self.resolve_url(request.path()));
        http.query = request
            .query()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        for (name, value) in request.headers() {
            http.set_header(name, value.as_str());
        }

        if let Some(content) = request.content() {
            let body = serde_json::to_vec(content).map_err(|e| ClientError::InvalidRequest {
                message: format!("request content could not be serialised: {e}"),
            })?;
            let content_type = self
                .object_parser
                .as_ref()
                .map(|parser| parser.content_type().to_string())
                .unwrap_or_else(|| crate::parser::JSON_CONTENT_TYPE.to_string());
            http.set_header("content-type", content_type);
            http.body = Some(body);
        }
        http.set_header("user-agent", self.user_agent());

        if let Some(initializer) = &self.http_request_initializer {
            initializer.initialize(&mut http)?;
        }
        Ok(http)
    }

    /// Builds and sends `request`, returning the raw response.
    ///
    /// # Errors
    ///
    /// Initialiser and transport errors are returned unchanged; a non-2xx
    /// response yields [`ClientError::HttpStatus`].
    pub async fn execute_unparsed(&self, request: ClientRequest) -> Result<HttpResponse, ClientError> {
        let http = self.build_http_request(request)?;
        let method = http.method;
        let url = http.url.clone();

        debug!(%method, url = %url, transport = self.transport.name(), "Sending request");
        let response = self.transport.send(http).await?;
        debug!(%method, url = %url, status = response.status, "Received response");

        if !response.is_success() {
            return Err(ClientError::HttpStatus {
                status: response.status,
                url,
                body: response.body_text().into_owned(),
            });
        }
        Ok(response)
    }

    /// Builds and sends `request`, parsing the response body into `T`.
    ///
    /// # Errors
    ///
    /// As [`ClientCore::execute_unparsed`], plus [`ClientError::MissingParser`]
    /// when no object parser is configured and [`ClientError::Parse`] when the
    /// body does not match `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: ClientRequest) -> Result<T, ClientError> {
        let parser = self.object_parser.clone().ok_or(ClientError::MissingParser)?;
        let response = self.execute_unparsed(request).await?;
        Ok(parse_as(parser.as_ref(), &response.body)?)
    }

    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.root_url.origin(), path)
        } else {
            format!("{}{}", self.base_url(), path)
        }
    }
}

// ---------------------------------------------------------------------------
// Client trait
// ---------------------------------------------------------------------------

/// Behaviour common to every service client.
///
/// Implementors supply [`ApiClient::core`]; every other method has a default
/// that reads from or delegates to the returned [`ClientCore`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Returns the shared base state.
    fn core(&self) -> &ClientCore;

    fn transport(&self) -> &Arc<dyn HttpTransport> {
        self.core().transport()
    }

    fn http_request_initializer(&self) -> Option<&Arc<dyn HttpRequestInitializer>> {
        self.core().http_request_initializer()
    }

    /// Returns the normalised root URL (always ends with `/`).
    fn root_url(&self) -> &str {
        self.core().root_url().as_str()
    }

    /// Returns the normalised service path (empty or ends with `/`).
    fn service_path(&self) -> &str {
        self.core().service_path().as_str()
    }

    fn base_url(&self) -> String {
        self.core().base_url()
    }

    fn object_parser(&self) -> Option<&Arc<dyn ObjectParser>> {
        self.core().object_parser()
    }

    fn client_request_initializer(&self) -> Option<&Arc<dyn ClientRequestInitializer>> {
        self.core().client_request_initializer()
    }

    fn application_name(&self) -> Option<&str> {
        self.core().application_name()
    }

    fn subscription_manager(&self) -> Option<&Arc<dyn SubscriptionManager>> {
        self.core().subscription_manager()
    }

    fn suppress_pattern_checks(&self) -> bool {
        self.core().suppress_pattern_checks()
    }

    /// Runs the client-request initialiser on `request`.
    fn initialize(&self, request: &mut ClientRequest) -> Result<(), ClientError> {
        self.core().initialize(request)
    }

    /// See [`ClientCore::build_http_request`].
    fn build_http_request(&self, request: ClientRequest) -> Result<HttpRequest, ClientError> {
        self.core().build_http_request(request)
    }

    /// See [`ClientCore::execute_unparsed`].
    async fn execute_unparsed(&self, request: ClientRequest) -> Result<HttpResponse, ClientError> {
        self.core().execute_unparsed(request).await
    }

    /// See [`ClientCore::execute`].
    async fn execute<T>(&self, request: ClientRequest) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Send,
        Self: Sized,
    {
        self.core().execute(request).await
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde::Deserialize;

    use super::*;
    use crate::{CommonRequestInitializer, HttpMethod, JsonObjectParser, TransportError};

    /// Transport that answers every request with one fixed response.
    #[derive(Debug)]
    struct FixedTransport {
        response: HttpResponse,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl FixedTransport {
        fn new(response: HttpResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    #[derive(Debug)]
    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connect {
                message: "connection refused".to_string(),
            })
        }
    }

    #[derive(Debug)]
    struct BearerToken;

    impl HttpRequestInitializer for BearerToken {
        fn initialize(&self, request: &mut HttpRequest) -> Result<(), ClientError> {
            request.set_header("Authorization", "Bearer t0ken");
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Refusing;

    impl ClientRequestInitializer for Refusing {
        fn initialize(&self, _request: &mut ClientRequest) -> Result<(), ClientError> {
            Err(ClientError::Initializer {
                message: "quota exhausted".to_string(),
            })
        }
    }

    struct TestClient {
        core: ClientCore,
    }

    impl ApiClient for TestClient {
        fn core(&self) -> &ClientCore {
            &self.core
        }
    }

    fn core_with(transport: Arc<dyn HttpTransport>) -> ClientCore {
        ClientCore::with_options(
            transport,
            Some(Arc::new(BearerToken)),
            "https://www.example.com",
            "/drive/v3",
            Some(Arc::new(JsonObjectParser::new())),
            Some(Arc::new(CommonRequestInitializer::new().with_key("k1"))),
            Some("test-app/1.0".to_string()),
            None,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_new_applies_defaults() {
        let core = ClientCore::new(
            FixedTransport::new(HttpResponse::new(200, "")),
            None,
            "https://www.example.com",
            "",
            Arc::new(JsonObjectParser::new()),
        )
        .unwrap();

        assert_eq!(core.root_url().as_str(), "https://www.example.com/");
        assert_eq!(core.base_url(), "https://www.example.com/");
        assert!(core.http_request_initializer().is_none());
        assert!(core.client_request_initializer().is_none());
        assert!(core.application_name().is_none());
        assert!(core.subscription_manager().is_none());
        assert!(!core.suppress_pattern_checks());
        assert!(core.object_parser().is_some());
        assert_eq!(core.user_agent(), FRAMEWORK_AGENT);
    }

    #[test]
    fn test_invalid_url_parts_are_rejected() {
        let transport: Arc<dyn HttpTransport> = FixedTransport::new(HttpResponse::new(200, ""));
        let parser: Arc<dyn ObjectParser> = Arc::new(JsonObjectParser::new());

        let err = ClientCore::new(transport.clone(), None, "", "v1", parser.clone()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRootUrl { .. }));

        let err = ClientCore::new(transport, None, "https://x/", "v", parser).unwrap_err();
        assert!(matches!(err, ClientError::InvalidServicePath { .. }));
    }

    #[test]
    fn test_build_http_request_resolves_against_base_url() {
        let core = core_with(FixedTransport::new(HttpResponse::new(200, "")));
        let request = ClientRequest::new(HttpMethod::Get, "files/abc").with_query("fields", "id");

        let http = core.build_http_request(request).unwrap();

        assert_eq!(http.method, HttpMethod::Get);
        assert_eq!(http.url, "https://www.example.com/drive/v3/files/abc");
        assert_eq!(http.query_param("fields"), Some("id"));
        assert_eq!(http.query_param("key"), Some("k1"));
        assert_eq!(http.header("authorization"), Some("Bearer t0ken"));
        assert_eq!(
            http.header("user-agent"),
            Some(format!("test-app/1.0 {FRAMEWORK_AGENT}").as_str())
        );
        assert!(http.body.is_none());
    }

    #[test]
    fn test_build_http_request_path_forms() {
        let core = core_with(FixedTransport::new(HttpResponse::new(200, "")));

        let http = core
            .build_http_request(ClientRequest::new(HttpMethod::Post, "/upload/drive/v3/files"))
            .unwrap();
        assert_eq!(http.url, "https://www.example.com/upload/drive/v3/files");

        let http = core
            .build_http_request(ClientRequest::new(HttpMethod::Get, "https://other.example.com/x"))
            .unwrap();
        assert_eq!(http.url, "https://other.example.com/x");
    }

    #[test]
    fn test_build_http_request_serialises_content() {
        let core = core_with(FixedTransport::new(HttpResponse::new(200, "")));
        let request = ClientRequest::new(HttpMethod::Post, "files")
            .with_content(serde_json::json!({"name": "report.txt"}));

        let http = core.build_http_request(request).unwrap();

        assert_eq!(http.header("content-type"), Some(crate::parser::JSON_CONTENT_TYPE));
        let body: serde_json::Value = serde_json::from_slice(http.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "report.txt");
    }

    #[test]
    fn test_initializer_error_propagates_unchanged() {
        let core = ClientCore::with_options(
            FixedTransport::new(HttpResponse::new(200, "")),
            None,
            "https://www.example.com/",
            "",
            None,
            Some(Arc::new(Refusing)),
            None,
            None,
            false,
        )
        .unwrap();

        let err = core
            .build_http_request(ClientRequest::new(HttpMethod::Get, "files"))
            .unwrap_err();
        match err {
            ClientError::Initializer { message } => assert_eq!(message, "quota exhausted"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct File {
        id: String,
    }

    #[tokio::test]
    async fn test_execute_parses_successful_response() -> anyhow::Result<()> {
        let transport = FixedTransport::new(HttpResponse::json(200, &serde_json::json!({"id": "abc"})));
        let client = TestClient {
            core: core_with(transport.clone()),
        };

        let file: File = client
            .execute(ClientRequest::new(HttpMethod::Get, "files/abc"))
            .await?;

        assert_eq!(file, File { id: "abc".to_string() });
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://www.example.com/drive/v3/files/abc");
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_maps_error_status() {
        let transport = FixedTransport::new(HttpResponse::new(404, "not found"));
        let client = TestClient {
            core: core_with(transport),
        };

        let err = client
            .execute_unparsed(ClientRequest::new(HttpMethod::Get, "files/missing"))
            .await
            .unwrap_err();

        match err {
            ClientError::HttpStatus { status, url, body } => {
                assert_eq!(status, 404);
                assert_eq!(url, "https://www.example.com/drive/v3/files/missing");
                assert_eq!(body, "not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_execute_without_parser_fails_before_sending() {
        let transport = FixedTransport::new(HttpResponse::new(200, "{}"));
        let core = ClientCore::with_options(
            transport.clone(),
            None,
            "https://www.example.com/",
            "",
            None,
            None,
            None,
            None,
            false,
        )
        .unwrap();

        let err = core
            .execute::<serde_json::Value>(ClientRequest::new(HttpMethod::Get, "files"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::MissingParser));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = TestClient {
            core: core_with(Arc::new(FailingTransport)),
        };

        let err = client
            .execute_unparsed(ClientRequest::new(HttpMethod::Get, "files"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport(TransportError::Connect { .. })));
    }
}
