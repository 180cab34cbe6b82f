//! The base client builder.
//!
//! [`ClientBuilder`] accumulates raw configuration values and hands them back
//! through accessors. It does not construct a client itself: each concrete
//! client wraps a [`ClientBuilder`] in its own builder type, reads the values
//! back in its `build` method, and passes them to its constructor.
//!
//! Setters take `&mut self` and return the same builder, so calls chain and
//! the borrow checker rules out concurrent configuration. Values are stored
//! unvalidated; the root URL and service path are checked when a client is
//! constructed from them.

use std::sync::Arc;

use crate::{
    ClientRequestInitializer, ClientSettings, HttpRequestInitializer, HttpTransport, ObjectParser,
    SubscriptionManager,
};

/// Mutable accumulator of client configuration.
///
/// Accessors return values exactly as they were set. `root_url()` may lack its
/// trailing `/` and `service_path()` may still be invalid; read the normalised
/// forms from the built client instead.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    transport: Arc<dyn HttpTransport>,
    http_request_initializer: Option<Arc<dyn HttpRequestInitializer>>,
    root_url: String,
    service_path: String,
    object_parser: Option<Arc<dyn ObjectParser>>,
    client_request_initializer: Option<Arc<dyn ClientRequestInitializer>>,
    application_name: Option<String>,
    subscription_manager: Option<Arc<dyn SubscriptionManager>>,
    suppress_pattern_checks: bool,
}

impl ClientBuilder {
    /// Creates a builder with the required values; every other setting starts
    /// at its default (`None` / `false`).
    ///
    /// `root_url` is expected to end with `/`; a missing slash is added when
    /// the client is constructed.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        root_url: impl Into<String>,
        service_path: impl Into<String>,
        object_parser: Option<Arc<dyn ObjectParser>>,
        http_request_initializer: Option<Arc<dyn HttpRequestInitializer>>,
    ) -> Self {
        Self {
            transport,
            http_request_initializer,
            root_url: root_url.into(),
            service_path: service_path.into(),
            object_parser,
            client_request_initializer: None,
            application_name: None,
            subscription_manager: None,
            suppress_pattern_checks: false,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    pub fn http_request_initializer(&self) -> Option<&Arc<dyn HttpRequestInitializer>> {
        self.http_request_initializer.as_ref()
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn service_path(&self) -> &str {
        &self.service_path
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

    // -- setters ------------------------------------------------------------

    pub fn set_root_url(&mut self, root_url: impl Into<String>) -> &mut Self {
        self.root_url = root_url.into();
        self
    }

    pub fn set_service_path(&mut self, service_path: impl Into<String>) -> &mut Self {
        self.service_path = service_path.into();
        self
    }

    pub fn set_http_request_initializer(
        &mut self,
        initializer: Option<Arc<dyn HttpRequestInitializer>>,
    ) -> &mut Self {
        self.http_request_initializer = initializer;
        self
    }

    pub fn set_client_request_initializer(
        &mut self,
        initializer: Option<Arc<dyn ClientRequestInitializer>>,
    ) -> &mut Self {
        self.client_request_initializer = initializer;
        self
    }

    /// Sets the name sent in the `User-Agent` header, or clears it with `None`.
    pub fn set_application_name(&mut self, application_name: Option<&str>) -> &mut Self {
        self.application_name = application_name.map(str::to_string);
        self
    }

    pub fn set_subscription_manager(
        &mut self,
        subscription_manager: Option<Arc<dyn SubscriptionManager>>,
    ) -> &mut Self {
        self.subscription_manager = subscription_manager;
        self
    }

    /// Sets whether generated requests skip discovery pattern checks on
    /// required parameters.
    pub fn set_suppress_pattern_checks(&mut self, suppress_pattern_checks: bool) -> &mut Self {
        self.suppress_pattern_checks = suppress_pattern_checks;
        self
    }

    /// Copies every value present in `settings`; absent values are left as-is.
    pub fn apply_settings(&mut self, settings: &ClientSettings) -> &mut Self {
        if let Some(root_url) = &settings.root_url {
            self.set_root_url(root_url.as_str());
        }
        if let Some(service_path) = &settings.service_path {
            self.set_service_path(service_path.as_str());
        }
        if let Some(application_name) = &settings.application_name {
            self.set_application_name(Some(application_name.as_str()));
        }
        if let Some(suppress) = settings.suppress_pattern_checks {
            self.set_suppress_pattern_checks(suppress);
        }
        self
    }
}
