//! Mock client and its builder.
//!
//! [`MockClient`] is safe to share between threads once built.
//! [`MockClientBuilder`] is not meant for concurrent configuration; its setters
//! take `&mut self`.

use std::sync::Arc;

use client::{
    ApiClient, ClientBuilder, ClientCore, ClientError, ClientRequestInitializer, ClientSettings,
    HttpRequestInitializer, HttpTransport, ObjectParser, SubscriptionManager,
};
use tracing::debug;

/// Concrete [`ApiClient`] with no service-specific surface.
///
/// Both constructors forward to the matching [`ClientCore`] constructor and
/// return its result unchanged.
#[derive(Debug, Clone)]
pub struct MockClient {
    core: ClientCore,
}

impl MockClient {
    /// See [`ClientCore::new`].
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        http_request_initializer: Option<Arc<dyn HttpRequestInitializer>>,
        root_url: &str,
        service_path: &str,
        object_parser: Arc<dyn ObjectParser>,
    ) -> Result<Self, ClientError> {
        let core = ClientCore::new(
            transport,
            http_request_initializer,
            root_url,
            service_path,
            object_parser,
        )?;
        Ok(Self { core })
    }

    /// See [`ClientCore::with_options`].
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
        let core = ClientCore::with_options(
            transport,
            http_request_initializer,
            root_url,
            service_path,
            object_parser,
            client_request_initializer,
            application_name,
            subscription_manager,
            suppress_pattern_checks,
        )?;
        Ok(Self { core })
    }
}

impl ApiClient for MockClient {
    fn core(&self) -> &ClientCore {
        &self.core
    }
}

// ---------------------------------------------------------------------------

/// Builder for [`MockClient`].
///
/// Every setter delegates to the wrapped [`ClientBuilder`] and returns this
/// builder, so chains stay typed as `MockClientBuilder`.
#[derive(Debug, Clone)]
pub struct MockClientBuilder {
    base: ClientBuilder,
}

impl MockClientBuilder {
    /// `root_url` is expected to end with `/`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        root_url: impl Into<String>,
        service_path: impl Into<String>,
        object_parser: Option<Arc<dyn ObjectParser>>,
        http_request_initializer: Option<Arc<dyn HttpRequestInitializer>>,
    ) -> Self {
        Self {
            base: ClientBuilder::new(
                transport,
                root_url,
                service_path,
                object_parser,
                http_request_initializer,
            ),
        }
    }

    /// Returns the wrapped base builder.
    pub fn base(&self) -> &ClientBuilder {
        &self.base
    }

    /// Builds a client from the current configuration.
    ///
    /// May be called repeatedly; each call yields a new client.
    pub fn build(&self) -> Result<MockClient, ClientError> {
        let base = &self.base;
        debug!(
            root_url = base.root_url(),
            service_path = base.service_path(),
            "Building mock client"
        );
        MockClient::with_options(
            Arc::clone(base.transport()),
            base.http_request_initializer().cloned(),
            base.root_url(),
            base.service_path(),
            base.object_parser().cloned(),
            base.client_request_initializer().cloned(),
            base.application_name().map(str::to_string),
            base.subscription_manager().cloned(),
            base.suppress_pattern_checks(),
        )
    }

    pub fn set_root_url(&mut self, root_url: impl Into<String>) -> &mut Self {
        self.base.set_root_url(root_url);
        self
    }

    pub fn set_service_path(&mut self, service_path: impl Into<String>) -> &mut Self {
        self.base.set_service_path(service_path);
        self
    }

    pub fn set_client_request_initializer(
        &mut self,
        initializer: Option<Arc<dyn ClientRequestInitializer>>,
    ) -> &mut Self {
        self.base.set_client_request_initializer(initializer);
        self
    }

    pub fn set_http_request_initializer(
        &mut self,
        initializer: Option<Arc<dyn HttpRequestInitializer>>,
    ) -> &mut Self {
        self.base.set_http_request_initializer(initializer);
        self
    }

    pub fn set_application_name(&mut self, application_name: Option<&str>) -> &mut Self {
        self.base.set_application_name(application_name);
        self
    }

    pub fn set_subscription_manager(
        &mut self,
        subscription_manager: Option<Arc<dyn SubscriptionManager>>,
    ) -> &mut Self {
        self.base.set_subscription_manager(subscription_manager);
        self
    }

    pub fn set_suppress_pattern_checks(&mut self, suppress_pattern_checks: bool) -> &mut Self {
        self.base.set_suppress_pattern_checks(suppress_pattern_checks);
        self
    }

    pub fn apply_settings(&mut self, settings: &ClientSettings) -> &mut Self {
        self.base.apply_settings(settings);
        self
    }
}
