//! Test support for code built on the `client` framework.
//!
//! The framework's [`client::ApiClient`] is a trait over shared base state, so
//! there is no concrete client to construct without a real service
//! description. This crate supplies one, together with the test doubles
//! needed to drive it:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`MockClient`] | Concrete client over [`client::ClientCore`]; no behaviour of its own |
//! | [`MockClientBuilder`] | Builder for [`MockClient`] mirroring [`client::ClientBuilder`] |
//! | [`MockHttpTransport`] | Transport that records requests and replays canned responses |
//! | [`MockRequestInitializer`] | Counting request initialiser for both hook points |
//! | [`NoopSubscriptionManager`] | Named opaque subscription manager handle |
//! | [`init_test_tracing`] | Installs a `tracing` subscriber for test output |
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use client::{ApiClient, JsonObjectParser};
//! use testing::{MockClientBuilder, MockHttpTransport};
//!
//! let client = MockClientBuilder::new(
//!     Arc::new(MockHttpTransport::new()),
//!     "https://www.example.com/",
//!     "drive/v3/",
//!     Some(Arc::new(JsonObjectParser::new())),
//!     None,
//! )
//! .set_application_name(Some("example/1.0"))
//! .build()
//! .unwrap();
//!
//! assert_eq!(client.base_url(), "https://www.example.com/drive/v3/");
//! ```

pub mod doubles;
pub mod mock_client;
pub mod telemetry;
pub mod transport;

pub use doubles::{MockRequestInitializer, NoopSubscriptionManager};
pub use mock_client::{MockClient, MockClientBuilder};
pub use telemetry::init_test_tracing;
pub use transport::{MockHttpTransport, RecordedRequest};
