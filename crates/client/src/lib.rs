//! Core client framework for HTTP-based service clients.
//!
//! This crate contains the capability traits a service client is assembled
//! from, the validated URL types, the request/response value types, and the
//! shared base state every concrete client embeds. Transport crates implement
//! the traits defined here; they never add client rules.
//!
//! ## Architectural Layer
//!
//! **Client state + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a client needs; infrastructure crates define *how* to
//! supply it (see the `transport` crate for the `reqwest` transport and the
//! `testing` crate for mock clients).
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Normalised URL parts (`RootUrl`, `ServicePath`) |
//! | [`types`] | Request/response value types (`HttpRequest`, `ClientRequest`, etc.) |
//! | [`ports`] | Capability traits (`HttpTransport`, initialisers, `ObjectParser`, ...) |
//! | [`parser`] | The default JSON [`ObjectParser`] |
//! | [`initializers`] | Ready-made client-request initialisers |
//! | [`base`] | Shared client state ([`ClientCore`]) and the [`ApiClient`] trait |
//! | [`builder`] | The base [`ClientBuilder`] |
//! | [`settings`] | Serialisable builder settings |
//! | [`errors`] | Error types |

pub mod base;
pub mod builder;
pub mod errors;
pub mod identifiers;
pub mod initializers;
pub mod parser;
pub mod ports;
pub mod settings;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use base::{ApiClient, ClientCore, FRAMEWORK_AGENT};
pub use builder::ClientBuilder;
pub use errors::{ClientError, ParseError, TransportError};
pub use identifiers::{RootUrl, ServicePath};
pub use initializers::CommonRequestInitializer;
pub use parser::{parse_as, JsonObjectParser};
pub use ports::{
    ClientRequestInitializer, HttpRequestInitializer, HttpTransport, ObjectParser,
    SubscriptionManager,
};
pub use settings::ClientSettings;
pub use types::{ClientRequest, HttpMethod, HttpRequest, HttpResponse};
