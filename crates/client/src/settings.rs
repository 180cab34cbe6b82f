//! Serialisable builder settings.
//!
//! Lets the addressing and identification of a client come from a JSON
//! document (a config file, an environment variable) instead of code. Only
//! plain values are covered; capability handles are always set in code.

use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Optional overrides applied to a builder with
/// [`crate::ClientBuilder::apply_settings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSettings {
    /// Root URL of the service; normalised when the client is built.
    #[serde(default)]
    pub root_url: Option<String>,
    /// Service path under the root URL; normalised when the client is built.
    #[serde(default)]
    pub service_path: Option<String>,
    /// Name sent in the `User-Agent` header.
    #[serde(default)]
    pub application_name: Option<String>,
    /// Whether discovery pattern checks on required parameters are skipped.
    #[serde(default)]
    pub suppress_pattern_checks: Option<bool>,
}

impl ClientSettings {
    /// Parses settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] for malformed JSON or unknown keys.
    pub fn from_json(text: &str) -> Result<Self, ClientError> {
        serde_json::from_str(text).map_err(|e| ClientError::Configuration {
            message: format!("invalid client settings: {e}"),
        })
    }
}
