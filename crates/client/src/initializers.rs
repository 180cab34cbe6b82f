//! Ready-made client-request initialisers.

use crate::{ClientError, ClientRequest, ClientRequestInitializer};

/// Adds the parameters most services accept on every request.
///
/// Only parameters that are set are added; an existing value on the request is
/// overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonRequestInitializer {
    key: Option<String>,
    quota_user: Option<String>,
}

impl CommonRequestInitializer {
    /// Creates an initialiser that adds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key sent as the `key` query parameter.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the quota user sent as the `quotaUser` query parameter.
    #[must_use]
    pub fn with_quota_user(mut self, quota_user: impl Into<String>) -> Self {
        self.quota_user = Some(quota_user.into());
        self
    }

    /// Returns the API key, if set.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the quota user, if set.
    pub fn quota_user(&self) -> Option<&str> {
        self.quota_user.as_deref()
    }
}

impl ClientRequestInitializer for CommonRequestInitializer {
    fn initialize(&self, request: &mut ClientRequest) -> Result<(), ClientError> {
        if let Some(key) = &self.key {
            request.set_query("key", key.as_str());
        }
        if let Some(quota_user) = &self.quota_user {
            request.set_query("quotaUser", quota_user.as_str());
        }
        Ok(())
    }
}
