//! Normalised URL parts a client is addressed by.
//!
//! A service is reached at `root URL + service path`. Both parts are stored in
//! a canonical form so the concatenation is always well formed:
//!
//! - [`RootUrl`] always ends with `/`.
//! - [`ServicePath`] is either empty or ends with `/` and never starts with `/`.
//!
//! Raw strings are accepted by the builder as-is and normalised only when a
//! client is constructed. Deserialising either type goes through the same
//! normalisation.

use serde::{Deserialize, Serialize};

use crate::ClientError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped URL parts.
// Generates: as_str(), TryFrom<String> (via parse), AsRef<str>, Display.
// ---------------------------------------------------------------------------
macro_rules! url_part {
    ($name:ident) => {
        impl $name {
            /// Returns the normalised value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ClientError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------

/// Root URL of a service, e.g. `https://www.example.com/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct RootUrl(String);

impl RootUrl {
    /// Normalises `value` into a root URL.
    ///
    /// A missing trailing `/` is appended. Returns
    /// [`ClientError::InvalidRootUrl`] if the value is empty or blank.
    pub fn parse(value: impl Into<String>) -> Result<Self, ClientError> {
        let mut value = value.into();
        if value.trim().is_empty() {
            return Err(ClientError::InvalidRootUrl {
                value,
                reason: "root URL cannot be empty".to_string(),
            });
        }
        if !value.ends_with('/') {
            value.push('/');
        }
        Ok(Self(value))
    }

    /// Returns the scheme and authority part of the URL, without a trailing `/`.
    ///
    /// `https://www.example.com/api/` yields `https://www.example.com`. Values
    /// without a `scheme://` prefix are returned minus their trailing `/`.
    pub fn origin(&self) -> &str {
        let after_scheme = self.0.find("://").map(|i| i + 3).unwrap_or(0);
        match self.0[after_scheme..].find('/') {
            Some(slash) => &self.0[..after_scheme + slash],
            None => &self.0,
        }
    }
}

url_part!(RootUrl);

// ---------------------------------------------------------------------------

/// Service path appended to the root URL, e.g. `drive/v3/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ServicePath(String);

impl ServicePath {
    /// Normalises `value` into a service path.
    ///
    /// - `""` and `"/"` both become the empty path.
    /// - Any other single-character value is rejected with
    ///   [`ClientError::InvalidServicePath`].
    /// - Longer values gain a trailing `/` when missing and lose one leading `/`.
    pub fn parse(value: impl Into<String>) -> Result<Self, ClientError> {
        let mut value = value.into();
        match value.chars().count() {
            0 => Ok(Self(value)),
            1 if value == "/" => Ok(Self(String::new())),
            1 => Err(ClientError::InvalidServicePath {
                value,
                reason: "service path must equal \"/\" if it is of length 1".to_string(),
            }),
            _ => {
                if !value.ends_with('/') {
                    value.push('/');
                }
                if value.starts_with('/') {
                    value.remove(0);
                }
                Ok(Self(value))
            }
        }
    }
}

url_part!(ServicePath);

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_url_gains_trailing_slash() {
        let url = RootUrl::parse("https://www.example.com").unwrap();
        assert_eq!(url.as_str(), "https://www.example.com/");
    }

    #[test]
    fn test_root_url_keeps_existing_trailing_slash() {
        let url = RootUrl::parse("https://www.example.com/").unwrap();
        assert_eq!(url.as_str(), "https://www.example.com/");
    }

    #[test]
    fn test_root_url_rejects_blank_values() {
        for value in ["", "   "] {
            let err = RootUrl::parse(value).unwrap_err();
            assert!(matches!(err, ClientError::InvalidRootUrl { .. }), "{value:?}");
        }
    }

    #[test]
    fn test_root_url_origin() {
        let url = RootUrl::parse("https://www.example.com/api/").unwrap();
        assert_eq!(url.origin(), "https://www.example.com");

        let url = RootUrl::parse("http://localhost:8080").unwrap();
        assert_eq!(url.origin(), "http://localhost:8080");
    }

    #[test]
    fn test_service_path_normalisation() {
        let cases = [
            ("", ""),
            ("/", ""),
            ("foo", "foo/"),
            ("foo/", "foo/"),
            ("/foo", "foo/"),
            ("/foo/bar/", "foo/bar/"),
        ];
        for (input, expected) in cases {
            let path = ServicePath::parse(input).unwrap();
            assert_eq!(path.as_str(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_deserialising_normalises_and_validates() {
        let url: RootUrl = serde_json::from_str(r#""https://a.example.com""#).unwrap();
        assert_eq!(url.as_str(), "https://a.example.com/");
        assert!(serde_json::from_str::<RootUrl>(r#""""#).is_err());

        let path: ServicePath = serde_json::from_str(r#""/drive/v3""#).unwrap();
        assert_eq!(path.as_str(), "drive/v3/");
        assert!(serde_json::from_str::<ServicePath>(r#""x""#).is_err());
    }

    #[test]
    fn test_service_path_rejects_single_non_slash_character() {
        let err = ServicePath::parse("a").unwrap_err();
        match err {
            ClientError::InvalidServicePath { value, .. } => assert_eq!(value, "a"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
