//! The default JSON object parser.

use serde::de::DeserializeOwned;

use crate::{ObjectParser, ParseError};

/// Content type produced and accepted by [`JsonObjectParser`].
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// [`ObjectParser`] for JSON payloads backed by `serde_json`.
///
/// An empty (or whitespace-only) body parses as `null`, which lets
/// `execute::<()>` and `execute::<Option<T>>` succeed on `204 No Content`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObjectParser;

impl JsonObjectParser {
    /// Creates the parser.
    pub fn new() -> Self {
        Self
    }
}

impl ObjectParser for JsonObjectParser {
    fn content_type(&self) -> &str {
        JSON_CONTENT_TYPE
    }

    fn parse_value(&self, content: &[u8]) -> Result<serde_json::Value, ParseError> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(content)?)
    }
}

/// Parses `content` with `parser` and converts the result into `T`.
pub fn parse_as<T: DeserializeOwned>(
    parser: &dyn ObjectParser,
    content: &[u8],
) -> Result<T, ParseError> {
    let value = parser.parse_value(content)?;
    Ok(serde_json::from_value(value)?)
}
