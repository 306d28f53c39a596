//! Parser configuration.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Status code hosts report binding failures with, unless configured.
pub const DEFAULT_ERROR_STATUS: u16 = 400;

/// Read-only configuration shared by every binding pass of a parser.
///
/// Deserializable from any serde format; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// HTTP status a host should answer binding failures with.
    ///
    /// Zero or an out-of-range code falls back to `400 Bad Request`.
    pub error_status: u16,

    /// Use the exact field name, instead of its lower-cased form, when a
    /// tag leaves the key segment empty.
    pub disable_auto_lower: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            error_status: DEFAULT_ERROR_STATUS,
            disable_auto_lower: false,
        }
    }
}

impl ParserConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error status code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_status(mut self, status: u16) -> Self {
        self.error_status = status;
        self
    }

    /// Keep field names as-is when deriving keys.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_disable_auto_lower(mut self, disable: bool) -> Self {
        self.disable_auto_lower = disable;
        self
    }

    /// The effective error status.
    #[must_use]
    pub fn error_status(&self) -> StatusCode {
        if self.error_status == 0 {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::from_u16(self.error_status).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = ParserConfig::new();
        assert_eq!(config.error_status(), StatusCode::BAD_REQUEST);
        assert!(!config.disable_auto_lower);
    }

    #[test]
    fn zero_and_invalid_status_fall_back() {
        assert_eq!(
            ParserConfig::new().with_error_status(0).error_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ParserConfig::new().with_error_status(42).error_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ParserConfig::new().with_error_status(422).error_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn deserialize_partial() {
        let config: ParserConfig =
            serde_json::from_str(r#"{ "disable_auto_lower": true }"#).unwrap();
        assert_eq!(config.error_status, DEFAULT_ERROR_STATUS);
        assert!(config.disable_auto_lower);
    }

    #[test]
    fn serde_round_trip() {
        let config = ParserConfig::new()
            .with_error_status(409)
            .with_disable_auto_lower(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
