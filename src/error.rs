//! @ai:module:intent Define error types for the report engine
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Unified error type for engine operations that can fail
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown metric: {key}")]
    UnknownMetric { key: String },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Unsupported input file: {0}")]
    UnsupportedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_metric_message_names_key() {
        let err = Error::UnknownMetric {
            key: "radon".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown metric: radon");
    }

    #[test]
    fn test_parse_failures_convert_with_question_mark() {
        fn parse_toml(text: &str) -> Result<toml::Value> {
            Ok(toml::from_str(text)?)
        }
        fn parse_json(text: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(text)?)
        }
        fn read(path: &std::path::Path) -> Result<String> {
            Ok(std::fs::read_to_string(path)?)
        }

        assert!(matches!(parse_toml("key = "), Err(Error::Toml(_))));
        assert!(matches!(parse_json("{"), Err(Error::Json(_))));

        let dir = tempfile::TempDir::new().unwrap();
        let err = read(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("IO error: "));
    }
}
