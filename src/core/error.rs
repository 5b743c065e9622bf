//! Error types for Open Moon Map
//!
//! This module provides structured error handling using thiserror.
//! `OmmError` is fatal and propagates to the caller; `ExtractError` is
//! recovered locally by skipping the offending record.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, OmmError>;

/// Fatal errors raised while building a map
#[derive(Error, Debug)]
pub enum OmmError {
    /// IO error during cache, input or output file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error for a whole response or input file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Query service answered with a non-success status
    #[error("Query service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Entity missing from an entity data document
    #[error("Entity {entity} not found in entity data")]
    EntityNotFound { entity: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<OmmError>,
    },
}

impl OmmError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        OmmError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        OmmError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

/// Reasons a single SPARQL row cannot become a node
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Required binding is absent from the row
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Value is not an entity IRI with a positive numeric id
    #[error("malformed entity reference: {0}")]
    MalformedEntity(String),

    /// Value is not a `Point(lon lat)` literal with numeric components
    #[error("malformed coordinate literal: {0}")]
    MalformedPoint(String),

    /// Value is not a decimal number
    #[error("malformed number: {0}")]
    MalformedNumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_context() {
        let err = OmmError::invalid_config("bad value");
        let wrapped = err.with_context("loading config");
        assert!(wrapped.to_string().contains("loading config"));
        assert!(wrapped.to_string().contains("bad value"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OmmError = io_err.into();
        assert!(matches!(err, OmmError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: OmmError = json_err.into();
        assert!(matches!(err, OmmError::Json(_)));
    }

    #[test]
    fn test_status_error_display() {
        let err = OmmError::Status {
            status: 429,
            body: "Too Many Requests".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too Many Requests"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(OmmError::invalid_config("test"));
        let err = result.context("during processing").unwrap_err();
        assert!(err.to_string().contains("during processing"));
    }

    #[test]
    fn test_extract_error_display() {
        assert_eq!(
            ExtractError::MissingField("geo").to_string(),
            "missing field `geo`"
        );
        assert!(ExtractError::MalformedPoint("Point(x)".into())
            .to_string()
            .contains("Point(x)"));
    }
}
