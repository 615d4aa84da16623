//! Domain error types
//!
//! This module defines the error hierarchy for the publisher.
//! Errors don't expose third-party HTTP or NATS client types; the underlying
//! failure is carried as a message.

use thiserror::Error;

/// Main publisher error type
///
/// This is the primary error type used throughout the application.
/// It wraps the upstream-source and messaging error families and adds the
/// setup and per-item categories the batch driver distinguishes.
#[derive(Debug, Error)]
pub enum PublisherError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid or ambiguous record selection (mode flags)
    #[error("Selection error: {0}")]
    Selection(String),

    /// LIMS or metadata-service errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Message bus errors
    #[error("Messaging error: {0}")]
    Messaging(#[from] MessagingError),

    /// Canonical wire-format encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Malformed replay input (bad line shape, unparsable payload)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Upstream source errors
///
/// Errors that occur when talking to the LIMS REST API or the metadata service.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure (DNS, connection refused, timeout)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Server answered with something other than 200
    #[error("HTTP return code != 200: {status} ({url})")]
    Status { url: String, status: u16 },

    /// Body could not be decoded into the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl SourceError {
    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Transport { .. })
    }
}

/// Message bus errors
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Could not establish the bus connection
    #[error("Failed to connect to {url}: {message}")]
    ConnectionFailed { url: String, message: String },

    /// The bus rejected a publish
    #[error("Failed to publish to {topic}: {message}")]
    PublishFailed { topic: String, message: String },
}

impl From<std::io::Error> for PublisherError {
    fn from(err: std::io::Error) -> Self {
        PublisherError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PublisherError {
    fn from(err: serde_json::Error) -> Self {
        PublisherError::MalformedInput(err.to_string())
    }
}

impl From<toml::de::Error> for PublisherError {
    fn from(err: toml::de::Error) -> Self {
        PublisherError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publisher_error_display() {
        let err = PublisherError::Configuration("Missing lims.host".to_string());
        assert_eq!(err.to_string(), "Configuration error: Missing lims.host");
    }

    #[test]
    fn test_status_error_names_code() {
        let err = SourceError::Status {
            url: "https://lims/getRequestSamples?request=13370".to_string(),
            status: 401,
        };
        assert!(err.to_string().contains("401"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_source_error_conversion() {
        let err: PublisherError = SourceError::Transport {
            url: "https://lims".to_string(),
            message: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(err, PublisherError::Source(ref e) if e.is_transport()));
    }

    #[test]
    fn test_messaging_error_conversion() {
        let err: PublisherError = MessagingError::PublishFailed {
            topic: "IGO.new-request".to_string(),
            message: "no responders".to_string(),
        }
        .into();
        assert!(matches!(err, PublisherError::Messaging(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PublisherError = io_err.into();
        assert!(matches!(err, PublisherError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: PublisherError = json_err.into();
        assert!(matches!(err, PublisherError::MalformedInput(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PublisherError = toml_err.into();
        assert!(err.to_string().contains("TOML parse error"));
    }
}
