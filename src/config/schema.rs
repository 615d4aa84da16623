//! Configuration schema types
//!
//! This module defines the configuration structure for the publisher. Every LIMS,
//! NATS and metadata-service property is required regardless of the selected
//! run mode.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main publisher configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// LIMS REST API connection
    pub lims: LimsConfig,

    /// NATS connection and credentials
    pub nats: NatsConfig,

    /// Metadata service endpoint
    pub smile: SmileConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PublisherConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing or invalid property
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.lims.validate()?;
        self.nats.validate()?;
        self.smile.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// LIMS REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimsConfig {
    /// Host (and optional port) of the LIMS, without scheme
    #[serde(default)]
    pub host: String,

    /// Basic-auth username
    #[serde(default)]
    pub username: String,

    /// Basic-auth password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Topic live-fetched and replayed records are published to
    #[serde(default)]
    pub publisher_topic: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl LimsConfig {
    fn validate(&self) -> Result<(), String> {
        require("lims.host", &self.host)?;
        if self.host.contains("://") {
            return Err("lims.host must not include a scheme".to_string());
        }
        Url::parse(&format!("https://{}/", self.host))
            .map_err(|e| format!("lims.host '{}' is not a valid host: {}", self.host, e))?;
        require("lims.username", &self.username)?;
        require_secret("lims.password", self.password.as_ref())?;
        require("lims.publisher_topic", &self.publisher_topic)?;
        if self.timeout_seconds == 0 {
            return Err("lims.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

/// NATS connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NatsConfig {
    /// Server URL, e.g. `tls://nats.example.org:4222`
    #[serde(default)]
    pub url: String,

    /// Consumer (user) name
    #[serde(default)]
    pub consumer_name: String,

    /// Consumer password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub consumer_password: Option<SecretString>,

    /// Client private key (PEM)
    #[serde(default)]
    pub keystore_path: String,

    /// Client certificate (PEM)
    #[serde(default)]
    pub truststore_path: String,
}

impl NatsConfig {
    fn validate(&self) -> Result<(), String> {
        require("nats.url", &self.url)?;
        Url::parse(&self.url).map_err(|e| format!("nats.url '{}' is invalid: {}", self.url, e))?;
        require("nats.consumer_name", &self.consumer_name)?;
        require_secret("nats.consumer_password", self.consumer_password.as_ref())?;
        require("nats.keystore_path", &self.keystore_path)?;
        require("nats.truststore_path", &self.truststore_path)?;
        Ok(())
    }
}

/// Metadata service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmileConfig {
    /// Base URL; the request ID is appended verbatim
    #[serde(default)]
    pub request_url: String,

    /// Topic metadata-service records are published to
    #[serde(default)]
    pub publisher_topic: String,

    /// Optional basic-auth username
    #[serde(default)]
    pub username: Option<String>,

    /// Optional basic-auth password
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl SmileConfig {
    fn validate(&self) -> Result<(), String> {
        require("smile.request_url", &self.request_url)?;
        if !self.request_url.starts_with("http://") && !self.request_url.starts_with("https://") {
            return Err("smile.request_url must start with http:// or https://".to_string());
        }
        Url::parse(&self.request_url)
            .map_err(|e| format!("smile.request_url '{}' is invalid: {}", self.request_url, e))?;
        require("smile.publisher_topic", &self.publisher_topic)?;
        if self.password.is_some() && self.username.is_none() {
            return Err("smile.password is set but smile.username is missing".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn require(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{name} is required"));
    }
    Ok(())
}

fn require_secret(name: &str, value: Option<&SecretString>) -> Result<(), String> {
    use secrecy::ExposeSecret;

    match value {
        Some(secret) if !secret.expose_secret().is_empty() => Ok(()),
        _ => Err(format!("{name} is required")),
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
