//! Configuration management for the publisher.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The configuration file supports:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SMILE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Required-property validation for every connection setting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use smile_publisher::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("smile-publisher.toml")?;
//!
//! println!("LIMS host: {}", config.lims.host);
//! println!("NATS server: {}", config.nats.url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`LimsConfig`] - LIMS host, credentials and publish topic
//! - [`NatsConfig`] - NATS server, consumer credentials and TLS key material
//! - [`SmileConfig`] - Metadata-service URL, topic and optional credentials
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [lims]
//! host = "igolims.example.org:8443"
//! username = "publisher"
//! password = "${LIMS_PASSWORD}"
//! publisher_topic = "IGO.new-request"
//!
//! [nats]
//! url = "tls://nats.example.org:4222"
//! consumer_name = "publisher"
//! consumer_password = "${NATS_PASSWORD}"
//! keystore_path = "/etc/nats/client.key"
//! truststore_path = "/etc/nats/client.pem"
//!
//! [smile]
//! request_url = "https://smile.example.org/request/"
//! publisher_topic = "MDB_STREAM.new-request"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, LimsConfig, LoggingConfig, NatsConfig, PublisherConfig, SmileConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
