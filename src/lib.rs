//! # smile-publisher
//!
//! Fetches sequencing request metadata from the IGO LIMS REST API, joins each
//! request with its per-sample manifests and publishes the composite record to
//! a NATS topic. Records can also be replayed from JSON files or fetched
//! pre-joined from the metadata service.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Run-mode selection, manifest assembly, wire encoding and the batch driver
//! - [`adapters`] - LIMS and metadata-service HTTP clients, NATS publisher
//! - [`domain`] - Request, manifest and composite record types; errors
//! - [`config`] - TOML configuration with environment overrides
//! - [`logging`] - Structured logging setup
//!
//! ## Error Handling
//!
//! Library code returns [`domain::PublisherError`]. Per-item failures during a
//! batch are recorded in the run summary instead of aborting the run:
//!
//! ```rust,no_run
//! use smile_publisher::domain::PublisherError;
//!
//! fn example() -> Result<(), PublisherError> {
//!     let config = smile_publisher::config::load_config("smile-publisher.toml")?;
//!     println!("Publishing to {}", config.lims.publisher_topic);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
