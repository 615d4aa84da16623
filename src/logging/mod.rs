//! Logging
//!
//! All diagnostics go through `tracing` macros. The binary installs the global
//! subscriber with [`init_logging`]; library code never writes to stdout/stderr
//! for diagnostics, so tests can capture output with a scoped subscriber.
//!
//! # Example
//!
//! ```no_run
//! use smile_publisher::logging::init_logging;
//! use smile_publisher::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(request_id = "13370_1", "Publishing request");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
