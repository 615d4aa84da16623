//! Core pipeline logic.
//!
//! # Modules
//!
//! - [`selection`] - Run-mode selection and the delivery-window filter
//! - [`assemble`] - Manifest assembly for LIMS requests
//! - [`wire`] - Canonical binary encoding of composite records
//! - [`publish`] - The batch driver, record sources and run summary
//!
//! # Publish Workflow
//!
//! 1. **Select**: resolve the run mode once from the command line
//! 2. **Enumerate**: explicit IDs, delivery window, or a replay file
//! 3. **Fetch**: request + manifests from the LIMS, or a pre-joined record
//! 4. **Filter**: optionally drop non-CMO requests
//! 5. **Encode & Publish**: one message per record, failures isolated per item
//! 6. **Report**: log the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use smile_publisher::adapters::lims::LimsHttpClient;
//! use smile_publisher::adapters::nats::NatsConnector;
//! use smile_publisher::adapters::smile::SmileHttpClient;
//! use smile_publisher::config::load_config;
//! use smile_publisher::core::publish::{PublishCoordinator, RecordFilter, Topics};
//! use smile_publisher::core::selection::Selection;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("smile-publisher.toml")?;
//! let lims = LimsHttpClient::new(&config.lims)?;
//! let smile = SmileHttpClient::new(&config.smile)?;
//! let topics = Topics {
//!     lims: config.lims.publisher_topic.clone(),
//!     smile: config.smile.publisher_topic.clone(),
//! };
//!
//! let coordinator = PublishCoordinator::new(
//!     Arc::new(NatsConnector::new(config.nats.clone())),
//!     RecordFilter::new(false),
//! );
//! let selection = Selection::RequestIds(vec!["13370_1".to_string()]);
//! let summary = coordinator.execute(&selection, &lims, &smile, &topics).await?;
//!
//! println!("Published: {}", summary.published());
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod publish;
pub mod selection;
pub mod wire;
