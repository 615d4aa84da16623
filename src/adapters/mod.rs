//! External system integrations.
//!
//! - [`lims`] - LIMS REST API (requests, sample manifests, deliveries)
//! - [`smile`] - Metadata service returning pre-joined records
//! - [`messaging`] - Message bus abstraction (trait-based)
//! - [`nats`] - NATS implementation of the message bus
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits ([`lims::LimsApi`],
//! [`messaging::MessagePublisher`], [`messaging::PublisherConnector`]) so the batch
//! driver can be exercised with in-memory implementations.
//!
//! ```rust,no_run
//! use smile_publisher::adapters::lims::{LimsApi, LimsHttpClient};
//! use smile_publisher::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("smile-publisher.toml")?;
//! let lims = LimsHttpClient::new(&config.lims)?;
//! let request = lims.fetch_request("13370_1").await?;
//! println!("{} has {} sample(s)", request.request_id, request.samples.len());
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod lims;
pub mod messaging;
pub mod nats;
pub mod smile;
