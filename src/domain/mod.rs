//! Domain models and types for the publisher.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **LIMS models** ([`Request`], [`SampleStub`], [`Delivery`], [`SampleManifest`])
//! - **The composite record** ([`RequestWithManifests`]) that is published to the bus
//! - **Error types** ([`PublisherError`], [`SourceError`], [`MessagingError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PublisherError>`]:
//!
//! ```rust,no_run
//! use smile_publisher::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = smile_publisher::config::load_config("smile-publisher.toml")?;
//!     println!("{}", config.lims.host);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manifest;
pub mod record;
pub mod request;
pub mod result;
pub mod serde_ext;

// Re-export commonly used types for convenience
pub use errors::{MessagingError, PublisherError, SourceError};
pub use manifest::{CmoSampleIdFields, Library, QcReport, Run, SampleManifest};
pub use record::{project_id_of, RequestWithManifests};
pub use request::{Delivery, Request, SampleStub};
pub use result::Result;
