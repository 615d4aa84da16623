//! Message bus abstraction (trait-based)

pub mod traits;

pub use traits::{MessagePublisher, PublisherConnector};
