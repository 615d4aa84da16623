//! Message bus abstraction traits
//!
//! The batch driver only sees these traits: it asks a [`PublisherConnector`] for
//! one connection per run, publishes each item through it and shuts it down at
//! the end.

use crate::domain::Result;
use async_trait::async_trait;

/// An open bus connection
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publish one payload on `topic`
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::MessagingError::PublishFailed`] if the bus rejects the message.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;

    /// Flush pending messages and release the connection
    ///
    /// # Errors
    ///
    /// Returns an error if pending messages could not be flushed.
    async fn shutdown(&self) -> Result<()>;
}

/// Opens bus connections
#[async_trait]
pub trait PublisherConnector: Send + Sync {
    /// Connect to the bus
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::MessagingError::ConnectionFailed`] if no connection can be made.
    async fn connect(&self) -> Result<Box<dyn MessagePublisher>>;
}
