//! NATS adapter

pub mod publisher;

pub use publisher::{NatsConnector, NatsPublisher};
