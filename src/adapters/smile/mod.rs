//! Metadata service adapter

pub mod client;

pub use client::SmileHttpClient;
