//! Batch publishing
//!
//! This module provides the batch driver and its supporting types:
//! - Record sources for ID-driven batches
//! - The publish coordinator
//! - Per-item outcomes and the run summary

pub mod driver;
pub mod source;
pub mod summary;

pub use driver::{PublishCoordinator, Topics};
pub use source::{FetchedRecord, LimsRecordSource, RecordFilter, RecordSource};
pub use summary::{FailureStage, ItemOutcome, ItemStatus, PublishSummary};
