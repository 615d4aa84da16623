//! Publish command implementation
//!
//! This module implements the `publish` command: resolve the run mode, build the
//! upstream clients and run one batch against NATS.

use crate::adapters::lims::LimsHttpClient;
use crate::adapters::nats::NatsConnector;
use crate::adapters::smile::SmileHttpClient;
use crate::config::load_config;
use crate::core::publish::{PublishCoordinator, PublishSummary, RecordFilter, Topics};
use crate::core::selection::{Selection, SelectionInputs};
use crate::domain::{MessagingError, PublisherError};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the publish command
///
/// Exactly one of the run modes (`-r`, `-s`/`-e`, `-j`, `-p`, `-m`) must be given.
#[derive(Args, Debug, Default)]
pub struct PublishArgs {
    /// LIMS request IDs to fetch and publish (comma-separated)
    #[arg(short = 'r', long, value_name = "IDS")]
    pub request_ids: Option<String>,

    /// Start of the delivery window (MM/DD/YYYY), requires --end-date
    #[arg(short = 's', long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// End of the delivery window (MM/DD/YYYY), requires --start-date
    #[arg(short = 'e', long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// Publish the request record stored in this JSON file
    #[arg(short = 'j', long, value_name = "FILE")]
    pub json_file: Option<PathBuf>,

    /// Publish every `<ignored>\t<topic>\t<json>` line of this file
    #[arg(short = 'p', long, value_name = "FILE")]
    pub publisher_file: Option<PathBuf>,

    /// Request IDs to fetch from the metadata service (comma-separated)
    #[arg(short = 'm', long, value_name = "IDS")]
    pub smile_service: Option<String>,

    /// Only publish CMO requests
    #[arg(short = 'c', long)]
    pub cmo_requests_only: bool,
}

impl PublishArgs {
    /// The run-mode inputs given on the command line
    pub fn selection_inputs(&self) -> SelectionInputs {
        SelectionInputs {
            request_ids: self.request_ids.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            json_file: self.json_file.clone(),
            publisher_file: self.publisher_file.clone(),
            smile_ids: self.smile_service.clone(),
        }
    }

    /// Execute the publish command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting publish command");

        let selection = match Selection::resolve(&self.selection_inputs()) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Invalid run mode");
                eprintln!("{e}");
                return Ok(2); // Selection error exit code
            }
        };

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let lims = LimsHttpClient::new(&config.lims)?;
        let smile = SmileHttpClient::new(&config.smile)?;
        let topics = Topics {
            lims: config.lims.publisher_topic.clone(),
            smile: config.smile.publisher_topic.clone(),
        };
        let coordinator = PublishCoordinator::new(
            Arc::new(NatsConnector::new(config.nats.clone())),
            RecordFilter::new(self.cmo_requests_only),
        );

        println!("🚀 Publishing {selection}");
        println!();

        let summary = match coordinator
            .execute(&selection, &lims, &smile, &topics)
            .await
        {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Publish failed");
                eprintln!("Publish failed: {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        print_summary(&summary);

        let exit_code = if summary.is_successful() {
            println!("✅ Publish completed successfully!");
            0
        } else {
            println!("⚠️  Publish completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

/// Exit code for an error that aborted the run before or while connecting
pub fn setup_exit_code(error: &PublisherError) -> i32 {
    match error {
        PublisherError::Configuration(_) | PublisherError::Selection(_) => 2,
        PublisherError::Messaging(MessagingError::ConnectionFailed { .. }) => 4,
        _ => 5,
    }
}

fn print_summary(summary: &PublishSummary) {
    println!();
    println!("📊 Publish Summary:");
    println!("  Total: {}", summary.total());
    println!("  Published: {}", summary.published());
    println!("  Skipped: {}", summary.skipped());
    println!("  Failed: {}", summary.failed());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    let failures: Vec<_> = summary.failures().collect();
    if !failures.is_empty() {
        println!("⚠️  Failures:");
        for outcome in failures.iter().take(10) {
            println!("  - {} of {}: {}", outcome.index, outcome.total, outcome.item);
        }
        if failures.len() > 10 {
            println!("  ... and {} more failures", failures.len() - 10);
        }
        println!();
    }
}
