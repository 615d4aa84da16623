//! Publish coordinator - the batch driver
//!
//! For every item of a run: fetch or parse, filter, encode, publish. A failing
//! item is logged with its `N of M` position and recorded in the summary; the
//! batch always goes on. Only setup failures (delivery lookup, unreadable replay
//! file, bus connection) abort the run.

use super::source::{FetchedRecord, LimsRecordSource, RecordFilter, RecordSource};
use super::summary::{FailureStage, ItemOutcome, ItemStatus, PublishSummary};
use crate::adapters::lims::LimsApi;
use crate::adapters::messaging::{MessagePublisher, PublisherConnector};
use crate::core::selection::{requests_delivered_by, Selection};
use crate::core::wire::encode_record;
use crate::domain::{PublisherError, RequestWithManifests, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Topics records are published to
#[derive(Debug, Clone)]
pub struct Topics {
    /// LIMS-fetched and single-file records
    pub lims: String,
    /// Metadata-service records
    pub smile: String,
}

/// Runs one batch against the message bus
pub struct PublishCoordinator {
    connector: Arc<dyn PublisherConnector>,
    filter: RecordFilter,
}

impl PublishCoordinator {
    /// Create a coordinator
    pub fn new(connector: Arc<dyn PublisherConnector>, filter: RecordFilter) -> Self {
        Self { connector, filter }
    }

    /// Run the batch described by `selection`
    ///
    /// # Errors
    ///
    /// Returns an error only for setup failures: the delivery lookup, reading or
    /// decoding the replay file, or connecting to the bus.
    pub async fn execute(
        &self,
        selection: &Selection,
        lims: &dyn LimsApi,
        smile: &dyn RecordSource,
        topics: &Topics,
    ) -> Result<PublishSummary> {
        tracing::info!(selection = %selection, cmo_only = self.filter.cmo_only, "Starting publish");

        match selection {
            Selection::RequestIds(ids) => {
                self.publish_ids(&LimsRecordSource::new(lims), ids, &topics.lims)
                    .await
            }
            Selection::DateWindow { start, end } => {
                let deliveries = lims.fetch_deliveries(*start).await?;
                let ids = requests_delivered_by(&deliveries, *end);
                tracing::info!(
                    deliveries = deliveries.len(),
                    requests = ids.len(),
                    "Resolved delivery window"
                );
                self.publish_ids(&LimsRecordSource::new(lims), &ids, &topics.lims)
                    .await
            }
            Selection::JsonFile(path) => self.publish_json_file(path, &topics.lims).await,
            Selection::PublisherFile(path) => self.publish_payload_file(path).await,
            Selection::SmileService(ids) => self.publish_ids(smile, ids, &topics.smile).await,
        }
    }

    /// Fetch and publish one record per ID
    pub async fn publish_ids(
        &self,
        source: &dyn RecordSource,
        ids: &[String],
        topic: &str,
    ) -> Result<PublishSummary> {
        let start_time = Instant::now();
        let publisher = self.connect().await?;
        let mut summary = PublishSummary::new();
        let total = ids.len();

        for (i, id) in ids.iter().enumerate() {
            let index = i + 1;
            tracing::info!(
                index,
                total,
                request_id = %id,
                "Attempting to fetch and publish {} of {} request(s): {}",
                index,
                total,
                id
            );

            let status = match source.fetch_record(id, &self.filter).await {
                Ok(FetchedRecord::Record(record)) => {
                    publish_record(publisher.as_ref(), &record, topic).await
                }
                Ok(FetchedRecord::SkippedNonCmo) => ItemStatus::Skipped {
                    reason: "non-CMO request with CMO-only filter set".to_string(),
                },
                Err(e) => ItemStatus::Failed {
                    stage: FailureStage::Fetch,
                    message: e.to_string(),
                },
            };

            let outcome = ItemOutcome {
                index,
                total,
                item: id.clone(),
                status,
            };
            log_outcome(&outcome, "request");
            summary.record(outcome);
        }

        Ok(finish(publisher, summary, start_time).await)
    }

    /// Publish the single JSON record stored in `path`
    ///
    /// The file is read and decoded before connecting; either failing aborts the run.
    pub async fn publish_json_file(&self, path: &Path, topic: &str) -> Result<PublishSummary> {
        let start_time = Instant::now();
        tracing::info!(path = %path.display(), "Attempting to publish request from JSON file");

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PublisherError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let record: RequestWithManifests = serde_json::from_str(&contents).map_err(|e| {
            PublisherError::MalformedInput(format!(
                "{} is not a valid request record: {}",
                path.display(),
                e
            ))
        })?;

        let publisher = self.connect().await?;
        let mut summary = PublishSummary::new();

        let outcome = ItemOutcome {
            index: 1,
            total: 1,
            item: record.request_id.clone(),
            status: publish_record(publisher.as_ref(), &record, topic).await,
        };
        log_outcome(&outcome, "request from JSON file");
        summary.record(outcome);

        Ok(finish(publisher, summary, start_time).await)
    }

    /// Publish every `ignored<TAB>topic<TAB>json` line of `path`
    ///
    /// Each line goes to its own topic and bypasses the CMO filter. Lines that do
    /// not have exactly three fields, or whose JSON does not decode, are recorded
    /// as parse failures.
    pub async fn publish_payload_file(&self, path: &Path) -> Result<PublishSummary> {
        let start_time = Instant::now();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PublisherError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let lines: Vec<&str> = contents.lines().collect();

        let publisher = self.connect().await?;
        let mut summary = PublishSummary::new();
        let total = lines.len();

        for (i, line) in lines.iter().enumerate() {
            let index = i + 1;
            tracing::info!(
                row = index,
                total,
                "Attempting to process row {} of {} from publisher file",
                index,
                total
            );

            let status = match parse_payload_line(line) {
                Ok((topic, record)) => publish_record(publisher.as_ref(), &record, topic).await,
                Err(e) => ItemStatus::Failed {
                    stage: FailureStage::Parse,
                    message: e.to_string(),
                },
            };

            let outcome = ItemOutcome {
                index,
                total,
                item: format!("row {index}"),
                status,
            };
            log_outcome(&outcome, "publisher file");
            summary.record(outcome);
        }

        Ok(finish(publisher, summary, start_time).await)
    }

    async fn connect(&self) -> Result<Box<dyn MessagePublisher>> {
        self.connector.connect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to message bus");
            e
        })
    }
}

/// Split one payload-file line into its topic and decoded record
fn parse_payload_line(line: &str) -> Result<(&str, RequestWithManifests)> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 3 {
        return Err(PublisherError::MalformedInput(format!(
            "expecting 3 components, found {}",
            fields.len()
        )));
    }

    let record = serde_json::from_str(fields[2])?;
    Ok((fields[1], record))
}

async fn publish_record(
    publisher: &dyn MessagePublisher,
    record: &RequestWithManifests,
    topic: &str,
) -> ItemStatus {
    let payload = match encode_record(record) {
        Ok(payload) => payload,
        Err(e) => {
            return ItemStatus::Failed {
                stage: FailureStage::Serialize,
                message: e.to_string(),
            }
        }
    };

    match publisher.publish(topic, payload).await {
        Ok(()) => ItemStatus::Published {
            topic: topic.to_string(),
        },
        Err(e) => ItemStatus::Failed {
            stage: FailureStage::Publish,
            message: e.to_string(),
        },
    }
}

fn log_outcome(outcome: &ItemOutcome, kind: &str) {
    match &outcome.status {
        ItemStatus::Published { topic } => tracing::info!(
            index = outcome.index,
            total = outcome.total,
            item = %outcome.item,
            topic = %topic,
            "Successfully published {} {}",
            kind,
            outcome.item
        ),
        ItemStatus::Skipped { reason } => tracing::info!(
            index = outcome.index,
            total = outcome.total,
            item = %outcome.item,
            reason = %reason,
            "Skipping {} of {} ({}): {}",
            outcome.index,
            outcome.total,
            outcome.item,
            reason
        ),
        ItemStatus::Failed { stage, message } => tracing::warn!(
            index = outcome.index,
            total = outcome.total,
            item = %outcome.item,
            stage = %stage,
            error = %message,
            "Failure at {} for {} of {} ({}): {}",
            stage,
            outcome.index,
            outcome.total,
            outcome.item,
            message
        ),
    }
}

/// Shut the connection down and close the summary
///
/// A failed shutdown is logged; the items already published stay published.
async fn finish(
    publisher: Box<dyn MessagePublisher>,
    summary: PublishSummary,
    start_time: Instant,
) -> PublishSummary {
    if let Err(e) = publisher.shutdown().await {
        tracing::warn!(error = %e, "Message bus shutdown failed");
    }

    let summary = summary.with_duration(start_time.elapsed());
    summary.log_summary();
    summary
}
