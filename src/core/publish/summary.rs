//! Publish summary and per-item outcomes
//!
//! Every item a batch touches ends up as one [`ItemOutcome`]; the
//! [`PublishSummary`] aggregates them for logging and the CLI exit code.

use std::fmt;
use std::time::Duration;

/// Pipeline stage at which an item failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Fetching the record from the LIMS or metadata service
    Fetch,
    /// Parsing a replayed line or payload
    Parse,
    /// Encoding the record to the wire format
    Serialize,
    /// Handing the payload to the bus
    Publish,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            FailureStage::Fetch => "fetch",
            FailureStage::Parse => "parse",
            FailureStage::Serialize => "serialize",
            FailureStage::Publish => "publish",
        };
        f.write_str(stage)
    }
}

/// What happened to one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// Published on the named topic
    Published { topic: String },
    /// Deliberately not published
    Skipped { reason: String },
    /// Failed at a stage; the batch went on
    Failed { stage: FailureStage, message: String },
}

/// Outcome of one item of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// 1-based position in the batch
    pub index: usize,
    /// Number of items in the batch
    pub total: usize,
    /// Request ID, or `row <n>` for payload-file lines
    pub item: String,
    pub status: ItemStatus,
}

impl ItemOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self.status, ItemStatus::Published { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, ItemStatus::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, ItemStatus::Failed { .. })
    }
}

/// Summary of one batch
#[derive(Debug, Clone, Default)]
pub struct PublishSummary {
    /// Per-item outcomes in batch order
    pub outcomes: Vec<ItemOutcome>,

    /// Wall-clock duration of the batch
    pub duration: Duration,
}

impl PublishSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record an item outcome
    pub fn record(&mut self, outcome: ItemOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn published(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_published()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Failed outcomes only
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// True when no item failed (skips are not failures)
    pub fn is_successful(&self) -> bool {
        self.failed() == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total(),
            published = self.published(),
            skipped = self.skipped(),
            failed = self.failed(),
            duration_secs = self.duration.as_secs_f64(),
            "Publish completed"
        );

        for outcome in self.failures() {
            if let ItemStatus::Failed { stage, message } = &outcome.status {
                tracing::warn!(
                    index = outcome.index,
                    total = outcome.total,
                    item = %outcome.item,
                    stage = %stage,
                    message = %message,
                    "Item failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(index: usize, status: ItemStatus) -> ItemOutcome {
        ItemOutcome {
            index,
            total: 3,
            item: format!("1337{index}_1"),
            status,
        }
    }

    #[test]
    fn test_counts() {
        let mut summary = PublishSummary::new();
        summary.record(outcome(
            1,
            ItemStatus::Published {
                topic: "IGO.new-request".to_string(),
            },
        ));
        summary.record(outcome(
            2,
            ItemStatus::Skipped {
                reason: "non-CMO request".to_string(),
            },
        ));
        summary.record(outcome(
            3,
            ItemStatus::Failed {
                stage: FailureStage::Fetch,
                message: "connection refused".to_string(),
            },
        ));

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.published(), 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_successful());
        assert_eq!(summary.failures().next().map(|o| o.index), Some(3));
    }

    #[test]
    fn test_skips_are_not_failures() {
        let mut summary = PublishSummary::new().with_duration(Duration::from_millis(5));
        summary.record(outcome(
            1,
            ItemStatus::Skipped {
                reason: "non-CMO request".to_string(),
            },
        ));
        assert!(summary.is_successful());
        assert_eq!(summary.duration, Duration::from_millis(5));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(FailureStage::Serialize.to_string(), "serialize");
    }
}
