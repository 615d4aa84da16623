//! Record sources for ID-driven batches
//!
//! The driver asks a [`RecordSource`] for one composite record per ID. The LIMS
//! source assembles it from a request and its manifests; the metadata service
//! returns it pre-joined.

use crate::adapters::lims::LimsApi;
use crate::adapters::smile::SmileHttpClient;
use crate::core::assemble::assemble_record;
use crate::domain::{RequestWithManifests, Result};
use async_trait::async_trait;

/// Record-level filter applied before publishing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Only publish records flagged as CMO requests
    pub cmo_only: bool,
}

impl RecordFilter {
    pub fn new(cmo_only: bool) -> Self {
        Self { cmo_only }
    }

    /// Whether a record with the given CMO flag passes the filter
    pub fn admits(&self, is_cmo_request: bool) -> bool {
        !self.cmo_only || is_cmo_request
    }
}

/// Result of fetching one record
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRecord {
    /// A record ready to publish
    Record(RequestWithManifests),
    /// A non-CMO record rejected by the filter
    SkippedNonCmo,
}

/// Source of composite records by ID
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the record for `id`, applying `filter`
    ///
    /// Sources may apply the filter early to avoid needless fetches.
    async fn fetch_record(&self, id: &str, filter: &RecordFilter) -> Result<FetchedRecord>;
}

/// Builds records from the LIMS
pub struct LimsRecordSource<'a, A: LimsApi + ?Sized> {
    lims: &'a A,
}

impl<'a, A: LimsApi + ?Sized> LimsRecordSource<'a, A> {
    pub fn new(lims: &'a A) -> Self {
        Self { lims }
    }
}

#[async_trait]
impl<'a, A: LimsApi + ?Sized> RecordSource for LimsRecordSource<'a, A> {
    async fn fetch_record(&self, id: &str, filter: &RecordFilter) -> Result<FetchedRecord> {
        let request = self.lims.fetch_request(id).await?;

        // Checked before the manifests are fetched.
        if !filter.admits(request.is_cmo_request) {
            return Ok(FetchedRecord::SkippedNonCmo);
        }

        Ok(FetchedRecord::Record(
            assemble_record(self.lims, &request).await,
        ))
    }
}

#[async_trait]
impl RecordSource for SmileHttpClient {
    async fn fetch_record(&self, id: &str, filter: &RecordFilter) -> Result<FetchedRecord> {
        let record = self.fetch_request(id).await?;

        if !filter.admits(record.is_cmo_request) {
            return Ok(FetchedRecord::SkippedNonCmo);
        }
        Ok(FetchedRecord::Record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Delivery, Request, SampleManifest, SampleStub};
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLims {
        is_cmo: bool,
        manifest_calls: AtomicUsize,
    }

    #[async_trait]
    impl LimsApi for CountingLims {
        async fn fetch_request(&self, request_id: &str) -> Result<Request> {
            Ok(Request {
                request_id: request_id.to_string(),
                is_cmo_request: self.is_cmo,
                samples: vec![SampleStub {
                    igo_sample_id: format!("{request_id}_1"),
                    igo_complete: true,
                }],
                ..Default::default()
            })
        }

        async fn fetch_sample_manifest(&self, sample_id: &str) -> Result<SampleManifest> {
            self.manifest_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SampleManifest {
                igo_id: sample_id.to_string(),
                ..Default::default()
            })
        }

        async fn fetch_deliveries(&self, _since: DateTime<Utc>) -> Result<Vec<Delivery>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_filter_admits() {
        assert!(RecordFilter::new(false).admits(false));
        assert!(RecordFilter::new(false).admits(true));
        assert!(RecordFilter::new(true).admits(true));
        assert!(!RecordFilter::new(true).admits(false));
    }

    #[tokio::test]
    async fn test_non_cmo_skipped_before_manifests() {
        let lims = CountingLims {
            is_cmo: false,
            manifest_calls: AtomicUsize::new(0),
        };
        let source = LimsRecordSource::new(&lims);

        let fetched = source
            .fetch_record("13370_1", &RecordFilter::new(true))
            .await
            .unwrap();

        assert_eq!(fetched, FetchedRecord::SkippedNonCmo);
        assert_eq!(lims.manifest_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lims_source_assembles_record() {
        let lims = CountingLims {
            is_cmo: false,
            manifest_calls: AtomicUsize::new(0),
        };
        let source = LimsRecordSource::new(&lims);

        let fetched = source
            .fetch_record("13370_1", &RecordFilter::default())
            .await
            .unwrap();

        match fetched {
            FetchedRecord::Record(record) => {
                assert_eq!(record.project_id, "13370");
                assert_eq!(record.manifests.len(), 1);
                assert!(record.manifests[0].igo_complete);
            }
            FetchedRecord::SkippedNonCmo => panic!("filter disabled, record expected"),
        }
    }
}
