//! Manifest assembly
//!
//! Turns a LIMS request into a composite record by fetching the manifest of each
//! sample stub. A manifest that cannot be fetched is logged and left out; the
//! record is still built from the rest.

use crate::adapters::lims::LimsApi;
use crate::domain::{Request, RequestWithManifests, SampleManifest};

/// Fetch the manifest of every sample of `request`, in stub order
///
/// Each returned manifest carries its stub's completion flag. Failed fetches are
/// dropped, so the result never has more entries than the request has samples.
pub async fn fetch_sample_manifests<A>(lims: &A, request: &Request) -> Vec<SampleManifest>
where
    A: LimsApi + ?Sized,
{
    let total = request.samples.len();
    let mut manifests = Vec::with_capacity(total);

    for (i, stub) in request.samples.iter().enumerate() {
        let index = i + 1;
        tracing::info!(
            index,
            total,
            request_id = %request.request_id,
            sample_id = %stub.igo_sample_id,
            "Attempting to fetch {} of {} sample manifest(s)",
            index,
            total
        );

        match lims.fetch_sample_manifest(&stub.igo_sample_id).await {
            Ok(mut manifest) => {
                manifest.igo_complete = stub.igo_complete;
                manifests.push(manifest);
            }
            Err(e) => {
                tracing::warn!(
                    index,
                    total,
                    request_id = %request.request_id,
                    sample_id = %stub.igo_sample_id,
                    error = %e,
                    "Failure to fetch sample manifest {}",
                    stub.igo_sample_id
                );
            }
        }
    }

    manifests
}

/// Fetch the manifests of `request` and build its composite record
pub async fn assemble_record<A>(lims: &A, request: &Request) -> RequestWithManifests
where
    A: LimsApi + ?Sized,
{
    let manifests = fetch_sample_manifests(lims, request).await;
    RequestWithManifests::combine(request, manifests)
}
