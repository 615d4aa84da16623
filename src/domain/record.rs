//! Composite record published to the bus
//!
//! A [`RequestWithManifests`] is a LIMS request merged with the manifests of its
//! samples. It is the only record shape that leaves the process: live fetches
//! build it with [`RequestWithManifests::combine`], replay files and the metadata
//! service hand it over already joined.

use super::manifest::SampleManifest;
use super::request::Request;
use super::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// A request joined with the manifests of its samples
///
/// The JSON shape is the one downstream consumers and the metadata service use:
/// the manifests travel under `samples`, and `projectId` is derived from
/// `requestId`.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestWithManifests {
    #[serde(deserialize_with = "null_as_default")]
    pub request_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipe: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_manager_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pi_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lab_head_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lab_head_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub investigator_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub investigator_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_analyst_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_analyst_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub other_contact_emails: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_access_emails: String,
    #[serde(deserialize_with = "null_as_default")]
    pub qc_access_emails: String,
    #[serde(deserialize_with = "null_as_default")]
    pub strand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub library_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_cmo_request: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub bic_analysis: bool,
    #[serde(rename = "samples", deserialize_with = "null_as_default")]
    pub manifests: Vec<SampleManifest>,
    #[serde(deserialize_with = "null_as_default")]
    pub pooled_normals: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub delivery_date: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
}

impl RequestWithManifests {
    /// Builds the composite record from a request and its assembled manifests
    ///
    /// Every request attribute is copied; the sample stubs are replaced by
    /// `manifests`, which the caller has already put in stub order.
    pub fn combine(request: &Request, manifests: Vec<SampleManifest>) -> Self {
        Self {
            request_id: request.request_id.clone(),
            recipe: request.recipe.clone(),
            project_manager_name: request.project_manager_name.clone(),
            pi_email: request.pi_email.clone(),
            lab_head_name: request.lab_head_name.clone(),
            lab_head_email: request.lab_head_email.clone(),
            investigator_name: request.investigator_name.clone(),
            investigator_email: request.investigator_email.clone(),
            data_analyst_name: request.data_analyst_name.clone(),
            data_analyst_email: request.data_analyst_email.clone(),
            other_contact_emails: request.other_contact_emails.clone(),
            data_access_emails: request.data_access_emails.clone(),
            qc_access_emails: request.qc_access_emails.clone(),
            strand: request.strand.clone(),
            library_type: request.library_type.clone(),
            is_cmo_request: request.is_cmo_request,
            bic_analysis: request.bic_analysis,
            manifests,
            pooled_normals: request.pooled_normals.clone(),
            delivery_date: request.delivery_date,
            project_id: project_id_of(&request.request_id).to_string(),
        }
    }
}

/// Project part of a request ID: everything before the first `_`
///
/// A request ID without `_` is its own project ID.
pub fn project_id_of(request_id: &str) -> &str {
    request_id.split('_').next().unwrap_or(request_id)
}
