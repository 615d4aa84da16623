//! LIMS request and delivery models
//!
//! These mirror the JSON the LIMS REST API returns from `getRequestSamples` and
//! `getDeliveries`. Fields the LIMS leaves unset (absent or `null`) decode to their
//! empty default.

use super::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// A sample stub attached to a request
///
/// Only the identifier and the completion flag; the full attributes live in the
/// sample manifest fetched separately.
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
pub struct SampleStub {
    #[serde(deserialize_with = "null_as_default")]
    pub igo_sample_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub igo_complete: bool,
}

/// A LIMS request: the top-level unit of lab work grouping samples
///
/// Decoded once from the LIMS and never mutated afterwards.
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
pub struct Request {
    /// `<projectId>_<suffix>`, e.g. `13370_1`
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
    #[serde(deserialize_with = "null_as_default")]
    pub samples: Vec<SampleStub>,
    #[serde(deserialize_with = "null_as_default")]
    pub pooled_normals: Vec<String>,
    /// Epoch milliseconds, 0 when the request has not been delivered
    #[serde(deserialize_with = "null_as_default")]
    pub delivery_date: i64,
}

/// An upstream delivery entry linking a request to its delivery time
///
/// Only used to derive the identifier set for a date window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Delivery {
    /// Epoch milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub delivery_date: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub request: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_decodes_lims_payload() {
        let json = r#"{
            "requestId": "13370_1",
            "recipe": "WholeExomeSequencing",
            "labHeadName": "Jane Doe",
            "isCmoRequest": true,
            "bicAnalysis": null,
            "samples": [
                {"igoSampleId": "13370_1_1", "igoComplete": true},
                {"igoSampleId": "13370_1_2", "igoComplete": false}
            ],
            "pooledNormals": null,
            "deliveryDate": 1656547200000
        }"#;

        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.request_id, "13370_1");
        assert!(request.is_cmo_request);
        assert!(!request.bic_analysis);
        assert_eq!(request.samples.len(), 2);
        assert!(request.samples[0].igo_complete);
        assert!(request.pooled_normals.is_empty());
        assert_eq!(request.lab_head_email, "");
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let json = r#"{"requestId": "08822_B", "someNewLimsField": 42}"#;
        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.request_id, "08822_B");
    }

    #[test]
    fn test_delivery_decodes() {
        let json = r#"[{"deliveryDate": 1656547200000, "request": "13370_1"}]"#;
        let deliveries: Vec<Delivery> = serde_json::from_str(json).unwrap();
        assert_eq!(deliveries[0].request, "13370_1");
        assert_eq!(deliveries[0].delivery_date, 1_656_547_200_000);
    }
}
