//! Sample manifest models
//!
//! A manifest holds the detailed attributes of one physical sample as returned by
//! the LIMS `getSampleManifest` endpoint.

use super::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// One QC report attached to a sample
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
pub struct QcReport {
    #[serde(deserialize_with = "null_as_default")]
    pub qc_report_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: String,
    #[serde(deserialize_with = "null_as_default")]
    pub investigator_decision: String,
    #[serde(rename = "IGORecommendation", deserialize_with = "null_as_default")]
    pub igo_recommendation: String,
}

/// A sequencing run of a library
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
pub struct Run {
    #[serde(deserialize_with = "null_as_default")]
    pub run_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub run_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub flow_cell_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub read_length: String,
    #[serde(deserialize_with = "null_as_default")]
    pub run_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub flow_cell_lanes: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub fastqs: Vec<String>,
}

/// A library prepared from a sample
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
pub struct Library {
    #[serde(deserialize_with = "null_as_default")]
    pub barcode_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub barcode_index: String,
    #[serde(deserialize_with = "null_as_default")]
    pub library_igo_id: String,
    pub library_volume: Option<f64>,
    pub library_concentration_ngul: Option<f64>,
    pub dna_input_ng: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub capture_concentration_nm: String,
    #[serde(deserialize_with = "null_as_default")]
    pub capture_input_ng: String,
    #[serde(deserialize_with = "null_as_default")]
    pub capture_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub runs: Vec<Run>,
}

/// Fields used downstream to derive the CMO sample label
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
pub struct CmoSampleIdFields {
    #[serde(deserialize_with = "null_as_default")]
    pub na_to_extract: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sample_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub normalized_patient_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipe: String,
}

/// Detailed attributes for one sample
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
pub struct SampleManifest {
    #[serde(deserialize_with = "null_as_default")]
    pub igo_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cmo_sample_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sample_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cmo_sample_class: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cmo_patient_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub investigator_sample_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub onco_tree_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tumor_or_normal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tissue_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub specimen_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sample_origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preservation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub collection_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sex: String,
    #[serde(deserialize_with = "null_as_default")]
    pub species: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tube_id: String,
    #[serde(rename = "cfDNA2dBarcode", deserialize_with = "null_as_default")]
    pub cf_dna_2d_barcode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bait_set: String,
    #[serde(deserialize_with = "null_as_default")]
    pub qc_reports: Vec<QcReport>,
    #[serde(deserialize_with = "null_as_default")]
    pub libraries: Vec<Library>,
    #[serde(deserialize_with = "null_as_default")]
    pub cmo_sample_id_fields: CmoSampleIdFields,
    /// Overwritten with the parent stub's flag during assembly
    #[serde(deserialize_with = "null_as_default")]
    pub igo_complete: bool,
}
