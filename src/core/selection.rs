//! Run-mode selection
//!
//! Exactly one enumeration strategy is chosen per run. [`Selection::resolve`]
//! turns the raw mode inputs into a [`Selection`] once, at startup, and rejects
//! zero or several modes.

use crate::domain::{Delivery, PublisherError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::path::PathBuf;

/// Date format accepted for the delivery window
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Raw mode inputs as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SelectionInputs {
    /// Comma-separated LIMS request IDs
    pub request_ids: Option<String>,
    /// Window start, MM/DD/YYYY
    pub start_date: Option<String>,
    /// Window end, MM/DD/YYYY
    pub end_date: Option<String>,
    /// Single JSON record to replay
    pub json_file: Option<PathBuf>,
    /// Tab-delimited payload file to replay
    pub publisher_file: Option<PathBuf>,
    /// Comma-separated metadata-service request IDs
    pub smile_ids: Option<String>,
}

/// How the records of a run are enumerated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Fetch these LIMS requests
    RequestIds(Vec<String>),
    /// Fetch every LIMS request delivered within the window
    DateWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Publish one JSON record read from a file
    JsonFile(PathBuf),
    /// Publish every `ignored<TAB>topic<TAB>json` line of a file
    PublisherFile(PathBuf),
    /// Fetch these requests from the metadata service
    SmileService(Vec<String>),
}

impl Selection {
    /// Resolve the mode inputs into exactly one selection
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Selection`] when no mode or more than one mode is
    /// given, when only one date bound is given, when a date is not MM/DD/YYYY,
    /// or when the window ends before it starts.
    pub fn resolve(inputs: &SelectionInputs) -> Result<Self> {
        let date_mode = inputs.start_date.is_some() || inputs.end_date.is_some();

        let mut given = Vec::new();
        if inputs.request_ids.is_some() {
            given.push("request IDs (-r)");
        }
        if date_mode {
            given.push("date window (-s/-e)");
        }
        if inputs.json_file.is_some() {
            given.push("JSON file (-j)");
        }
        if inputs.publisher_file.is_some() {
            given.push("publisher file (-p)");
        }
        if inputs.smile_ids.is_some() {
            given.push("metadata service IDs (-m)");
        }

        match given.len() {
            0 => {
                return Err(PublisherError::Selection(
                    "No run mode given: use one of -r, -s/-e, -j, -p or -m".to_string(),
                ))
            }
            1 => {}
            _ => {
                return Err(PublisherError::Selection(format!(
                    "Only one run mode may be given, found: {}",
                    given.join(", ")
                )))
            }
        }

        if let Some(ids) = &inputs.request_ids {
            return Ok(Selection::RequestIds(split_ids(ids)));
        }
        if date_mode {
            let (start, end) = match (&inputs.start_date, &inputs.end_date) {
                (Some(start), Some(end)) => (parse_date(start)?, parse_date(end)?),
                _ => {
                    return Err(PublisherError::Selection(
                        "Both a start date (-s) and an end date (-e) are required".to_string(),
                    ))
                }
            };
            if end < start {
                return Err(PublisherError::Selection(format!(
                    "End date {} is before start date {}",
                    end.format(DATE_FORMAT),
                    start.format(DATE_FORMAT)
                )));
            }
            return Ok(Selection::DateWindow { start, end });
        }
        if let Some(path) = &inputs.json_file {
            return Ok(Selection::JsonFile(path.clone()));
        }
        if let Some(path) = &inputs.publisher_file {
            return Ok(Selection::PublisherFile(path.clone()));
        }
        match &inputs.smile_ids {
            Some(ids) => Ok(Selection::SmileService(split_ids(ids))),
            None => Err(PublisherError::Selection("No run mode given".to_string())),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::RequestIds(ids) => write!(f, "{} LIMS request(s)", ids.len()),
            Selection::DateWindow { start, end } => write!(
                f,
                "LIMS deliveries from {} to {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
            Selection::JsonFile(path) => write!(f, "JSON file {}", path.display()),
            Selection::PublisherFile(path) => write!(f, "publisher file {}", path.display()),
            Selection::SmileService(ids) => {
                write!(f, "{} metadata service request(s)", ids.len())
            }
        }
    }
}

/// Split a comma-separated ID list verbatim
///
/// No trimming and no deduplication: `"A,B"` gives `["A", "B"]`.
pub fn split_ids(ids: &str) -> Vec<String> {
    ids.split(',').map(str::to_string).collect()
}

/// Parse an MM/DD/YYYY date as midnight UTC
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        PublisherError::Selection(format!(
            "Invalid date '{value}', expected MM/DD/YYYY: {e}"
        ))
    })?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| PublisherError::Selection(format!("Invalid date '{value}'")))
}

/// Request IDs of the deliveries made no later than `end`, in delivery order
///
/// Duplicates are kept.
pub fn requests_delivered_by(deliveries: &[Delivery], end: DateTime<Utc>) -> Vec<String> {
    let end_millis = end.timestamp_millis();
    deliveries
        .iter()
        .filter(|delivery| delivery.delivery_date <= end_millis)
        .map(|delivery| delivery.request.clone())
        .collect()
}
