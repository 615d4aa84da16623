//! LIMS REST API client
//!
//! Wraps the three `LimsRest/api` endpoints the publisher needs. Each call is a
//! single authenticated GET; there are no retries.

use crate::adapters::http::{basic_auth_header, build_client, get_json};
use crate::config::LimsConfig;
use crate::domain::{Delivery, Request, Result, SampleManifest, SourceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use secrecy::ExposeSecret;
use url::Url;

/// Operations the publisher needs from the LIMS
///
/// The HTTP client implements this; tests substitute in-memory fakes.
#[async_trait]
pub trait LimsApi: Send + Sync {
    /// Fetch one request with its sample stubs
    async fn fetch_request(&self, request_id: &str) -> Result<Request>;

    /// Fetch the manifest of one sample
    async fn fetch_sample_manifest(&self, sample_id: &str) -> Result<SampleManifest>;

    /// Fetch every delivery made since `since`
    async fn fetch_deliveries(&self, since: DateTime<Utc>) -> Result<Vec<Delivery>>;
}

/// HTTP implementation of [`LimsApi`]
pub struct LimsHttpClient {
    base_url: String,
    client: Client,
    authorization: String,
}

impl LimsHttpClient {
    /// Create a client for `https://<host>/LimsRest/api`
    pub fn new(config: &LimsConfig) -> Result<Self> {
        Self::with_base_url(format!("https://{}/LimsRest/api", config.host), config)
    }

    /// Create a client against an explicit API base URL
    pub fn with_base_url(base_url: impl Into<String>, config: &LimsConfig) -> Result<Self> {
        let password = config
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_ref().to_string())
            .unwrap_or_default();

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(config.timeout_seconds)?,
            authorization: basic_auth_header(&config.username, &password),
        })
    }

    fn endpoint(&self, path: &str, param: (&str, &str)) -> Result<String> {
        let url = Url::parse_with_params(&format!("{}/{}", self.base_url, path), [param])
            .map_err(|e| SourceError::Client(format!("Invalid LIMS URL: {e}")))?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl LimsApi for LimsHttpClient {
    async fn fetch_request(&self, request_id: &str) -> Result<Request> {
        let url = self.endpoint("getRequestSamples", ("request", request_id))?;
        tracing::debug!(request_id = %request_id, url = %url, "Fetching request");

        Ok(get_json(&self.client, &url, Some(&self.authorization)).await?)
    }

    async fn fetch_sample_manifest(&self, sample_id: &str) -> Result<SampleManifest> {
        let url = self.endpoint("getSampleManifest", ("igoSampleId", sample_id))?;
        tracing::debug!(sample_id = %sample_id, url = %url, "Fetching sample manifest");

        let manifests: Vec<SampleManifest> =
            get_json(&self.client, &url, Some(&self.authorization)).await?;

        manifests.into_iter().next().ok_or_else(|| {
            SourceError::Decode {
                url,
                message: "sample manifest list is empty".to_string(),
            }
            .into()
        })
    }

    async fn fetch_deliveries(&self, since: DateTime<Utc>) -> Result<Vec<Delivery>> {
        let timestamp = since.timestamp_millis().to_string();
        let url = self.endpoint("getDeliveries", ("timestamp", &timestamp))?;
        tracing::debug!(since = %since, url = %url, "Fetching deliveries");

        Ok(get_json(&self.client, &url, Some(&self.authorization)).await?)
    }
}
