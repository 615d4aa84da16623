//! Metadata service client
//!
//! The metadata service already stores requests joined with their manifests, so a
//! single `GET <request_url><id>` returns a complete [`RequestWithManifests`].

use crate::adapters::http::{basic_auth_header, build_client, get_json, DEFAULT_TIMEOUT_SECONDS};
use crate::config::SmileConfig;
use crate::domain::{RequestWithManifests, Result};
use reqwest::Client;
use secrecy::ExposeSecret;

/// HTTP client for the metadata service
pub struct SmileHttpClient {
    request_url: String,
    client: Client,
    authorization: Option<String>,
}

impl SmileHttpClient {
    /// Create a client; Basic auth is only sent when a username is configured
    pub fn new(config: &SmileConfig) -> Result<Self> {
        let authorization = config.username.as_ref().map(|username| {
            let password = config
                .password
                .as_ref()
                .map(|p| p.expose_secret().as_ref().to_string())
                .unwrap_or_default();
            basic_auth_header(username, &password)
        });

        Ok(Self {
            request_url: config.request_url.clone(),
            client: build_client(DEFAULT_TIMEOUT_SECONDS)?,
            authorization,
        })
    }

    /// Fetch one pre-joined record; the ID is appended to the base URL verbatim
    pub async fn fetch_request(&self, request_id: &str) -> Result<RequestWithManifests> {
        let url = format!("{}{}", self.request_url, request_id);
        tracing::debug!(request_id = %request_id, url = %url, "Fetching record from metadata service");

        Ok(get_json(&self.client, &url, self.authorization.as_deref()).await?)
    }
}
