//! Shared HTTP plumbing for the upstream JSON APIs
//!
//! Both the LIMS and the metadata service are plain `GET` + JSON endpoints. Every
//! call sends `Accept: application/json`, uses a fixed per-request timeout and is
//! attempted exactly once.

use crate::domain::SourceError;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Timeout applied to every upstream request
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Builds a client that sends `Accept: application/json` on every request
pub fn build_client(timeout_seconds: u64) -> Result<Client, SourceError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    ClientBuilder::new()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| SourceError::Client(e.to_string()))
}

/// `Basic <base64(user:password)>`
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
    format!("Basic {encoded}")
}

/// Issues one GET and decodes a 200 response body as JSON
///
/// Transport failures, non-200 statuses and undecodable bodies map to the
/// matching [`SourceError`] variant.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    authorization: Option<&str>,
) -> Result<T, SourceError> {
    let mut request = client.get(url);
    if let Some(auth) = authorization {
        request = request.header(AUTHORIZATION, auth);
    }

    let response = request.send().await.map_err(|e| SourceError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| SourceError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_slice(&body).map_err(|e| SourceError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
