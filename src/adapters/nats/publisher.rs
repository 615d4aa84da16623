//! NATS implementation of the message bus traits
//!
//! Connections authenticate with user/password, require TLS and present the
//! configured client certificate. Publishing is core NATS (no JetStream ack).

use crate::adapters::messaging::{MessagePublisher, PublisherConnector};
use crate::config::NatsConfig;
use crate::domain::{MessagingError, Result};
use async_nats::{Client, ConnectOptions};
use async_trait::async_trait;
use bytes::Bytes;
use secrecy::ExposeSecret;
use std::path::PathBuf;

/// Connects to NATS with the configured credentials
pub struct NatsConnector {
    config: NatsConfig,
}

impl NatsConnector {
    /// Create a connector from the `[nats]` configuration section
    pub fn new(config: NatsConfig) -> Self {
        Self { config }
    }

    fn options(&self) -> ConnectOptions {
        let password = self
            .config
            .consumer_password
            .as_ref()
            .map(|p| p.expose_secret().as_ref().to_string())
            .unwrap_or_default();

        ConnectOptions::with_user_and_password(self.config.consumer_name.clone(), password)
            .name("smile-publisher")
            .require_tls(true)
            .add_client_certificate(
                PathBuf::from(&self.config.truststore_path),
                PathBuf::from(&self.config.keystore_path),
            )
    }
}

#[async_trait]
impl PublisherConnector for NatsConnector {
    async fn connect(&self) -> Result<Box<dyn MessagePublisher>> {
        tracing::info!(url = %self.config.url, consumer = %self.config.consumer_name, "Connecting to NATS");

        let client = self
            .options()
            .connect(self.config.url.as_str())
            .await
            .map_err(|e| MessagingError::ConnectionFailed {
                url: self.config.url.clone(),
                message: e.to_string(),
            })?;

        tracing::info!(url = %self.config.url, "Connected to NATS");
        Ok(Box::new(NatsPublisher { client }))
    }
}

/// An open NATS connection
pub struct NatsPublisher {
    client: Client,
}

#[async_trait]
impl MessagePublisher for NatsPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        self.client
            .publish(topic.to_string(), Bytes::from(payload))
            .await
            .map_err(|e| MessagingError::PublishFailed {
                topic: topic.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        self.client
            .flush()
            .await
            .map_err(|e| MessagingError::PublishFailed {
                topic: "*".to_string(),
                message: format!("flush on shutdown failed: {e}"),
            })?;
        tracing::info!("NATS connection flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::PublisherError;

    #[tokio::test]
    async fn test_connect_failure_is_connection_error() {
        let connector = NatsConnector::new(NatsConfig {
            url: "tls://127.0.0.1:1".to_string(),
            consumer_name: "publisher".to_string(),
            consumer_password: Some(secret_string("pw".to_string())),
            keystore_path: "/nonexistent/client.key".to_string(),
            truststore_path: "/nonexistent/client.pem".to_string(),
        });

        let err = match connector.connect().await {
            Ok(_) => panic!("connection to a closed port should fail"),
            Err(e) => e,
        };
        assert!(matches!(
            err,
            PublisherError::Messaging(MessagingError::ConnectionFailed { .. })
        ));
    }
}
