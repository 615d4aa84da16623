//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the publisher configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; secrets are never printed.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  LIMS Host: {}", config.lims.host);
        println!("  LIMS User: {}", config.lims.username);
        println!("  LIMS Password: ********");
        println!("  LIMS Topic: {}", config.lims.publisher_topic);
        println!("  LIMS Timeout: {}s", config.lims.timeout_seconds);
        println!("  NATS Server: {}", config.nats.url);
        println!("  NATS Consumer: {}", config.nats.consumer_name);
        println!("  NATS Certificate: {}", config.nats.truststore_path);
        println!("  NATS Key: {}", config.nats.keystore_path);
        println!("  Metadata Service URL: {}", config.smile.request_url);
        println!("  Metadata Service Topic: {}", config.smile.publisher_topic);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_returns_2() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("/nonexistent/config.toml").await.unwrap(), 2);
    }
}
