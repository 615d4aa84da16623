//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "smile-publisher.toml")]
    pub output: String,

    /// Include comments and environment variable placeholders for secrets
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing publisher configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your LIMS, NATS and metadata service settings", self.output);
                println!("  2. Put credentials in a .env file or export them:");
                println!("     - SMILE_LIMS_PASSWORD");
                println!("     - SMILE_NATS_CONSUMER_PASSWORD");
                println!("  3. Validate configuration: smile-publisher validate-config");
                println!("  4. Publish: smile-publisher publish -r <request ids>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Publisher Configuration File

[lims]
host = "igolims.example.org:8443"
username = "publisher"
password = "change-me"
publisher_topic = "IGO.new-request"

[nats]
url = "tls://nats.example.org:4222"
consumer_name = "publisher"
consumer_password = "change-me"
keystore_path = "/etc/nats/client-key.pem"
truststore_path = "/etc/nats/client-cert.pem"

[smile]
request_url = "https://smile.example.org/request/"
publisher_topic = "MDB_STREAM.new-request"
"#
        .to_string()
    }

    /// Generate configuration with comments and placeholders
    fn generate_config_with_examples() -> String {
        r#"# Publisher Configuration File
#
# Values of the form ${VAR} are replaced from the environment when the file is
# loaded. Any property can also be overridden with SMILE_<SECTION>_<KEY>,
# e.g. SMILE_LIMS_HOST or SMILE_NATS_URL.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[lims]
# Host and port of the LIMS REST API, without scheme
host = "igolims.example.org:8443"
username = "publisher"
password = "${SMILE_LIMS_PASSWORD}"
# Topic for records assembled from the LIMS and for file replays
publisher_topic = "IGO.new-request"
# HTTP timeout in seconds
timeout_seconds = 60

[nats]
url = "tls://nats.example.org:4222"
consumer_name = "publisher"
consumer_password = "${SMILE_NATS_CONSUMER_PASSWORD}"
# PEM private key and certificate for the TLS client identity
keystore_path = "/etc/nats/client-key.pem"
truststore_path = "/etc/nats/client-cert.pem"

[smile]
# Request ID is appended to this URL
request_url = "https://smile.example.org/request/"
publisher_topic = "MDB_STREAM.new-request"
# Optional basic auth for the metadata service
# username = "publisher"
# password = "${SMILE_SMILE_PASSWORD}"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"
# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, PublisherConfig};
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "smile-publisher.toml".to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.output, "smile-publisher.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[lims]"));
        assert!(config.contains("[nats]"));
        assert!(config.contains("[smile]"));

        let parsed: PublisherConfig = toml::from_str(&config).unwrap();
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("${SMILE_LIMS_PASSWORD}"));
        assert!(config.contains("[logging]"));
        assert!(config.contains("local_rotation"));
    }

    #[tokio::test]
    async fn test_init_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("publisher.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(load_config(&output).is_ok());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("publisher.toml");
        fs::write(&output, "existing").unwrap();

        let mut args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        args.force = true;
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[lims]"));
    }
}
