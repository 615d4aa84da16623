//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the publisher using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Publishes LIMS request records to NATS
#[derive(Parser, Debug)]
#[command(name = "smile-publisher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short = 'f',
        long,
        default_value = "smile-publisher.toml",
        env = "SMILE_PUBLISHER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SMILE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch request records and publish them to NATS
    Publish(commands::publish::PublishArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_publish_request_ids() {
        let cli = Cli::parse_from(["smile-publisher", "publish", "-r", "13370_1,13370_2"]);
        assert_eq!(cli.config, "smile-publisher.toml");
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.request_ids.as_deref(), Some("13370_1,13370_2"));
                assert!(!args.cmo_requests_only);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_publish_date_window_cmo_only() {
        let cli = Cli::parse_from([
            "smile-publisher",
            "publish",
            "-s",
            "01/01/2024",
            "-e",
            "01/31/2024",
            "-c",
        ]);
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.start_date.as_deref(), Some("01/01/2024"));
                assert_eq!(args.end_date.as_deref(), Some("01/31/2024"));
                assert!(args.cmo_requests_only);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_publish_files() {
        let cli = Cli::parse_from(["smile-publisher", "publish", "-p", "rows.tsv"]);
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.publisher_file.unwrap().to_str(), Some("rows.tsv"));
                assert!(args.json_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["smile-publisher", "-f", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["smile-publisher", "--log-level", "debug", "publish"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["smile-publisher", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["smile-publisher", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
