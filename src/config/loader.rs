//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PublisherConfig;
use super::secret::secret_string;
use crate::domain::errors::PublisherError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PublisherConfig
/// 4. Applies environment variable overrides (SMILE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PublisherError::Configuration`] if the file is missing or unreadable,
/// a referenced environment variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use smile_publisher::config::loader::load_config;
///
/// let config = load_config("smile-publisher.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PublisherConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PublisherError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PublisherError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PublisherConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PublisherError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PublisherError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(PublisherError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the SMILE_* prefix
///
/// Environment variables follow the pattern: SMILE_<SECTION>_<KEY>
/// For example: SMILE_LIMS_HOST, SMILE_NATS_CONSUMER_PASSWORD
fn apply_env_overrides(config: &mut PublisherConfig) {
    if let Ok(val) = std::env::var("SMILE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // LIMS overrides
    if let Ok(val) = std::env::var("SMILE_LIMS_HOST") {
        config.lims.host = val;
    }
    if let Ok(val) = std::env::var("SMILE_LIMS_USERNAME") {
        config.lims.username = val;
    }
    if let Ok(val) = std::env::var("SMILE_LIMS_PASSWORD") {
        config.lims.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SMILE_LIMS_PUBLISHER_TOPIC") {
        config.lims.publisher_topic = val;
    }
    if let Ok(val) = std::env::var("SMILE_LIMS_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.lims.timeout_seconds = timeout;
        }
    }

    // NATS overrides
    if let Ok(val) = std::env::var("SMILE_NATS_URL") {
        config.nats.url = val;
    }
    if let Ok(val) = std::env::var("SMILE_NATS_CONSUMER_NAME") {
        config.nats.consumer_name = val;
    }
    if let Ok(val) = std::env::var("SMILE_NATS_CONSUMER_PASSWORD") {
        config.nats.consumer_password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SMILE_NATS_KEYSTORE_PATH") {
        config.nats.keystore_path = val;
    }
    if let Ok(val) = std::env::var("SMILE_NATS_TRUSTSTORE_PATH") {
        config.nats.truststore_path = val;
    }

    // Metadata service overrides
    if let Ok(val) = std::env::var("SMILE_SMILE_REQUEST_URL") {
        config.smile.request_url = val;
    }
    if let Ok(val) = std::env::var("SMILE_SMILE_PUBLISHER_TOPIC") {
        config.smile.publisher_topic = val;
    }
    if let Ok(val) = std::env::var("SMILE_SMILE_USERNAME") {
        config.smile.username = Some(val);
    }
    if let Ok(val) = std::env::var("SMILE_SMILE_PASSWORD") {
        config.smile.password = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SMILE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SMILE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SMILE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
