//! Integration tests for logging functionality

use smile_publisher::config::LoggingConfig;
use smile_publisher::domain::PublisherError;
use smile_publisher::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

// The global subscriber can only be installed once per process, so this is the
// only test in this binary that calls init_logging successfully.
#[test]
fn test_file_logging_creates_directory_and_installs_once() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    let second = init_logging("info", &LoggingConfig::default());
    assert!(matches!(second, Err(PublisherError::Configuration(_))));

    drop(guard);
}
