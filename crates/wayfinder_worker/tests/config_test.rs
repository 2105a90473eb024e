//! Tests for worker configuration loading.

use std::time::Duration;
use wayfinder_worker::WorkerConfig;

fn write_temp_config(name: &str, contents: &str) -> String {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_defaults_without_file_sections() {
    let path = write_temp_config("wayfinder-config-empty.toml", "");
    let config = WorkerConfig::from_file(&path).unwrap();

    let generator = config.generator_config();
    assert_eq!(generator.max_retries, 3);
    assert_eq!(generator.temperature, 0.7);
    assert_eq!(generator.concurrency, 3);
    assert_eq!(generator.initial_backoff, Duration::from_millis(500));
    assert_eq!(generator.max_backoff, Duration::from_secs(30));

    let queue = config.queue_config();
    assert_eq!(queue.max_delivery_attempts, 3);
    assert_eq!(queue.delivery_backoff, Duration::from_millis(2000));
    assert_eq!(queue.completed_retention, Duration::from_secs(24 * 60 * 60));
    assert_eq!(queue.failed_retention, Duration::from_secs(7 * 24 * 60 * 60));

    assert!(config.cache_config().is_some());
}

#[test]
fn test_overrides_apply() {
    let path = write_temp_config(
        "wayfinder-config-overrides.toml",
        r#"
[generator]
model = "gemini-2.5-pro"
temperature = 0.2
max_retries = 5

[queue]
delivery_backoff_ms = 100

[cache]
enabled = false
"#,
    );
    let config = WorkerConfig::from_file(&path).unwrap();

    assert_eq!(config.generator().model().as_deref(), Some("gemini-2.5-pro"));
    assert_eq!(config.generator_config().max_retries, 5);
    assert_eq!(config.generator_config().temperature, 0.2);
    // Unset fields keep their defaults.
    assert_eq!(config.generator_config().concurrency, 3);
    assert_eq!(
        config.queue_config().delivery_backoff,
        Duration::from_millis(100)
    );
    assert!(config.cache_config().is_none());
}

#[test]
fn test_missing_file_errors() {
    let err = WorkerConfig::from_file("/nonexistent/wayfinder.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_unknown_key_errors() {
    let path = write_temp_config(
        "wayfinder-config-unknown.toml",
        "[generator]\nmodell = \"typo\"\n",
    );
    assert!(WorkerConfig::from_file(&path).is_err());
}
