//! Worker configuration loaded from a TOML file.

use serde::Deserialize;
use std::time::Duration;
use wayfinder_cache::SiteCacheConfig;
use wayfinder_error::ConfigError;
use wayfinder_gemini::GeneratorConfig;
use wayfinder_queue::QueueConfig;

/// Top-level worker configuration.
///
/// Every section is optional; missing sections fall back to the defaults
/// that also apply when no config file exists. Secrets (`GEMINI_API_KEY`,
/// `DATABASE_URL`) stay in the environment and never appear here.
#[derive(Debug, Clone, Default, Deserialize, derive_getters::Getters)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerConfig {
    generator: GeneratorSettings,
    queue: QueueSettings,
    cache: CacheSettings,
}

/// Model and retry settings.
#[derive(Debug, Clone, Deserialize, derive_getters::Getters)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Model override; `GEMINI_MODEL` applies when unset
    model: Option<String>,
    temperature: f32,
    max_retries: usize,
    concurrency: usize,
    timeout_secs: u64,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_retries: 3,
            concurrency: 3,
            timeout_secs: 30,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
        }
    }
}

/// Delivery retry and retention settings.
#[derive(Debug, Clone, Deserialize, derive_getters::Getters)]
#[serde(default, deny_unknown_fields)]
pub struct QueueSettings {
    max_delivery_attempts: usize,
    delivery_backoff_ms: u64,
    completed_retention_secs: u64,
    failed_retention_secs: u64,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            max_delivery_attempts: 3,
            delivery_backoff_ms: 2000,
            completed_retention_secs: 24 * 60 * 60,
            failed_retention_secs: 7 * 24 * 60 * 60,
        }
    }
}

/// Read cache settings.
#[derive(Debug, Clone, Deserialize, derive_getters::Getters)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    enabled: bool,
    default_ttl_secs: u64,
    max_size: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl_secs: 300,
            max_size: 1000,
        }
    }
}

impl WorkerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file {path}: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::new(format!("Failed to parse config file {path}: {e}")))
    }

    /// The generator configuration derived from this file.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            max_retries: self.generator.max_retries,
            temperature: self.generator.temperature,
            concurrency: self.generator.concurrency,
            initial_backoff: Duration::from_millis(self.generator.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.generator.max_backoff_ms),
        }
    }

    /// The queue configuration derived from this file.
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            max_delivery_attempts: self.queue.max_delivery_attempts,
            delivery_backoff: Duration::from_millis(self.queue.delivery_backoff_ms),
            completed_retention: Duration::from_secs(self.queue.completed_retention_secs),
            failed_retention: Duration::from_secs(self.queue.failed_retention_secs),
        }
    }

    /// The cache configuration, or `None` when caching is disabled.
    pub fn cache_config(&self) -> Option<SiteCacheConfig> {
        self.cache.enabled.then(|| {
            SiteCacheConfig::default()
                .with_default_ttl(self.cache.default_ttl_secs)
                .with_max_size(self.cache.max_size)
        })
    }
}
