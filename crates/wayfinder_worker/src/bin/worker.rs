//! Queue-consuming worker process.
//!
//! Reads `wayfinder.toml` (or the path given as the first argument) for
//! tuning, `DATABASE_URL` and `GEMINI_API_KEY` from the environment, and
//! consumes the content generation queue until shutdown.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;
use wayfinder_cache::SiteCache;
use wayfinder_database::DieselRepository;
use wayfinder_gemini::{ContentGenerator, GeminiClient};
use wayfinder_queue::QueueProvider;
use wayfinder_worker::{GenerationWorker, WorkerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wayfinder.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        info!(path = %config_path, "Loading worker configuration");
        WorkerConfig::from_file(&config_path)?
    } else {
        info!("No config file found; using defaults");
        WorkerConfig::default()
    };

    let repository = DieselRepository::from_env()?;
    let client = match config.generator().model() {
        Some(model) => {
            let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
                wayfinder_error::GenerationError::new(
                    wayfinder_error::GenerationErrorKind::MissingApiKey,
                )
            })?;
            GeminiClient::new(api_key, model.clone())
        }
        None => GeminiClient::from_env()?,
    }
    .with_timeout_secs(*config.generator().timeout_secs());

    let generator = ContentGenerator::with_config(client, config.generator_config());
    let mut worker = GenerationWorker::new(repository, generator);
    if let Some(cache_config) = config.cache_config() {
        worker = worker.with_cache(Arc::new(Mutex::new(SiteCache::new(cache_config))));
    }

    let provider = match std::env::var("WAYFINDER_QUEUE") {
        Ok(_) => QueueProvider::from_env(),
        Err(_) => QueueProvider::in_process(config.queue_config()),
    };
    let queue = provider.queue();

    let pruner = Arc::clone(&queue);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            pruner.prune().await;
        }
    });

    worker.run(queue).await;
    Ok(())
}
