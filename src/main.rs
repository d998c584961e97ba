mod config;
mod dedup;
mod model;
mod normalizer;
mod pipeline;
mod source;
mod tracker;
mod utils;

use std::sync::Arc;

use rand::Rng;
use tokio::time::{Duration, sleep};
use tracing::{error, info};

use config::{AppConfig, SearchConfig, load_config};
use model::{RunContext, SearchRequest};
use pipeline::Pipeline;
use source::JobSpyClient;
use tracker::{GithubTracker, RecordWriter};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let source = Arc::new(JobSpyClient::new(config.backend_url.clone()));
    let store = Arc::new(GithubTracker::new(
        config.github_token.clone(),
        config.repo.clone(),
    ));
    let writer = RecordWriter::new(config.status_label.clone(), config.board_column_id);
    let pipeline = Pipeline::new(source, store, writer);

    // Main processing loop
    loop {
        info!("Entering main loop...");
        info!("Searches to process: {}", config.searches.len());

        for (i, search) in config.searches.iter().enumerate() {
            process_search(&pipeline, search).await;

            // The store rate-limits across runs; space the batches out
            // with a little jitter.
            if i + 1 < config.searches.len() {
                let jitter = rand::rng().random_range(0..=5);
                sleep(Duration::from_secs(config.request_spacing_seconds + jitter)).await;
            }
        }

        info!("Waiting for timer ({}s)...", config.check_interval_seconds);
        sleep(Duration::from_secs(config.check_interval_seconds)).await;
        info!("Restarting main loop...");
    }
}

/// Runs a single configured search through the pipeline and logs its
/// report.
async fn process_search(pipeline: &Pipeline, search: &SearchConfig) {
    info!("Processing search: {}", search.name);
    let request = SearchRequest {
        since_when: search.since_when.clone(),
        keywords: search.keywords.clone(),
        exclude_keywords: search.exclude_keywords.clone(),
        is_remote: search.is_remote,
        location: search.location.clone(),
        distance: search.distance,
        require_all_keywords: search.require_all_keywords,
        limit: search.limit,
    };
    let ctx = RunContext {
        keyword: search.keywords.join(" "),
        remote_only: search.is_remote,
    };

    let report = pipeline.run(&request, &ctx).await;
    report.log_summary(&search.name);
}
