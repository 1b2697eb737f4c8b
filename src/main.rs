use domain::gateway::sentiment_api::SentimentApiClient;
use domain::sentiment_worker::SentimentWorker;
use log::*;
use sentiment_ai::{Analyzer, ChainAnalyzer, KeywordAnalyzer};
use service::config::Config;
use service::logging::Logger;
use service::AppState;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting event platform backend ({} environment)",
        config.runtime_env()
    );

    let db = Arc::new(service::init_database(&config).await?);
    let app_state = AppState::new(config, &db);

    let analyzer = build_analyzer(&app_state.config)?;

    let worker = SentimentWorker::new(
        app_state.database_connection.clone(),
        analyzer,
        Duration::from_secs(app_state.config.sentiment_poll_interval_secs),
        app_state.config.sentiment_batch_size,
        app_state.config.sentiment_max_attempts,
    );
    worker.start();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    worker.stop();

    Ok(())
}

/// Selects the analyzer stack from configuration. Without a remote API URL
/// the local keyword analyzer runs alone; with one, the remote client is used
/// either directly or chained in front of the keyword fallback.
fn build_analyzer(config: &Config) -> Result<Arc<dyn Analyzer>, Box<dyn std::error::Error>> {
    match config.sentiment_api_url() {
        Some(url) => {
            let remote: Arc<dyn Analyzer> = Arc::new(SentimentApiClient::new(&url)?);
            if config.sentiment_keyword_fallback {
                info!("Using remote sentiment API at {url} with keyword fallback");
                Ok(Arc::new(ChainAnalyzer::new(vec![
                    remote,
                    Arc::new(KeywordAnalyzer::new()),
                ])))
            } else {
                info!("Using remote sentiment API at {url}");
                Ok(remote)
            }
        }
        None => {
            warn!("No sentiment API URL configured, using the local keyword analyzer");
            Ok(Arc::new(KeywordAnalyzer::new()))
        }
    }
}
