mod api;
mod runs;
mod worker;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use tubescout_analyzer::OpenAiClient;
use tubescout_discovery::{DiscoveryOptions, DiscoveryPipeline};
use tubescout_index::YtdlpClient;
use tubescout_ytapi::YouTubeApiClient;

use crate::api::{build_app, AppState};
use crate::runs::RunStore;
use crate::worker::RunDeps;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tubescout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let index = YtdlpClient::new(
        config.ytdlp_bin.clone(),
        config.search_timeout_secs,
        config.channel_timeout_secs,
    );

    let stats_api = match &config.youtube_api_key {
        Some(key) => Some(YouTubeApiClient::new(
            key,
            config.ytapi_timeout_secs,
            config.ytapi_max_retries,
            config.ytapi_retry_backoff_base_ms,
        )?),
        None => {
            tracing::info!("YOUTUBE_API_KEY not set — skipping authoritative statistics overlay");
            None
        }
    };

    let analyzer = match &config.openai_api_key {
        Some(key) => Some(OpenAiClient::new(
            key,
            &config.openai_model,
            config.openai_timeout_secs,
        )?),
        None => {
            tracing::info!("OPENAI_API_KEY not set — runs will skip analysis");
            None
        }
    };

    let pipeline = DiscoveryPipeline::new(
        index,
        stats_api,
        DiscoveryOptions {
            oversample_factor: config.oversample_factor,
            oversample_cap: config.oversample_cap,
            concurrency: config.enrich_concurrency,
            recent_sample: config.recent_sample,
        },
    );

    let state = AppState {
        runs: RunStore::new(),
        deps: Arc::new(RunDeps { pipeline, analyzer }),
        default_max_channels: config.default_max_channels,
    };
    let app = build_app(state);

    tracing::info!(addr = %config.bind_addr, "tubescout server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
