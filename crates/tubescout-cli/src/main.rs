mod report;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tubescout_analyzer::OpenAiClient;
use tubescout_core::{AnalysisResult, ChannelReport};
use tubescout_discovery::{progress_channel, DiscoveryOptions, DiscoveryPipeline, ProgressEvent};
use tubescout_index::YtdlpClient;
use tubescout_ytapi::YouTubeApiClient;

#[derive(Debug, Parser)]
#[command(name = "tubescout")]
#[command(about = "Discover YouTube channels and score their partner fit")]
struct Cli {
    /// Search query for YouTube channels
    query: String,

    /// Max channels to find
    #[arg(long, default_value_t = 20)]
    max_results: usize,

    /// Output JSON only, no table
    #[arg(long)]
    json_only: bool,

    /// Skip language-model analysis
    #[arg(long)]
    no_ai: bool,

    /// Also write the results as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = tubescout_core::load_app_config()?;

    if !cli.no_ai && config.openai_api_key.is_none() {
        anyhow::bail!("OPENAI_API_KEY not set — set it or pass --no-ai");
    }

    println!("Searching YouTube for: {}", cli.query);
    println!("Max results: {}", cli.max_results);
    if config.youtube_api_key.is_none() {
        println!("YouTube API key not set — using yt-dlp only mode");
    }

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
        None => None,
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

    // Progress goes to stderr so stdout stays clean for the table/JSON.
    let (reporter, mut events) = progress_channel();
    let drain = tokio::spawn(async move {
        let mut fetched = 0usize;
        while let Some(event) = events.recv().await {
            match event {
                ProgressEvent::SearchFinished { videos, channels } => {
                    eprintln!("Search returned {videos} videos across {channels} channels");
                }
                ProgressEvent::ChannelFinished { name, .. } => {
                    fetched += 1;
                    eprintln!("Fetched channel {fetched}: {name}");
                }
                ProgressEvent::StatsOverlayStarted { .. } => {
                    eprintln!("Enriching with YouTube Data API...");
                }
                _ => {}
            }
        }
    });

    let records = pipeline.run(&cli.query, cli.max_results, &reporter).await;
    drop(reporter);
    let _ = drain.await;

    if records.is_empty() {
        println!("No channels found.");
        return Ok(());
    }
    println!("Found {} channels", records.len());

    let mut analyses: Vec<AnalysisResult> = Vec::new();
    if !cli.no_ai {
        if let Some(key) = &config.openai_api_key {
            let analyzer =
                OpenAiClient::new(key, &config.openai_model, config.openai_timeout_secs)?;
            println!("Analyzing {} channels...", records.len());
            analyses = analyzer
                .analyze_channels(&records)
                .await
                .context("channel analysis failed")?;
        }
    }

    let mut analysis_map: HashMap<String, AnalysisResult> = analyses
        .into_iter()
        .map(|analysis| (analysis.channel_id.clone(), analysis))
        .collect();
    let reports: Vec<ChannelReport> = records
        .into_iter()
        .map(|channel| {
            let analysis = analysis_map.remove(&channel.channel_id);
            ChannelReport { channel, analysis }
        })
        .collect();

    if !cli.json_only {
        println!("\n{}", report::render_table(&reports));
    }

    let json_path = PathBuf::from(report::default_json_filename(&cli.query));
    report::save_json(&reports, &json_path)?;
    println!("Results saved to {}", json_path.display());

    if let Some(csv_path) = &cli.csv {
        report::save_csv(&reports, csv_path)?;
        println!("CSV saved to {}", csv_path.display());
    }

    Ok(())
}
