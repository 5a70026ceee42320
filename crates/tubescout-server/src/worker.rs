//! The per-run worker: drives one discovery run end to end and feeds the
//! run store. One tokio task per run, so multiple runs proceed
//! independently; an error escaping the worker marks the run `error` with
//! the error's message.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use tubescout_analyzer::OpenAiClient;
use tubescout_core::{AnalysisResult, ChannelReport, RunStatus};
use tubescout_discovery::{progress_channel, DiscoveryPipeline, ProgressEvent};
use tubescout_index::VideoIndexClient;

use crate::runs::RunStore;

/// Everything a run worker needs besides per-run parameters.
pub(crate) struct RunDeps<C> {
    pub pipeline: DiscoveryPipeline<C>,
    pub analyzer: Option<OpenAiClient>,
}

/// Launches a run worker for an already-registered run id.
pub(crate) fn spawn_run<C>(
    runs: RunStore,
    deps: Arc<RunDeps<C>>,
    run_id: Uuid,
    query: String,
    max_channels: usize,
    skip_analysis: bool,
) where
    C: VideoIndexClient + 'static,
{
    tokio::spawn(async move {
        let outcome =
            execute_run(&runs, &deps, run_id, &query, max_channels, skip_analysis).await;
        if let Err(error) = outcome {
            tracing::error!(run_id = %run_id, error = %error, "discovery run failed");
            runs.fail(run_id, error.to_string()).await;
        }
    });
}

async fn execute_run<C: VideoIndexClient>(
    runs: &RunStore,
    deps: &RunDeps<C>,
    run_id: Uuid,
    query: &str,
    max_channels: usize,
    skip_analysis: bool,
) -> anyhow::Result<()> {
    let (reporter, mut events) = progress_channel();

    // Translate pipeline events into poller-visible status updates. The
    // drain ends when the reporter (and its pipeline clones) drop.
    let drain_runs = runs.clone();
    let drain = tokio::spawn(async move {
        let mut started = 0usize;
        let mut finished = 0usize;
        while let Some(event) = events.recv().await {
            match event {
                ProgressEvent::SearchStarted { query } => {
                    drain_runs
                        .set_status(
                            run_id,
                            RunStatus::Searching,
                            format!("Searching YouTube for: {query}"),
                        )
                        .await;
                }
                ProgressEvent::SearchFinished { channels, .. } => {
                    drain_runs
                        .set_message(run_id, format!("Found {channels} channels"))
                        .await;
                }
                ProgressEvent::ChannelStarted { name, .. } => {
                    started += 1;
                    drain_runs
                        .set_message(run_id, format!("Fetching channel {started}: {name}"))
                        .await;
                }
                ProgressEvent::ChannelFinished { .. } => {
                    finished += 1;
                    drain_runs
                        .set_message(run_id, format!("Fetched {finished} channels..."))
                        .await;
                }
                ProgressEvent::StatsOverlayStarted { .. } => {
                    drain_runs
                        .set_status(
                            run_id,
                            RunStatus::Enriching,
                            "Enriching with YouTube Data API...".to_owned(),
                        )
                        .await;
                }
            }
        }
    });

    let records = deps.pipeline.run(query, max_channels, &reporter).await;
    drop(reporter);
    let _ = drain.await;

    if records.is_empty() {
        runs.finish(run_id, Vec::new(), "No channels found".to_owned())
            .await;
        return Ok(());
    }

    let mut analyses: Vec<AnalysisResult> = Vec::new();
    if !skip_analysis {
        if let Some(analyzer) = &deps.analyzer {
            runs.set_status(
                run_id,
                RunStatus::Analyzing,
                format!("Analyzing {} channels...", records.len()),
            )
            .await;
            analyses = analyzer.analyze_channels(&records).await?;
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

    let message = format!("Done. Found {} channels.", reports.len());
    runs.finish(run_id, reports, message).await;
    Ok(())
}
