//! The end-to-end discovery pipeline: search → resolve → enrich → overlay.

use tubescout_core::ChannelRecord;
use tubescout_index::VideoIndexClient;
use tubescout_ytapi::YouTubeApiClient;

use crate::enrich::{enrich_channels, EnrichOptions};
use crate::overlay::apply_authoritative_stats;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::resolve::{resolve_channels, search_count};

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Raw videos requested per wanted channel (duplication compensation).
    pub oversample_factor: usize,
    /// Upper bound on one search request's result count.
    pub oversample_cap: usize,
    /// Enrichment worker-pool width.
    pub concurrency: usize,
    /// Recent uploads sampled per channel.
    pub recent_sample: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            oversample_factor: 3,
            oversample_cap: 600,
            concurrency: 4,
            recent_sample: 10,
        }
    }
}

/// One configured discovery pipeline, reusable across runs.
///
/// Generic over the index client so tests inject fakes; the authoritative
/// statistics overlay is skipped when no API client is configured.
pub struct DiscoveryPipeline<C> {
    index: C,
    stats_api: Option<YouTubeApiClient>,
    options: DiscoveryOptions,
}

impl<C: VideoIndexClient> DiscoveryPipeline<C> {
    pub fn new(index: C, stats_api: Option<YouTubeApiClient>, options: DiscoveryOptions) -> Self {
        Self {
            index,
            stats_api,
            options,
        }
    }

    /// The underlying index client.
    pub fn index(&self) -> &C {
        &self.index
    }

    /// Run one discovery. Always returns records in discovery order; index
    /// failures degrade to an empty result rather than erroring — upstream
    /// scraping is best-effort by contract.
    pub async fn run(
        &self,
        query: &str,
        max_channels: usize,
        progress: &ProgressReporter,
    ) -> Vec<ChannelRecord> {
        progress.emit(ProgressEvent::SearchStarted {
            query: query.to_owned(),
        });

        let count = search_count(
            max_channels,
            self.options.oversample_factor,
            self.options.oversample_cap,
        );
        let raw = match self.index.search_videos(query, count).await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(query, error = %error, "video search failed; treating as empty");
                Vec::new()
            }
        };
        let videos = raw.len();

        let resolved = resolve_channels(raw, max_channels);
        progress.emit(ProgressEvent::SearchFinished {
            videos,
            channels: resolved.len(),
        });
        tracing::info!(
            query,
            videos,
            channels = resolved.len(),
            "resolved unique channels"
        );

        let enrich_options = EnrichOptions {
            concurrency: self.options.concurrency,
            recent_sample: self.options.recent_sample,
        };
        let mut records = enrich_channels(&self.index, resolved, &enrich_options, progress).await;

        if let Some(api) = &self.stats_api {
            if !records.is_empty() {
                progress.emit(ProgressEvent::StatsOverlayStarted {
                    channels: records.len(),
                });
                apply_authoritative_stats(api, &mut records, self.options.recent_sample).await;
            }
        }

        records
    }
}
