//! Per-channel enrichment with a bounded concurrent worker pool.

use futures::StreamExt;

use tubescout_core::ChannelRecord;
use tubescout_index::{RawVideoRecord, VideoIndexClient};

use crate::progress::{ProgressEvent, ProgressReporter};

/// Titles kept per record for display/LLM context.
const MAX_TITLES: usize = 10;

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Width of the worker pool. Deliberately small to respect upstream
    /// rate limits and avoid tripping anti-scraping defenses.
    pub concurrency: usize,
    /// Recent uploads sampled per channel.
    pub recent_sample: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            recent_sample: 10,
        }
    }
}

/// Enrich every resolved channel, at most `options.concurrency` at a time.
///
/// Output order equals input (discovery) order regardless of completion
/// order — `buffered` yields results in stream order. A failure fetching
/// one channel's uploads degrades that channel to seed-only data; it never
/// affects the others.
pub async fn enrich_channels<C: VideoIndexClient>(
    index: &C,
    resolved: Vec<(String, RawVideoRecord)>,
    options: &EnrichOptions,
    progress: &ProgressReporter,
) -> Vec<ChannelRecord> {
    let recent_sample = options.recent_sample;
    futures::stream::iter(resolved.into_iter().enumerate().map(
        |(position, (channel_id, seed))| async move {
            progress.emit(ProgressEvent::ChannelStarted {
                index: position,
                name: display_name(&seed),
            });
            let record = enrich_one(index, channel_id, seed, recent_sample).await;
            progress.emit(ProgressEvent::ChannelFinished {
                index: position,
                name: record.name.clone(),
            });
            record
        },
    ))
    .buffered(options.concurrency.max(1))
    .collect()
    .await
}

async fn enrich_one<C: VideoIndexClient>(
    index: &C,
    channel_id: String,
    seed: RawVideoRecord,
    recent_sample: usize,
) -> ChannelRecord {
    let name = display_name(&seed);
    let url = first_non_empty([seed.channel_url.clone(), seed.uploader_url.clone()])
        .unwrap_or_else(|| ChannelRecord::fallback_url(&channel_id));

    let uploads = match index.list_channel_videos(&url, recent_sample).await {
        Ok(videos) => videos,
        Err(error) => {
            tracing::warn!(
                channel_id = %channel_id,
                error = %error,
                "recent-upload listing failed; keeping seed-only fields"
            );
            Vec::new()
        }
    };

    let known_views: Vec<u64> = uploads.iter().filter_map(|v| v.view_count).collect();
    let recent_video_titles: Vec<String> = uploads
        .iter()
        .filter_map(|v| v.title.as_deref())
        .filter(|t| !t.is_empty())
        .take(MAX_TITLES)
        .map(ToOwned::to_owned)
        .collect();
    let video_count = if uploads.is_empty() {
        None
    } else {
        Some(uploads.len() as u64)
    };

    ChannelRecord {
        channel_id,
        name,
        url,
        subscriber_count: seed.channel_follower_count,
        total_view_count: None,
        video_count,
        average_recent_views: truncated_mean(&known_views),
        recent_video_titles,
    }
}

fn display_name(seed: &RawVideoRecord) -> String {
    first_non_empty([seed.channel.clone(), seed.uploader.clone()])
        .unwrap_or_else(|| "Unknown".to_owned())
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

/// Arithmetic mean truncated to an integer; `None` for an empty sample.
pub(crate) fn truncated_mean(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<u64>() / values.len() as u64)
    }
}
