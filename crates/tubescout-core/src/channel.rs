//! Shared domain types for channel discovery runs.

use serde::{Deserialize, Serialize};

/// Identity and derived metrics for one discovered channel.
///
/// Numeric fields are `None` when the upstream source did not report them —
/// never zero-by-default. A record is immutable once enrichment finishes;
/// the authoritative-statistics overlay produces updated values before the
/// run exposes any results to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Stable external channel identifier; unique within one discovery run.
    pub channel_id: String,
    /// Display name, `"Unknown"` when missing upstream.
    pub name: String,
    /// Canonical channel URL.
    pub url: String,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
    #[serde(default)]
    pub total_view_count: Option<u64>,
    #[serde(default)]
    pub video_count: Option<u64>,
    /// Truncated arithmetic mean of known view counts over sampled recent
    /// uploads; `None` when no sampled upload reported a view count.
    #[serde(default)]
    pub average_recent_views: Option<u64>,
    /// Up to 10 non-empty titles, most-recent-first as returned upstream.
    /// Display/LLM context only, not authoritative.
    #[serde(default)]
    pub recent_video_titles: Vec<String>,
}

impl ChannelRecord {
    /// Canonical URL constructed from a bare channel id, used when the
    /// upstream record carries no URL.
    #[must_use]
    pub fn fallback_url(channel_id: &str) -> String {
        format!("https://www.youtube.com/channel/{channel_id}")
    }
}

/// Partner-fit verdict for one channel, produced by the language-model
/// analyzer and joined back onto records by `channel_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub channel_id: String,
    /// 1–2 word topic classification, e.g. `"tech reviews"`.
    pub niche: String,
    /// One sentence (≤25 words) on why the channel fits as a partner.
    pub why_partner_fit: String,
}

/// The report unit: an enriched channel plus its optional analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReport {
    pub channel: ChannelRecord,
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
}

/// Lifecycle state of a discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Queued,
    Searching,
    Enriching,
    Analyzing,
    Done,
    Error,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::Searching => "searching",
            RunStatus::Enriching => "enriching",
            RunStatus::Analyzing => "analyzing",
            RunStatus::Done => "done",
            RunStatus::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// What a poller sees for one run: current status, a human-readable message,
/// and the ordered result list once the run is `done`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub status: RunStatus,
    pub message: String,
    #[serde(default)]
    pub results: Vec<ChannelReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_url_embeds_channel_id() {
        assert_eq!(
            ChannelRecord::fallback_url("UCabc123"),
            "https://www.youtube.com/channel/UCabc123"
        );
    }

    #[test]
    fn run_status_serializes_lowercase() {
        let json = serde_json::to_string(&RunStatus::Analyzing).unwrap();
        assert_eq!(json, "\"analyzing\"");
    }

    #[test]
    fn channel_record_roundtrips_with_missing_optionals() {
        let json = r#"{"channel_id":"UCx","name":"Unknown","url":"https://www.youtube.com/channel/UCx"}"#;
        let record: ChannelRecord = serde_json::from_str(json).unwrap();
        assert!(record.subscriber_count.is_none());
        assert!(record.recent_video_titles.is_empty());
    }
}
