use std::net::SocketAddr;

/// Runtime configuration for all tubescout binaries, loaded from the
/// environment by [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,

    /// YouTube Data API v3 key. When absent, runs skip the authoritative
    /// statistics overlay and keep best-effort scraped values.
    pub youtube_api_key: Option<String>,
    /// OpenAI API key. When absent, runs skip the analysis step.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_timeout_secs: u64,

    /// Path or name of the yt-dlp binary.
    pub ytdlp_bin: String,
    /// Timeout for one video search invocation (large result counts).
    pub search_timeout_secs: u64,
    /// Timeout for one per-channel upload-listing invocation.
    pub channel_timeout_secs: u64,

    /// Width of the per-channel enrichment worker pool.
    pub enrich_concurrency: usize,
    /// Raw videos requested per wanted channel before deduplication.
    pub oversample_factor: usize,
    /// Upper bound on the raw video request count.
    pub oversample_cap: usize,
    /// Recent uploads sampled per channel for averages and titles.
    pub recent_sample: usize,
    /// Channel cap applied when an API caller does not specify one.
    pub default_max_channels: usize,

    pub ytapi_timeout_secs: u64,
    pub ytapi_max_retries: u32,
    pub ytapi_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_timeout_secs", &self.openai_timeout_secs)
            .field("ytdlp_bin", &self.ytdlp_bin)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("channel_timeout_secs", &self.channel_timeout_secs)
            .field("enrich_concurrency", &self.enrich_concurrency)
            .field("oversample_factor", &self.oversample_factor)
            .field("oversample_cap", &self.oversample_cap)
            .field("recent_sample", &self.recent_sample)
            .field("default_max_channels", &self.default_max_channels)
            .field("ytapi_timeout_secs", &self.ytapi_timeout_secs)
            .field("ytapi_max_retries", &self.ytapi_max_retries)
            .field(
                "ytapi_retry_backoff_base_ms",
                &self.ytapi_retry_backoff_base_ms,
            )
            .finish()
    }
}
