//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API-key management, typed response deserialization,
//! batched statistics lookups, and bounded retry. The API enforces a hard
//! cap of 50 ids per `channels`/`videos` call; this client splits larger
//! inputs transparently.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::YtApiError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ChannelListResponse, ChannelStatistics, PlaylistItemsResponse, VideoListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Hard upstream cap on ids per `channels`/`videos` statistics call.
pub const STATS_BATCH_SIZE: usize = 50;

/// Page size for `playlistItems` requests (also the upstream maximum).
const PLAYLIST_PAGE_SIZE: usize = 50;

/// Guard against cycling page tokens.
const MAX_PLAYLIST_PAGES: usize = 20;

/// Client for the `YouTube` Data API v3.
///
/// Use [`YouTubeApiClient::new`] for production or
/// [`YouTubeApiClient::with_base_url`] to point at a mock server in tests.
pub struct YouTubeApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YouTubeApiClient {
    /// Creates a client pointed at the production API.
    ///
    /// `max_retries` bounds additional attempts on transient errors (5xx,
    /// 429, network); `backoff_base_ms` seeds the exponential back-off.
    ///
    /// # Errors
    ///
    /// Returns [`YtApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, YtApiError> {
        Self::with_base_url(api_key, timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YtApiError::Http`] if the HTTP client cannot be built, or
    /// [`YtApiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, YtApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tubescout/0.1 (channel-discovery)")
            .build()?;

        // Ensure exactly one trailing slash so Url::join appends the
        // endpoint path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YtApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches exact statistics for the given channel ids, batching requests
    /// at [`STATS_BATCH_SIZE`] ids per call.
    ///
    /// Ids unknown to the API are simply absent from the returned map.
    ///
    /// # Errors
    ///
    /// - [`YtApiError::Api`] on a non-2xx response after retries.
    /// - [`YtApiError::Http`] on network failure after retries.
    /// - [`YtApiError::Deserialize`] on an unexpected response shape.
    pub async fn channel_statistics(
        &self,
        channel_ids: &[String],
    ) -> Result<HashMap<String, ChannelStatistics>, YtApiError> {
        let mut stats = HashMap::with_capacity(channel_ids.len());
        for batch in channel_ids.chunks(STATS_BATCH_SIZE) {
            let ids = batch.join(",");
            let url = self.build_url(
                "channels",
                &[("part", "statistics,snippet"), ("id", &ids)],
            )?;
            let response: ChannelListResponse = self
                .get_json(&url, &format!("channels(statistics,{} ids)", batch.len()))
                .await?;
            for item in response.items {
                let merged = item.statistics.map(ChannelStatistics::from).unwrap_or_default();
                stats.insert(item.id, merged);
            }
        }
        Ok(stats)
    }

    /// Looks up the id of a channel's uploads playlist, `None` when the
    /// channel is unknown or carries no uploads playlist.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::channel_statistics`].
    pub async fn uploads_playlist_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<String>, YtApiError> {
        let url = self.build_url("channels", &[("part", "contentDetails"), ("id", channel_id)])?;
        let response: ChannelListResponse = self
            .get_json(&url, &format!("channels(contentDetails,id={channel_id})"))
            .await?;
        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.content_details)
            .and_then(|details| details.related_playlists)
            .and_then(|playlists| playlists.uploads))
    }

    /// Collects up to `limit` video ids from a playlist, following
    /// `nextPageToken` pagination. Page count is capped to guard against
    /// cycling tokens.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::channel_statistics`].
    pub async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, YtApiError> {
        let mut video_ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        while video_ids.len() < limit {
            pages += 1;
            if pages > MAX_PLAYLIST_PAGES {
                tracing::warn!(
                    playlist_id,
                    pages,
                    "playlist pagination cap reached before limit"
                );
                break;
            }

            let page_size = (limit - video_ids.len()).min(PLAYLIST_PAGE_SIZE).to_string();
            let mut params = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }
            let url = self.build_url("playlistItems", &params)?;
            let response: PlaylistItemsResponse = self
                .get_json(&url, &format!("playlistItems(playlistId={playlist_id})"))
                .await?;

            if response.items.is_empty() {
                break;
            }
            video_ids.extend(
                response
                    .items
                    .into_iter()
                    .filter_map(|item| item.content_details.map(|details| details.video_id)),
            );

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        video_ids.truncate(limit);
        Ok(video_ids)
    }

    /// Fetches known view counts for the given video ids (batched ≤50 per
    /// call). Videos with no reported view count are omitted.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::channel_statistics`].
    pub async fn video_view_counts(&self, video_ids: &[String]) -> Result<Vec<u64>, YtApiError> {
        let mut views = Vec::with_capacity(video_ids.len());
        for batch in video_ids.chunks(STATS_BATCH_SIZE) {
            let ids = batch.join(",");
            let url = self.build_url("videos", &[("part", "statistics"), ("id", &ids)])?;
            let response: VideoListResponse = self
                .get_json(&url, &format!("videos(statistics,{} ids)", batch.len()))
                .await?;
            views.extend(
                response
                    .items
                    .into_iter()
                    .filter_map(|item| item.statistics.and_then(|s| s.view_count)),
            );
        }
        Ok(views)
    }

    /// Exact recompute of a channel's average recent views: uploads playlist
    /// → most recent `sample` video ids → view counts → truncated mean.
    ///
    /// Returns `Ok(None)` when the channel, playlist, or view counts are
    /// missing — "unknown", not an error.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::channel_statistics`].
    pub async fn recent_average_views(
        &self,
        channel_id: &str,
        sample: usize,
    ) -> Result<Option<u64>, YtApiError> {
        let Some(playlist_id) = self.uploads_playlist_id(channel_id).await? else {
            return Ok(None);
        };
        let video_ids = self.playlist_video_ids(&playlist_id, sample).await?;
        if video_ids.is_empty() {
            return Ok(None);
        }
        let views = self.video_view_counts(&video_ids).await?;
        if views.is_empty() {
            return Ok(None);
        }
        let sum: u64 = views.iter().sum();
        Ok(Some(sum / views.len() as u64))
    }

    /// Builds the full request URL with the API key and percent-encoded
    /// query parameters.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, YtApiError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YtApiError::InvalidBaseUrl(format!("{endpoint}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request with retry, asserts a 2xx status, and parses the
    /// body. `context` labels deserialize errors without leaking the API key
    /// embedded in the URL.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, YtApiError> {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_body(url)
        })
        .await?;
        serde_json::from_str(&body).map_err(|e| YtApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    async fn fetch_body(&self, url: &Url) -> Result<String, YtApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(YtApiError::Api {
                status: status.as_u16(),
                message: extract_api_message(&body),
            });
        }
        Ok(body)
    }
}

/// Pulls the human-readable message out of a `{"error": {...}}` body,
/// falling back to a truncated raw body.
fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}
