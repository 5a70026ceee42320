//! Raw record shape emitted by `yt-dlp --dump-json --flat-playlist`.
//!
//! ## Observed shape from live searches
//!
//! Flat-playlist search entries carry channel identity under two alternative
//! field pairs depending on the extractor path: `channel_id`/`channel`/
//! `channel_url` (preferred) or `uploader_id`/`uploader`/`uploader_url`
//! (fallback). Either side may be missing entirely. `channel_follower_count`
//! appears only when the search surfaced channel metadata; `view_count` is
//! absent for upcoming/live entries. Every field is therefore optional and
//! unknown fields are ignored.

use serde::Deserialize;

/// One newline-delimited JSON record from a search or channel listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideoRecord {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub uploader_id: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub channel_url: Option<String>,
    #[serde(default)]
    pub uploader_url: Option<String>,
    #[serde(default)]
    pub channel_follower_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RawVideoRecord {
    /// Candidate channel identifier: primary field first, then the
    /// uploader-side fallback. Empty strings count as absent.
    #[must_use]
    pub fn resolved_channel_id(&self) -> Option<&str> {
        self.channel_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.uploader_id.as_deref().filter(|s| !s.is_empty()))
    }
}
