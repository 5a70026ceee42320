//! `YouTube` Data API v3 response types.
//!
//! ## Observed shape
//!
//! Every numeric statistic arrives as a JSON **string** (`"subscriberCount":
//! "12345"`), not a number; [`de_count`] accepts either form and treats an
//! unparsable value as absent. Channels with hidden subscriber counts set
//! `hiddenSubscriberCount: true` and may omit `subscriberCount` entirely.
//! `items` is omitted (not empty) when an id matches nothing.

use serde::{Deserialize, Deserializer};

/// Exact per-channel statistics, merged over best-effort scraped values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStatistics {
    pub subscriber_count: Option<u64>,
    pub total_view_count: Option<u64>,
    pub video_count: Option<u64>,
}

/// Envelope for `GET /channels`.
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    #[serde(default)]
    pub statistics: Option<ChannelStatisticsWire>,
    #[serde(default, rename = "contentDetails")]
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelStatisticsWire {
    #[serde(default, rename = "subscriberCount", deserialize_with = "de_count")]
    pub subscriber_count: Option<u64>,
    #[serde(default, rename = "viewCount", deserialize_with = "de_count")]
    pub view_count: Option<u64>,
    #[serde(default, rename = "videoCount", deserialize_with = "de_count")]
    pub video_count: Option<u64>,
    #[serde(default, rename = "hiddenSubscriberCount")]
    pub hidden_subscriber_count: bool,
}

impl From<ChannelStatisticsWire> for ChannelStatistics {
    fn from(wire: ChannelStatisticsWire) -> Self {
        ChannelStatistics {
            // A hidden count of 0 is "hidden", not "zero subscribers".
            subscriber_count: if wire.hidden_subscriber_count {
                None
            } else {
                wire.subscriber_count
            },
            total_view_count: wire.view_count,
            video_count: wire.video_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    #[serde(default, rename = "relatedPlaylists")]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    #[serde(default)]
    pub uploads: Option<String>,
}

/// Envelope for `GET /playlistItems`.
#[derive(Debug, Deserialize)]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default, rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    #[serde(default, rename = "contentDetails")]
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// Envelope for `GET /videos`.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub statistics: Option<VideoStatisticsWire>,
}

#[derive(Debug, Deserialize)]
pub struct VideoStatisticsWire {
    #[serde(default, rename = "viewCount", deserialize_with = "de_count")]
    pub view_count: Option<u64>,
}

/// Accepts a count as a JSON string, a number, or null/absent.
fn de_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Str(s)) => s.parse::<u64>().ok(),
    })
}
