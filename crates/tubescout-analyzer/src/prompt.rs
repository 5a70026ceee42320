//! Prompt construction for the partner-fit analysis.

use tubescout_core::format::thousands;
use tubescout_core::ChannelRecord;

/// Titles included per channel in the summary; more adds tokens without
/// improving the niche classification.
const TITLES_PER_CHANNEL: usize = 5;

pub(crate) const SYSTEM_PROMPT: &str = "You are an expert analyst for Higgsfield AI — a company that builds AI-powered video generation tools for creators and brands.

Your task: for each YouTube channel provided, determine:
1. `niche` — 1-2 word topic classification (e.g. \"tech reviews\", \"travel vlog\", \"gaming\", \"auto\", \"beauty\", \"cooking\")
2. `why_partner_fit` — MAX 25 WORDS. One concise sentence why this channel fits Higgsfield AI. Focus on their content format and how AI video tools help.

Respond in the same language as the channel's content. If channel titles are in Russian, respond in Russian.

Return a JSON array of objects with keys: channel_id, niche, why_partner_fit";

/// Strict response schema: `{"analyses": [{channel_id, niche, why_partner_fit}]}`.
pub(crate) fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "json_schema",
        "json_schema": {
            "name": "channel_analyses",
            "schema": {
                "type": "object",
                "properties": {
                    "analyses": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "channel_id": { "type": "string" },
                                "niche": { "type": "string" },
                                "why_partner_fit": { "type": "string" }
                            },
                            "required": ["channel_id", "niche", "why_partner_fit"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["analyses"],
                "additionalProperties": false
            },
            "strict": true
        }
    })
}

/// One text block per channel: name, id, and whatever statistics are known.
pub(crate) fn build_channel_summary(channels: &[ChannelRecord]) -> String {
    let mut blocks: Vec<String> = Vec::with_capacity(channels.len());
    for ch in channels {
        let mut lines = vec![format!("Channel: {} (ID: {})", ch.name, ch.channel_id)];
        if let Some(subs) = ch.subscriber_count {
            lines.push(format!("  Subscribers: {}", thousands(subs)));
        }
        if let Some(avg) = ch.average_recent_views {
            lines.push(format!("  Avg views: {}", thousands(avg)));
        }
        if !ch.recent_video_titles.is_empty() {
            let titles: Vec<&str> = ch
                .recent_video_titles
                .iter()
                .take(TITLES_PER_CHANNEL)
                .map(String::as_str)
                .collect();
            lines.push(format!("  Recent videos: {}", titles.join("; ")));
        }
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}
