//! Authoritative statistics overlay.
//!
//! Runs after best-effort enrichment when a `YouTube` Data API key is
//! configured. Exact counts overwrite scraped estimates where the API
//! returned them; channels still missing `average_recent_views` get an
//! exact recompute from per-video statistics. Every failure in this module
//! is logged and folded to "keep what we already have" — the overlay can
//! only improve records, never lose a run.

use tubescout_core::ChannelRecord;
use tubescout_ytapi::YouTubeApiClient;

pub async fn apply_authoritative_stats(
    api: &YouTubeApiClient,
    records: &mut [ChannelRecord],
    recent_sample: usize,
) {
    if records.is_empty() {
        return;
    }

    let ids: Vec<String> = records.iter().map(|r| r.channel_id.clone()).collect();
    let stats = match api.channel_statistics(&ids).await {
        Ok(stats) => stats,
        Err(error) => {
            tracing::warn!(
                channels = ids.len(),
                error = %error,
                "authoritative statistics fetch failed; keeping best-effort values"
            );
            return;
        }
    };

    for record in records.iter_mut() {
        if let Some(exact) = stats.get(&record.channel_id) {
            if exact.subscriber_count.is_some() {
                record.subscriber_count = exact.subscriber_count;
            }
            if exact.total_view_count.is_some() {
                record.total_view_count = exact.total_view_count;
            }
            if exact.video_count.is_some() {
                record.video_count = exact.video_count;
            }
        }

        if record.average_recent_views.is_none() {
            match api.recent_average_views(&record.channel_id, recent_sample).await {
                Ok(Some(average)) => record.average_recent_views = Some(average),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(
                        channel_id = %record.channel_id,
                        error = %error,
                        "exact view recompute failed; leaving average as-is"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param_contains};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn record(channel_id: &str, average: Option<u64>) -> ChannelRecord {
        ChannelRecord {
            channel_id: channel_id.to_owned(),
            name: channel_id.to_owned(),
            url: ChannelRecord::fallback_url(channel_id),
            subscriber_count: Some(10),
            total_view_count: None,
            video_count: None,
            average_recent_views: average,
            recent_video_titles: Vec::new(),
        }
    }

    fn test_api(base_url: &str) -> YouTubeApiClient {
        YouTubeApiClient::with_base_url("test-key", 30, 0, 0, base_url).unwrap()
    }

    #[tokio::test]
    async fn exact_stats_overwrite_best_effort_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param_contains("part", "statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": "UC1",
                    "statistics": {
                        "subscriberCount": "5000",
                        "viewCount": "100000",
                        "videoCount": "42"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let api = test_api(&server.uri());
        // Average already known: no recompute calls expected.
        let mut records = vec![record("UC1", Some(123))];
        apply_authoritative_stats(&api, &mut records, 10).await;

        assert_eq!(records[0].subscriber_count, Some(5000));
        assert_eq!(records[0].total_view_count, Some(100_000));
        assert_eq!(records[0].video_count, Some(42));
        assert_eq!(records[0].average_recent_views, Some(123));
    }

    #[tokio::test]
    async fn overlay_failure_keeps_best_effort_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": { "code": 403, "message": "quotaExceeded" }
            })))
            .mount(&server)
            .await;

        let api = test_api(&server.uri());
        let mut records = vec![record("UC1", Some(123))];
        apply_authoritative_stats(&api, &mut records, 10).await;

        assert_eq!(records[0].subscriber_count, Some(10));
        assert_eq!(records[0].average_recent_views, Some(123));
    }

    #[tokio::test]
    async fn recompute_failure_leaves_average_as_is() {
        let server = MockServer::start().await;
        // Statistics call succeeds; the contentDetails lookup for the
        // recompute fails.
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param_contains("part", "statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{ "id": "UC1", "statistics": { "subscriberCount": "7" } }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param_contains("part", "contentDetails"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = test_api(&server.uri());
        let mut records = vec![record("UC1", None)];
        apply_authoritative_stats(&api, &mut records, 10).await;

        assert_eq!(records[0].subscriber_count, Some(7));
        assert_eq!(records[0].average_recent_views, None);
    }
}
