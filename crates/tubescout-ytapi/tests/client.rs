//! Integration tests for `YouTubeApiClient` using wiremock HTTP mocks.

use tubescout_ytapi::{YouTubeApiClient, YtApiError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn test_client(base_url: &str) -> YouTubeApiClient {
    YouTubeApiClient::with_base_url("test-key", 30, 2, 1, base_url)
        .expect("client construction should not fail")
}

/// Matches only requests whose `id` query parameter holds at most `0` extra
/// ids beyond the batch cap — used to assert the client never exceeds it.
struct IdCountAtMost(usize);

impl Match for IdCountAtMost {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .find(|(k, _)| k == "id")
            .is_some_and(|(_, v)| v.split(',').count() <= self.0)
    }
}

#[tokio::test]
async fn channel_statistics_parses_string_counts() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": "UC1",
                "statistics": {
                    "subscriberCount": "15400",
                    "viewCount": "1234567",
                    "videoCount": "321"
                }
            },
            {
                "id": "UC2",
                "statistics": {
                    "subscriberCount": "0",
                    "hiddenSubscriberCount": true,
                    "viewCount": "99"
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("key", "test-key"))
        .and(query_param("part", "statistics,snippet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stats = client
        .channel_statistics(&["UC1".to_owned(), "UC2".to_owned()])
        .await
        .unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats["UC1"].subscriber_count, Some(15400));
    assert_eq!(stats["UC1"].total_view_count, Some(1_234_567));
    assert_eq!(stats["UC1"].video_count, Some(321));
    // Hidden subscriber counts must stay unknown, not zero.
    assert_eq!(stats["UC2"].subscriber_count, None);
    assert_eq!(stats["UC2"].total_view_count, Some(99));
}

#[tokio::test]
async fn statistics_requests_are_batched_at_fifty_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(IdCountAtMost(50))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .expect(3)
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..120).map(|i| format!("UC{i:03}")).collect();
    let client = test_client(&server.uri());
    let stats = client.channel_statistics(&ids).await.unwrap();

    assert!(stats.is_empty());
    // The mock's `.expect(3)` verifies the 50/50/20 split on drop.
}

#[tokio::test]
async fn uploads_playlist_id_resolves_from_content_details() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": "UC1",
                "contentDetails": { "relatedPlaylists": { "uploads": "UU1" } }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("part", "contentDetails"))
        .and(query_param("id", "UC1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(
        client.uploads_playlist_id("UC1").await.unwrap(),
        Some("UU1".to_owned())
    );
}

#[tokio::test]
async fn unknown_channel_has_no_uploads_playlist() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.uploads_playlist_id("UCmissing").await.unwrap(), None);
}

#[tokio::test]
async fn playlist_video_ids_follows_page_tokens() {
    let server = MockServer::start().await;

    let page_one = serde_json::json!({
        "items": [
            { "contentDetails": { "videoId": "v1" } },
            { "contentDetails": { "videoId": "v2" } }
        ],
        "nextPageToken": "p2"
    });
    let page_two = serde_json::json!({
        "items": [
            { "contentDetails": { "videoId": "v3" } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "UU1"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_one))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "UU1"))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_two))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client.playlist_video_ids("UU1", 10).await.unwrap();
    assert_eq!(ids, vec!["v1", "v2", "v3"]);
}

#[tokio::test]
async fn recent_average_views_is_truncated_mean_of_exact_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "id": "UC1", "contentDetails": { "relatedPlaylists": { "uploads": "UU1" } } }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "contentDetails": { "videoId": "v1" } },
                { "contentDetails": { "videoId": "v2" } },
                { "contentDetails": { "videoId": "v3" } }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "v1,v2,v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "id": "v1", "statistics": { "viewCount": "100" } },
                { "id": "v2", "statistics": { "viewCount": "200" } },
                { "id": "v3", "statistics": { "viewCount": "301" } }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let average = client.recent_average_views("UC1", 10).await.unwrap();
    // (100 + 200 + 301) / 3 = 200 truncated.
    assert_eq!(average, Some(200));
}

#[tokio::test]
async fn api_error_surfaces_upstream_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "code": 403, "message": "quotaExceeded" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .channel_statistics(&["UC1".to_owned()])
        .await
        .unwrap_err();
    match err {
        YtApiError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "quotaExceeded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [ { "id": "UC1", "statistics": { "subscriberCount": "5" } } ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stats = client.channel_statistics(&["UC1".to_owned()]).await.unwrap();
    assert_eq!(stats["UC1"].subscriber_count, Some(5));
}
