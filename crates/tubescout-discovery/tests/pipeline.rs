//! Pipeline tests against an in-memory index client — no yt-dlp required.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use rand::Rng;

use tubescout_discovery::{progress_channel, DiscoveryOptions, DiscoveryPipeline, ProgressEvent};
use tubescout_index::{IndexError, RawVideoRecord, VideoIndexClient};

/// Scripted index client: canned search results, per-URL listings, optional
/// randomized latency to shuffle completion order, and a failure list.
struct FakeIndex {
    search_results: Vec<RawVideoRecord>,
    listings: HashMap<String, Vec<RawVideoRecord>>,
    failing: HashSet<String>,
    randomize_latency: bool,
    requested_counts: Mutex<Vec<usize>>,
}

impl FakeIndex {
    fn new(search_results: Vec<RawVideoRecord>) -> Self {
        Self {
            search_results,
            listings: HashMap::new(),
            failing: HashSet::new(),
            randomize_latency: false,
            requested_counts: Mutex::new(Vec::new()),
        }
    }
}

impl VideoIndexClient for FakeIndex {
    async fn search_videos(
        &self,
        _query: &str,
        count: usize,
    ) -> Result<Vec<RawVideoRecord>, IndexError> {
        self.requested_counts.lock().unwrap().push(count);
        Ok(self.search_results.clone())
    }

    async fn list_channel_videos(
        &self,
        channel_url: &str,
        _limit: usize,
    ) -> Result<Vec<RawVideoRecord>, IndexError> {
        if self.randomize_latency {
            let delay_ms = rand::rng().random_range(0u64..30);
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        if self.failing.contains(channel_url) {
            return Err(IndexError::Timeout {
                bin: "yt-dlp".to_owned(),
                seconds: 90,
            });
        }
        Ok(self.listings.get(channel_url).cloned().unwrap_or_default())
    }
}

fn search_entry(channel_id: &str, title: &str) -> RawVideoRecord {
    RawVideoRecord {
        channel_id: Some(channel_id.to_owned()),
        channel: Some(format!("Channel {channel_id}")),
        channel_url: Some(format!("https://www.youtube.com/{channel_id}")),
        title: Some(title.to_owned()),
        ..RawVideoRecord::default()
    }
}

fn upload(title: &str, views: u64) -> RawVideoRecord {
    RawVideoRecord {
        title: Some(title.to_owned()),
        view_count: Some(views),
        ..RawVideoRecord::default()
    }
}

#[tokio::test]
async fn concurrent_enrichment_preserves_discovery_order() {
    // Repeat with fresh random latencies; order must hold every time.
    for _ in 0..5 {
        let ids: Vec<String> = (0..8).map(|i| format!("UC{i}")).collect();
        let search: Vec<RawVideoRecord> =
            ids.iter().map(|id| search_entry(id, "hit")).collect();
        let mut index = FakeIndex::new(search);
        index.randomize_latency = true;
        for id in &ids {
            index.listings.insert(
                format!("https://www.youtube.com/{id}"),
                vec![upload("t", 100)],
            );
        }

        let pipeline = DiscoveryPipeline::new(index, None, DiscoveryOptions::default());
        let records = pipeline
            .run("anything", 8, &tubescout_discovery::ProgressReporter::none())
            .await;

        let got: Vec<&str> = records.iter().map(|r| r.channel_id.as_str()).collect();
        let want: Vec<&str> = ids.iter().map(String::as_str).collect();
        assert_eq!(got, want, "completion order must not leak into results");
    }
}

#[tokio::test]
async fn one_channel_failure_does_not_fail_the_run() {
    let search = vec![
        search_entry("UCa", "one"),
        search_entry("UCb", "two"),
        search_entry("UCc", "three"),
    ];
    let mut index = FakeIndex::new(search);
    index
        .listings
        .insert("https://www.youtube.com/UCa".to_owned(), vec![upload("t", 10)]);
    index
        .listings
        .insert("https://www.youtube.com/UCc".to_owned(), vec![upload("t", 30)]);
    index.failing.insert("https://www.youtube.com/UCb".to_owned());

    let pipeline = DiscoveryPipeline::new(index, None, DiscoveryOptions::default());
    let records = pipeline
        .run("anything", 10, &tubescout_discovery::ProgressReporter::none())
        .await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].average_recent_views, Some(10));
    assert_eq!(records[1].average_recent_views, None);
    assert!(records[1].recent_video_titles.is_empty());
    assert_eq!(records[2].average_recent_views, Some(30));
}

#[tokio::test]
async fn end_to_end_scenario_four_channels_from_twenty_videos() {
    // 20 raw records round-robin over 4 channels; max_channels = 5.
    let ids = ["UC1", "UC2", "UC3", "UC4"];
    let search: Vec<RawVideoRecord> = (0..20)
        .map(|i| search_entry(ids[i % 4], &format!("video {i}")))
        .collect();
    let mut index = FakeIndex::new(search);
    for id in ids {
        index.listings.insert(
            format!("https://www.youtube.com/{id}"),
            vec![upload("recent", 500)],
        );
    }

    let (reporter, mut rx) = progress_channel();
    let pipeline = DiscoveryPipeline::new(index, None, DiscoveryOptions::default());
    let records = pipeline.run("cooking tips", 5, &reporter).await;
    drop(reporter);

    // All 4 distinct channels found (4 < 5), in discovery order.
    let got: Vec<&str> = records.iter().map(|r| r.channel_id.as_str()).collect();
    assert_eq!(got, ids.to_vec());
    assert!(records.iter().all(|r| r.average_recent_views == Some(500)));

    // Search request was oversampled: min(5 * 3, 600) = 15.
    let pipeline_index = pipeline_index_counts(&pipeline);
    assert_eq!(pipeline_index, vec![15]);

    let mut finished = 0;
    let mut search_started = false;
    while let Some(event) = rx.recv().await {
        match event {
            ProgressEvent::SearchStarted { ref query } => {
                assert_eq!(query, "cooking tips");
                search_started = true;
            }
            ProgressEvent::ChannelFinished { .. } => finished += 1,
            _ => {}
        }
    }
    assert!(search_started);
    assert_eq!(finished, 4);
}

#[tokio::test]
async fn empty_search_yields_empty_results() {
    let index = FakeIndex::new(Vec::new());
    let pipeline = DiscoveryPipeline::new(index, None, DiscoveryOptions::default());
    let records = pipeline
        .run("nothing", 5, &tubescout_discovery::ProgressReporter::none())
        .await;
    assert!(records.is_empty());
}

fn pipeline_index_counts(pipeline: &DiscoveryPipeline<FakeIndex>) -> Vec<usize> {
    pipeline.index().requested_counts.lock().unwrap().clone()
}
