//! Channel resolution: raw video records → ordered unique channel set.

use std::collections::HashSet;

use tubescout_index::RawVideoRecord;

/// Deduplicate raw video records into an ordered set of unique channels.
///
/// Records are visited in upstream order (assumed relevance-ranked). The
/// first record seen for a channel becomes its representative — it is
/// typically the most relevant video. Records with no resolvable channel
/// identifier are skipped. Stops once `max_channels` unique channels are
/// collected to bound downstream enrichment cost.
#[must_use]
pub fn resolve_channels(
    records: Vec<RawVideoRecord>,
    max_channels: usize,
) -> Vec<(String, RawVideoRecord)> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut resolved: Vec<(String, RawVideoRecord)> = Vec::new();

    for record in records {
        if resolved.len() >= max_channels {
            break;
        }
        let Some(channel_id) = record.resolved_channel_id() else {
            continue;
        };
        let channel_id = channel_id.to_owned();
        if seen.insert(channel_id.clone()) {
            resolved.push((channel_id, record));
        }
    }

    resolved
}

/// Raw videos to request for a wanted channel count.
///
/// A single channel surfaces multiple times in video search, so the caller
/// oversamples by `factor`, capped at `cap`. Insufficient oversampling
/// silently yields fewer channels than asked for — accepted, not an error.
#[must_use]
pub fn search_count(max_channels: usize, factor: usize, cap: usize) -> usize {
    max_channels.saturating_mul(factor).min(cap)
}
