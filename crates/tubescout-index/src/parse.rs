//! Newline-delimited JSON parsing for yt-dlp output.

use crate::types::RawVideoRecord;

/// Parse newline-delimited JSON into records, silently skipping lines that
/// are blank or fail to parse. yt-dlp interleaves the occasional diagnostic
/// line even with `--quiet`, so a bad line is expected noise, not an error.
#[must_use]
pub fn parse_ndjson(output: &str) -> Vec<RawVideoRecord> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<RawVideoRecord>(line) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::debug!(error = %error, "skipping malformed index record");
                None
            }
        })
        .collect()
}
