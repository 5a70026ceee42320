//! Subprocess-backed client for the external video index (yt-dlp).

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::IndexError;
use crate::parse::parse_ndjson;
use crate::types::RawVideoRecord;

/// Capability interface over the external video index.
///
/// The production implementation is [`YtdlpClient`]; tests inject fakes so
/// resolver and enricher logic runs without the external tool installed.
pub trait VideoIndexClient: Send + Sync {
    /// Search the index for videos matching `query`, requesting up to
    /// `count` raw results.
    fn search_videos(
        &self,
        query: &str,
        count: usize,
    ) -> impl Future<Output = Result<Vec<RawVideoRecord>, IndexError>> + Send;

    /// List up to `limit` recent uploads from a channel page.
    fn list_channel_videos(
        &self,
        channel_url: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RawVideoRecord>, IndexError>> + Send;
}

/// Client that shells out to yt-dlp with bounded timeouts and parses its
/// newline-delimited JSON output.
///
/// Search invocations get a long timeout (large result counts stream slowly);
/// per-channel listings a shorter one. A timed-out child is killed rather
/// than left running.
pub struct YtdlpClient {
    bin: String,
    search_timeout: Duration,
    listing_timeout: Duration,
}

impl YtdlpClient {
    /// Creates a client for the given binary with per-mode timeouts in
    /// seconds.
    #[must_use]
    pub fn new(bin: impl Into<String>, search_timeout_secs: u64, listing_timeout_secs: u64) -> Self {
        Self {
            bin: bin.into(),
            search_timeout: Duration::from_secs(search_timeout_secs),
            listing_timeout: Duration::from_secs(listing_timeout_secs),
        }
    }

    /// Runs the binary with `args`, enforcing `timeout` on the whole
    /// invocation.
    ///
    /// `kill_on_drop` reaps the child when the timeout fires and the wait
    /// future is dropped.
    async fn run(&self, args: Vec<String>, timeout: Duration) -> Result<String, IndexError> {
        let mut command = Command::new(&self.bin);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| IndexError::Spawn {
            bin: self.bin.clone(),
            source,
        })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| IndexError::Timeout {
                bin: self.bin.clone(),
                seconds: timeout.as_secs(),
            })?
            .map_err(|source| IndexError::Io {
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(IndexError::NonZeroExit {
                bin: self.bin.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VideoIndexClient for YtdlpClient {
    async fn search_videos(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<RawVideoRecord>, IndexError> {
        let args = vec![
            format!("ytsearch{count}:{query}"),
            "--dump-json".to_owned(),
            "--flat-playlist".to_owned(),
            "--no-warnings".to_owned(),
            "--quiet".to_owned(),
        ];
        let stdout = self.run(args, self.search_timeout).await?;
        Ok(parse_ndjson(&stdout))
    }

    async fn list_channel_videos(
        &self,
        channel_url: &str,
        limit: usize,
    ) -> Result<Vec<RawVideoRecord>, IndexError> {
        let args = vec![
            format!("{}/videos", channel_url.trim_end_matches('/')),
            "--dump-json".to_owned(),
            "--flat-playlist".to_owned(),
            "--playlist-items".to_owned(),
            format!("1:{limit}"),
            "--no-warnings".to_owned(),
            "--quiet".to_owned(),
        ];
        let stdout = self.run(args, self.listing_timeout).await?;
        Ok(parse_ndjson(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let client = YtdlpClient::new("tubescout-no-such-binary", 5, 5);
        let err = client.search_videos("anything", 3).await.unwrap_err();
        assert!(matches!(err, IndexError::Spawn { .. }));
    }

    #[tokio::test]
    async fn non_zero_exit_is_reported_with_status() {
        // `false` ignores its arguments and exits 1.
        let client = YtdlpClient::new("false", 5, 5);
        let err = client.search_videos("anything", 3).await.unwrap_err();
        assert!(matches!(err, IndexError::NonZeroExit { status: 1, .. }));
    }

    #[tokio::test]
    async fn clean_exit_with_no_output_yields_no_records() {
        // `true` ignores its arguments, prints nothing, and exits 0.
        let client = YtdlpClient::new("true", 5, 5);
        let records = client.search_videos("anything", 3).await.unwrap();
        assert!(records.is_empty());
    }

    #[cfg(unix)]
    mod scripted {
        use super::*;
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        /// Writes an executable shell script standing in for yt-dlp.
        fn fake_ytdlp(name: &str, body: &str) -> PathBuf {
            let path = std::env::temp_dir().join(format!(
                "tubescout-fake-ytdlp-{}-{}",
                std::process::id(),
                name
            ));
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "#!/bin/sh\n{body}").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn parses_ndjson_from_stdout() {
            let script = fake_ytdlp(
                "ok",
                r#"printf '%s\n' '{"channel_id":"UC1","title":"A","view_count":5}' 'garbage' '{"channel_id":"UC2","title":"B"}'"#,
            );
            let client = YtdlpClient::new(script.to_string_lossy(), 5, 5);
            let records = client.search_videos("cooking", 2).await.unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].channel_id.as_deref(), Some("UC1"));
            let _ = std::fs::remove_file(script);
        }

        #[tokio::test]
        async fn slow_child_is_killed_on_timeout() {
            let script = fake_ytdlp("slow", "sleep 5");
            let client = YtdlpClient::new(script.to_string_lossy(), 1, 1);
            let err = client.search_videos("cooking", 2).await.unwrap_err();
            assert!(matches!(err, IndexError::Timeout { seconds: 1, .. }));
            let _ = std::fs::remove_file(script);
        }
    }
}
