use thiserror::Error;

/// Errors from the external video index client.
///
/// All of these are "upstream unavailable" conditions: callers in the
/// discovery pipeline log them and degrade to empty data rather than
/// aborting a run.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The indexing binary could not be started (missing, not executable).
    #[error("failed to spawn {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the child's output failed after a successful spawn.
    #[error("failed reading output of {bin}: {source}")]
    Io {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool exited non-zero; stderr is captured for the log line.
    #[error("{bin} exited with status {status}: {stderr}")]
    NonZeroExit {
        bin: String,
        status: i32,
        stderr: String,
    },

    /// The invocation exceeded its wall-clock bound and was killed.
    #[error("{bin} timed out after {seconds}s")]
    Timeout { bin: String, seconds: u64 },
}
