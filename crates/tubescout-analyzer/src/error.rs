use thiserror::Error;

/// Errors from the language-model analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status.
    #[error("analysis API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The completion came back with no message content.
    #[error("analysis response contained no content")]
    EmptyResponse,

    /// The response (or the structured content inside it) did not parse.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed or joined.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
