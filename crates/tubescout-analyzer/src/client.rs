//! Chat-completions client for partner-fit analysis.

use std::time::Duration;

use reqwest::{Client, Url};

use tubescout_core::{AnalysisResult, ChannelRecord};

use crate::error::AnalyzerError;
use crate::prompt::{build_channel_summary, response_schema, SYSTEM_PROMPT};
use crate::types::{AnalysisPayload, ChatRequest, ChatResponse, Message};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Channels per completion request. Bounds prompt size so one oversized run
/// cannot blow the model's context window.
pub const ANALYSIS_BATCH_SIZE: usize = 30;

const TEMPERATURE: f32 = 0.3;

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Use [`OpenAiClient::new`] for production or
/// [`OpenAiClient::with_base_url`] to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

impl OpenAiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, AnalyzerError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the HTTP client cannot be built,
    /// or [`AnalyzerError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tubescout/0.1 (channel-discovery)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| AnalyzerError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
        })
    }

    /// Score every channel's partner fit, batching at
    /// [`ANALYSIS_BATCH_SIZE`] channels per completion request.
    ///
    /// Results join back onto channels by `channel_id`; the model may omit
    /// entries, so callers must treat analyses as optional per channel.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::Api`] on a non-2xx response.
    /// - [`AnalyzerError::Http`] on network failure.
    /// - [`AnalyzerError::EmptyResponse`] when the completion has no content.
    /// - [`AnalyzerError::Deserialize`] when the envelope or the structured
    ///   content does not parse.
    pub async fn analyze_channels(
        &self,
        channels: &[ChannelRecord],
    ) -> Result<Vec<AnalysisResult>, AnalyzerError> {
        let mut results: Vec<AnalysisResult> = Vec::with_capacity(channels.len());
        for batch in channels.chunks(ANALYSIS_BATCH_SIZE) {
            let payload = self.analyze_batch(batch).await?;
            results.extend(payload.analyses);
        }
        Ok(results)
    }

    async fn analyze_batch(
        &self,
        batch: &[ChannelRecord],
    ) -> Result<AnalysisPayload, AnalyzerError> {
        tracing::debug!(channels = batch.len(), model = %self.model, "requesting analyses");
        let summary = build_channel_summary(batch);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(format!("Analyze these YouTube channels:\n\n{summary}")),
            ],
            temperature: TEMPERATURE,
            response_format: response_schema(),
        };

        let url = self
            .base_url
            .join("chat/completions")
            .map_err(|e| AnalyzerError::InvalidBaseUrl(e.to_string()))?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let envelope: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AnalyzerError::Deserialize {
                context: "chat/completions envelope".to_owned(),
                source: e,
            })?;
        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AnalyzerError::EmptyResponse)?;

        serde_json::from_str(&content).map_err(|e| AnalyzerError::Deserialize {
            context: "structured analyses content".to_owned(),
            source: e,
        })
    }
}
