//! Chat-completions request and response types (OpenAI-compatible API).

use serde::{Deserialize, Serialize};

use tubescout_core::AnalysisResult;

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    /// Strict JSON-schema structured output; see
    /// [`crate::client::response_schema`].
    pub response_format: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// The structured payload the model is constrained to return: a JSON object
/// with one `analyses` array.
#[derive(Debug, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub analyses: Vec<AnalysisResult>,
}
