pub mod client;
pub mod error;
mod prompt;
pub mod types;

pub use client::{OpenAiClient, ANALYSIS_BATCH_SIZE};
pub use error::AnalyzerError;
