pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::{YouTubeApiClient, STATS_BATCH_SIZE};
pub use error::YtApiError;
pub use types::ChannelStatistics;
