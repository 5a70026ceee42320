pub mod client;
pub mod error;
pub mod parse;
pub mod types;

pub use client::{VideoIndexClient, YtdlpClient};
pub use error::IndexError;
pub use parse::parse_ndjson;
pub use types::RawVideoRecord;
