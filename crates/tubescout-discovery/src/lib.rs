pub mod enrich;
pub mod overlay;
pub mod pipeline;
pub mod progress;
pub mod resolve;

pub use enrich::{enrich_channels, EnrichOptions};
pub use overlay::apply_authoritative_stats;
pub use pipeline::{DiscoveryOptions, DiscoveryPipeline};
pub use progress::{progress_channel, ProgressEvent, ProgressReporter};
pub use resolve::{resolve_channels, search_count};
