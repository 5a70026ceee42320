pub mod app_config;
pub mod channel;
pub mod config;
pub mod export;
pub mod format;

pub use app_config::AppConfig;
pub use channel::{AnalysisResult, ChannelRecord, ChannelReport, RunSnapshot, RunStatus};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
