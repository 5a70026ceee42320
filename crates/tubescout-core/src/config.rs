use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse. Every variable has a
/// default, so a bare environment is valid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let bind_addr = parse_addr("TUBESCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("TUBESCOUT_LOG_LEVEL", "info");

    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let openai_api_key = optional("OPENAI_API_KEY");
    let openai_model = or_default("TUBESCOUT_OPENAI_MODEL", "gpt-4o-mini");
    let openai_timeout_secs = parse_u64("TUBESCOUT_OPENAI_TIMEOUT_SECS", "120")?;

    let ytdlp_bin = or_default("TUBESCOUT_YTDLP_BIN", "yt-dlp");
    let search_timeout_secs = parse_u64("TUBESCOUT_SEARCH_TIMEOUT_SECS", "300")?;
    let channel_timeout_secs = parse_u64("TUBESCOUT_CHANNEL_TIMEOUT_SECS", "90")?;

    let enrich_concurrency = parse_usize("TUBESCOUT_ENRICH_CONCURRENCY", "4")?;
    let oversample_factor = parse_usize("TUBESCOUT_OVERSAMPLE_FACTOR", "3")?;
    let oversample_cap = parse_usize("TUBESCOUT_OVERSAMPLE_CAP", "600")?;
    let recent_sample = parse_usize("TUBESCOUT_RECENT_SAMPLE", "10")?;
    let default_max_channels = parse_usize("TUBESCOUT_DEFAULT_MAX_CHANNELS", "200")?;

    let ytapi_timeout_secs = parse_u64("TUBESCOUT_YTAPI_TIMEOUT_SECS", "30")?;
    let ytapi_max_retries = parse_u32("TUBESCOUT_YTAPI_MAX_RETRIES", "2")?;
    let ytapi_retry_backoff_base_ms = parse_u64("TUBESCOUT_YTAPI_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        youtube_api_key,
        openai_api_key,
        openai_model,
        openai_timeout_secs,
        ytdlp_bin,
        search_timeout_secs,
        channel_timeout_secs,
        enrich_concurrency,
        oversample_factor,
        oversample_cap,
        recent_sample,
        default_max_channels,
        ytapi_timeout_secs,
        ytapi_max_retries,
        ytapi_retry_backoff_base_ms,
    })
}
