use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_USER_AGENT: &str = "nearby/0.1 (places-search)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let places_api_key = require("NEARBY_PLACES_API_KEY")?;
    let places_base_url = or_default("NEARBY_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    if !(places_base_url.starts_with("http://") || places_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEARBY_PLACES_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{places_base_url}'"),
        });
    }

    let log_level = or_default("NEARBY_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("NEARBY_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEARBY_USER_AGENT", DEFAULT_USER_AGENT);
    let default_radius_meters = parse_u32("NEARBY_DEFAULT_RADIUS_METERS", "1000")?;
    let photo_max_width = parse_u32("NEARBY_PHOTO_MAX_WIDTH", "256")?;

    Ok(AppConfig {
        places_api_key,
        places_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        default_radius_meters,
        photo_max_width,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
