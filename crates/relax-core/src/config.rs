use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric or address value cannot be parsed.
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
/// Returns `ConfigError` if a numeric or address value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Split a comma-separated location list.
///
/// Entries are trimmed and blank entries dropped, so `""`, `","` and
/// `" , "` all yield an empty list.
#[must_use]
pub fn parse_locations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`. No variable is required: a missing location list or API
/// key yields an empty value rather than a startup failure.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("RELAX_ENV", "development"));
    let bind_addr = parse_addr("RELAX_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("RELAX_LOG_LEVEL", "info");

    let locations = parse_locations(&or_default("RELAX_LOCATIONS", ""));

    let catalog_api_key = or_default("RELAX_CATALOG_API_KEY", "");
    let catalog_base_url = or_default("RELAX_CATALOG_BASE_URL", "http://catalog.api.2gis.ru");
    let catalog_api_version = or_default("RELAX_CATALOG_API_VERSION", "1.3");
    let catalog_request_timeout_secs = parse_u64("RELAX_CATALOG_REQUEST_TIMEOUT_SECS", "10")?;
    let catalog_user_agent = or_default("RELAX_CATALOG_USER_AGENT", "relax/0.1 (rating-search)");

    let search_timeout_secs = parse_u64("RELAX_SEARCH_TIMEOUT_SECS", "30")?;
    if search_timeout_secs == 0 {
        return Err(invalid(
            "RELAX_SEARCH_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }
    let worker_pool_size = parse_usize("RELAX_WORKER_POOL_SIZE", "16")?;
    if worker_pool_size == 0 {
        return Err(invalid(
            "RELAX_WORKER_POOL_SIZE",
            "must be at least 1".to_string(),
        ));
    }
    let pool_acquire_timeout_ms = parse_u64("RELAX_POOL_ACQUIRE_TIMEOUT_MS", "5000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        locations,
        catalog_api_key,
        catalog_base_url,
        catalog_api_version,
        catalog_request_timeout_secs,
        catalog_user_agent,
        search_timeout_secs,
        worker_pool_size,
        pool_acquire_timeout_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
