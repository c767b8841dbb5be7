use crate::app_config::{AppConfig, DedupKey, Environment};
use crate::ConfigError;

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    // Blank values count as missing: an empty key would only surface later as
    // a confusing provider rejection.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
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

    let maps_api_key = require("GOOGLE_MAPS_API_KEY")?;
    let maps_publishable_key = require("GOOGLE_MAPS_PUBLISHABLE_KEY")?;
    let maps_map_id = lookup("GOOGLE_MAPS_MAP_ID")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let env = parse_environment(&or_default("DRIVETHRU_ENV", "development"))?;

    let bind_addr = or_default("DRIVETHRU_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("DRIVETHRU_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("DRIVETHRU_LOG_LEVEL", env.default_log_level());

    let maps_base_url = or_default(
        "DRIVETHRU_MAPS_BASE_URL",
        "https://maps.googleapis.com/maps/api/",
    );
    let maps_timeout_secs = parse_u64("DRIVETHRU_MAPS_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "DRIVETHRU_USER_AGENT",
        "drivethru/0.1 (route-franchise-finder)",
    );

    let default_franchise = or_default("DRIVETHRU_DEFAULT_FRANCHISE", "McDonald's");
    if default_franchise.trim().is_empty() {
        return Err(invalid(
            "DRIVETHRU_DEFAULT_FRANCHISE",
            "must not be blank".to_string(),
        ));
    }

    let search_radius_meters = parse_u32("DRIVETHRU_SEARCH_RADIUS_METERS", "5000")?;
    if search_radius_meters == 0 {
        return Err(invalid(
            "DRIVETHRU_SEARCH_RADIUS_METERS",
            "must be greater than zero".to_string(),
        ));
    }

    let dedup_key = parse_dedup_key(&or_default("DRIVETHRU_DEDUP_KEY", "address"))?;

    // 0 and unset both mean "no cap".
    let result_cap = match parse_usize("DRIVETHRU_RESULT_CAP", "0")? {
        0 => None,
        cap => Some(cap),
    };

    let places_concurrency = parse_usize("DRIVETHRU_PLACES_CONCURRENCY", "1")?.max(1);
    let rate_limit_per_minute = parse_usize("DRIVETHRU_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        maps_api_key,
        maps_publishable_key,
        maps_map_id,
        maps_base_url,
        maps_timeout_secs,
        user_agent,
        default_franchise,
        search_radius_meters,
        dedup_key,
        result_cap,
        places_concurrency,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DRIVETHRU_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_dedup_key(s: &str) -> Result<DedupKey, ConfigError> {
    match s.trim() {
        "address" => Ok(DedupKey::Address),
        "place_id" => Ok(DedupKey::PlaceId),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DRIVETHRU_DEDUP_KEY".to_string(),
            reason: format!("expected 'address' or 'place_id', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
