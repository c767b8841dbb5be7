use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GOOGLE_MAPS_API_KEY", "server-secret");
    m.insert("GOOGLE_MAPS_PUBLISHABLE_KEY", "browser-key");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "DRIVETHRU_ENV"));
}

#[test]
fn build_app_config_fails_without_server_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_MAPS_API_KEY"),
        "expected MissingEnvVar(GOOGLE_MAPS_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_publishable_key() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("GOOGLE_MAPS_API_KEY", "server-secret");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_MAPS_PUBLISHABLE_KEY"),
        "expected MissingEnvVar(GOOGLE_MAPS_PUBLISHABLE_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_key_as_missing() {
    let mut map = full_env();
    map.insert("GOOGLE_MAPS_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_MAPS_API_KEY"),
        "expected MissingEnvVar(GOOGLE_MAPS_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.maps_api_key, "server-secret");
    assert_eq!(cfg.maps_publishable_key, "browser-key");
    assert!(cfg.maps_map_id.is_none());
    assert_eq!(cfg.maps_base_url, "https://maps.googleapis.com/maps/api/");
    assert_eq!(cfg.maps_timeout_secs, 30);
    assert_eq!(cfg.default_franchise, "McDonald's");
    assert_eq!(cfg.search_radius_meters, 5000);
    assert_eq!(cfg.dedup_key, DedupKey::Address);
    assert_eq!(cfg.result_cap, None);
    assert_eq!(cfg.places_concurrency, 1);
    assert_eq!(cfg.rate_limit_per_minute, 120);
}

#[test]
fn log_level_default_follows_environment() {
    let mut map = full_env();
    map.insert("DRIVETHRU_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "info");

    map.insert("DRIVETHRU_ENV", "test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "warn");
}

#[test]
fn explicit_log_level_overrides_environment_default() {
    let mut map = full_env();
    map.insert("DRIVETHRU_ENV", "production");
    map.insert("DRIVETHRU_LOG_LEVEL", "trace");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "trace");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("DRIVETHRU_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DRIVETHRU_BIND_ADDR"),
        "expected InvalidEnvVar(DRIVETHRU_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn dedup_key_place_id_override() {
    let mut map = full_env();
    map.insert("DRIVETHRU_DEDUP_KEY", "place_id");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.dedup_key, DedupKey::PlaceId);
}

#[test]
fn dedup_key_invalid() {
    let mut map = full_env();
    map.insert("DRIVETHRU_DEDUP_KEY", "name");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DRIVETHRU_DEDUP_KEY"),
        "expected InvalidEnvVar(DRIVETHRU_DEDUP_KEY), got: {result:?}"
    );
}

#[test]
fn result_cap_override() {
    let mut map = full_env();
    map.insert("DRIVETHRU_RESULT_CAP", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.result_cap, Some(10));
}

#[test]
fn result_cap_zero_means_uncapped() {
    let mut map = full_env();
    map.insert("DRIVETHRU_RESULT_CAP", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.result_cap, None);
}

#[test]
fn result_cap_invalid() {
    let mut map = full_env();
    map.insert("DRIVETHRU_RESULT_CAP", "ten");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DRIVETHRU_RESULT_CAP"),
        "expected InvalidEnvVar(DRIVETHRU_RESULT_CAP), got: {result:?}"
    );
}

#[test]
fn places_concurrency_zero_is_clamped_to_one() {
    let mut map = full_env();
    map.insert("DRIVETHRU_PLACES_CONCURRENCY", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_concurrency, 1);
}

#[test]
fn search_radius_zero_is_rejected() {
    let mut map = full_env();
    map.insert("DRIVETHRU_SEARCH_RADIUS_METERS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DRIVETHRU_SEARCH_RADIUS_METERS"),
        "expected InvalidEnvVar(DRIVETHRU_SEARCH_RADIUS_METERS), got: {result:?}"
    );
}

#[test]
fn maps_timeout_invalid() {
    let mut map = full_env();
    map.insert("DRIVETHRU_MAPS_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DRIVETHRU_MAPS_TIMEOUT_SECS"),
        "expected InvalidEnvVar(DRIVETHRU_MAPS_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_server_key() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("server-secret"));
    assert!(rendered.contains("[redacted]"));
}
