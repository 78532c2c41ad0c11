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

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_environment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.locations.is_empty());
    assert_eq!(cfg.catalog_api_key, "");
    assert_eq!(cfg.catalog_base_url, "http://catalog.api.2gis.ru");
    assert_eq!(cfg.catalog_api_version, "1.3");
    assert_eq!(cfg.catalog_request_timeout_secs, 10);
    assert_eq!(cfg.catalog_user_agent, "relax/0.1 (rating-search)");
    assert_eq!(cfg.search_timeout_secs, 30);
    assert_eq!(cfg.worker_pool_size, 16);
    assert_eq!(cfg.pool_acquire_timeout_ms, 5000);
}

#[test]
fn build_app_config_reads_locations_in_order() {
    let mut map = HashMap::new();
    map.insert("RELAX_LOCATIONS", "Новосибирск,Омск, Томск");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.locations, vec!["Новосибирск", "Омск", "Томск"]);
}

#[test]
fn build_app_config_reads_api_key() {
    let mut map = HashMap::new();
    map.insert("RELAX_CATALOG_API_KEY", "secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.catalog_api_key, "secret-key");
}

#[test]
fn parse_locations_drops_blank_entries() {
    assert!(parse_locations("").is_empty());
    assert!(parse_locations(" , ,").is_empty());
    assert_eq!(parse_locations("Omsk,,Tomsk,"), vec!["Omsk", "Tomsk"]);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("RELAX_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RELAX_BIND_ADDR"),
        "expected InvalidEnvVar(RELAX_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_search_timeout() {
    let mut map = HashMap::new();
    map.insert("RELAX_SEARCH_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RELAX_SEARCH_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RELAX_SEARCH_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_pool_size() {
    let mut map = HashMap::new();
    map.insert("RELAX_WORKER_POOL_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RELAX_WORKER_POOL_SIZE"),
        "expected InvalidEnvVar(RELAX_WORKER_POOL_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_search_timeout() {
    let mut map = HashMap::new();
    map.insert("RELAX_SEARCH_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RELAX_SEARCH_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RELAX_SEARCH_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_pool_overrides() {
    let mut map = HashMap::new();
    map.insert("RELAX_WORKER_POOL_SIZE", "4");
    map.insert("RELAX_POOL_ACQUIRE_TIMEOUT_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.worker_pool_size, 4);
    assert_eq!(cfg.pool_acquire_timeout().as_millis(), 250);
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("RELAX_CATALOG_API_KEY", "top-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("top-secret"), "key leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
