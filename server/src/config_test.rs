use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.upstream_url, DEFAULT_FLEET_API_URL);
    assert_eq!(
        cfg.timeouts,
        ProxyTimeouts { request_secs: DEFAULT_PROXY_TIMEOUT_SECS, connect_secs: DEFAULT_PROXY_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn parses_overrides() {
    let cfg = config_from(&[
        ("PORT", "8443"),
        ("FLEET_API_URL", "https://fleet.example.test/v2/"),
        ("PROXY_TIMEOUT_SECS", "12"),
        ("PROXY_CONNECT_TIMEOUT_SECS", " 2 "),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8443);
    assert_eq!(cfg.upstream_url, "https://fleet.example.test/v2");
    assert_eq!(cfg.timeouts, ProxyTimeouts { request_secs: 12, connect_secs: 2 });
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = config_from(&[("PORT", ""), ("FLEET_API_URL", "  ")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.upstream_url, DEFAULT_FLEET_API_URL);
}

#[test]
fn invalid_port_is_an_error() {
    let err = config_from(&[("PORT", "eighty")]).unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: "PORT", value: "eighty".into() });
}

#[test]
fn out_of_range_port_is_an_error() {
    let err = config_from(&[("PORT", "70000")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { var: "PORT", .. }));
}

#[test]
fn negative_timeout_is_an_error() {
    let err = config_from(&[("PROXY_TIMEOUT_SECS", "-1")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { var: "PROXY_TIMEOUT_SECS", .. }));
}

#[test]
fn upstream_without_scheme_is_rejected() {
    let err = config_from(&[("FLEET_API_URL", "fleet.internal:8080")]).unwrap_err();
    assert_eq!(err, ConfigError::InvalidUpstream("fleet.internal:8080".into()));
}
