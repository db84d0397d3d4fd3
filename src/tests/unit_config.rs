use crate::config::TaxApiConfig;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = TaxApiConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite:tax.db")]))
        .expect("Should build config");

    assert_eq!(config.database_url, "sqlite:tax.db");
    assert_eq!(config.max_connections, 15);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
    assert!(config.create_database);
}

#[test]
fn test_config_overrides() {
    let config = TaxApiConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "sqlite:other.db"),
        ("MAX_CONNECTIONS", "4"),
        ("BIND_ADDR", "127.0.0.1:8080"),
        ("CREATE_DATABASE", "false"),
    ]))
    .expect("Should build config");

    assert_eq!(config.max_connections, 4);
    assert_eq!(config.bind_addr.port(), 8080);
    assert!(!config.create_database);
}

#[test]
fn test_config_requires_database_url() {
    assert!(TaxApiConfig::from_lookup(lookup_from(&[])).is_err());
}

#[test]
fn test_config_rejects_bad_bind_addr() {
    let result = TaxApiConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "sqlite:tax.db"),
        ("BIND_ADDR", "not-an-address"),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_config_rejects_non_numeric_max_connections() {
    let result = TaxApiConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "sqlite:tax.db"),
        ("MAX_CONNECTIONS", "many"),
    ]));
    assert!(result.is_err());
}

// a pool of zero connections could never serve a request
#[test]
fn test_config_rejects_zero_max_connections() {
    let result = TaxApiConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "sqlite:tax.db"),
        ("MAX_CONNECTIONS", "0"),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_config_create_database_accepts_only_booleans() {
    let result = TaxApiConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "sqlite:tax.db"),
        ("CREATE_DATABASE", "no"),
    ]));
    assert!(result.is_err());

    let config = TaxApiConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "sqlite:tax.db"),
        ("CREATE_DATABASE", "true"),
    ]))
    .expect("Should build config");
    assert!(config.create_database);
}
