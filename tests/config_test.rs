//! Configuration builder tests.

use aaio::config::DEFAULT_BASE_URL;
use aaio::{AaioClient, AaioConfig};

#[test]
fn test_new_config_targets_default_host() {
    let config = AaioConfig::new("key");

    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api_key.as_deref(), Some("key"));
    assert!(config.shop_id.is_none());
    assert!(config.secret_key.is_none());
}

#[test]
fn test_builder_sets_every_field() {
    let config = AaioConfig::new("key")
        .with_shop_id("shop-1")
        .with_secret_key("secret")
        .with_base_url("http://127.0.0.1:8080")
        .with_ca_file("/etc/ssl/extra.pem");

    assert_eq!(config.shop_id.as_deref(), Some("shop-1"));
    assert_eq!(config.secret_key.as_deref().map(String::as_str), Some("secret"));
    assert_eq!(config.base_url, "http://127.0.0.1:8080");
    assert_eq!(
        config.ca_file.as_deref(),
        Some(std::path::Path::new("/etc/ssl/extra.pem"))
    );
}

#[test]
fn test_client_rejects_missing_ca_file() {
    let config = AaioConfig::new("key").with_ca_file("/nonexistent/extra.pem");

    let err = AaioClient::new(config).unwrap_err();
    assert!(err.to_string().starts_with("tls error"));
}
