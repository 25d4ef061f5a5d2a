use netoverride_domain::{CliOverrides, Config, ConfigError, RefreshPolicy};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.proxy.bind_address, "127.0.0.1");
    assert_eq!(config.proxy.port, 5353);
    assert_eq!(config.proxy.flow_idle_timeout, 30);
    assert_eq!(config.upstream.default_resolver, "8.8.8.8:53");
    assert_eq!(config.upstream.port, 53);
    assert_eq!(config.upstream.timeout, 5);
    assert_eq!(config.upstream.max_response_size, 512);
    assert_eq!(config.mappings.refresh, RefreshPolicy::PerFlow);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
        [proxy]
        port = 5300

        [mappings]
        refresh = "per_datagram"
        "#,
    )
    .unwrap();

    assert_eq!(config.proxy.port, 5300);
    assert_eq!(config.proxy.bind_address, "127.0.0.1");
    assert_eq!(config.mappings.refresh, RefreshPolicy::PerDatagram);
    assert_eq!(config.upstream.timeout, 5);
}

#[test]
fn test_config_rejects_unknown_refresh_policy() {
    let result = Config::from_toml(
        r#"
        [mappings]
        refresh = "per_hour"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = Config::default();
    config.proxy.port = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_bad_resolver() {
    let mut config = Config::default();
    config.upstream.default_resolver = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_tiny_response_size() {
    let mut config = Config::default();
    config.upstream.max_response_size = 4;
    assert!(config.validate().is_err());
}

#[test]
fn test_cli_overrides_win() {
    let dir = std::env::temp_dir().join(format!("netoverride-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[proxy]\nport = 5300\n").unwrap();

    let config = Config::load(
        path.to_str(),
        CliOverrides {
            port: Some(5400),
            log_level: Some("debug".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(config.proxy.port, 5400);
    assert_eq!(config.logging.level, "debug");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let result = Config::load(Some("/nonexistent/netoverride.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}
