use crate::config::{Config, ConfigError, HttpConfig, ServerConfig};

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Fresh start: no file → defaults written to config.yaml
#[test]
fn test_creates_default_config() {
    let dir = temp_dir();

    let config = Config::load_with(dir.path()).unwrap();

    assert!(dir.path().join("config.yaml").exists());
    assert_eq!(config.http, HttpConfig::default());
    assert_eq!(config.server, ServerConfig::default());
    assert_eq!(config.http.timeout_secs, 10);
    assert_eq!(config.server.listen, "0.0.0.0:8080");
}

/// Missing base directory is created
#[test]
fn test_creates_base_dir() {
    let dir = temp_dir();
    let nested = dir.path().join("a/b");

    Config::load_with(&nested).unwrap();

    assert!(nested.join("config.yaml").exists());
}

/// Partial file: missing fields fall back to defaults and get written back
#[test]
fn test_partial_config_is_completed() {
    let dir = temp_dir();
    std::fs::write(dir.path().join("config.yaml"), "http:\n  timeout_secs: 3\n").unwrap();

    let config = Config::load_with(dir.path()).unwrap();
    assert_eq!(config.http.timeout_secs, 3);
    assert_eq!(config.http.user_agent, HttpConfig::default().user_agent);

    let saved = std::fs::read_to_string(dir.path().join("config.yaml")).unwrap();
    assert!(saved.contains("user_agent"));
    assert!(saved.contains("prune_interval_secs"));
}

#[test]
fn test_save_roundtrip() {
    let dir = temp_dir();
    let mut config = Config::load_with(dir.path()).unwrap();

    config.server.listen = "127.0.0.1:9000".to_string();
    config.save().unwrap();

    let reloaded = Config::load_with(dir.path()).unwrap();
    assert_eq!(reloaded.server.listen, "127.0.0.1:9000");
}

#[test]
fn test_rejects_invalid_values() {
    let cases = [
        "http:\n  timeout_secs: 0\n",
        "http:\n  user_agent: ' '\n",
        "server:\n  prune_interval_secs: 0\n",
        "server:\n  listen: nowhere\n",
    ];

    for content in cases {
        let dir = temp_dir();
        std::fs::write(dir.path().join("config.yaml"), content).unwrap();

        let err = Config::load_with(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{content}: {err}");
    }
}

#[test]
fn test_rejects_malformed_yaml() {
    let dir = temp_dir();
    std::fs::write(dir.path().join("config.yaml"), "http: [unclosed").unwrap();

    let err = Config::load_with(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Malformed(_)));
}
