use std::time::Duration;

use vitrine_config::*;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.catalog.base_url, "http://localhost:8000");
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.llm.interpret_temperature, 0.5);
    assert_eq!(config.llm.explain_temperature, 0.6);
    assert_eq!(config.llm.explain_max_tokens, 60);
    assert_eq!(config.search.target_count, 5);
    assert_eq!(config.search.max_attempts, 6);
    assert_eq!(config.values.ttl(), Duration::from_secs(6 * 60 * 60));
    assert_eq!(config.values.retry_interval(), Duration::from_secs(60));
}

#[test]
fn test_config_validation() {
    let manager = ConfigManager::new();
    let mut config = AppConfig::default();
    assert!(manager.validate_config(&config).is_ok());

    config.search.target_count = 0;
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.catalog.base_url = "not a url".to_string();
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.catalog.username = Some("shop".to_string());
    assert!(matches!(
        manager.validate_config(&config),
        Err(ConfigError::Validation(_))
    ));

    let mut config = AppConfig::default();
    config.llm.explain_temperature = 3.0;
    assert!(manager.validate_config(&config).is_err());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[catalog]
base_url = "https://catalog.example.com"
username = "shop"
password = "secret"

[search]
target_count = 8
result_cap = 20

[search.default_filter]
attribute = "mastercategory"
value = "Apparel"
"#,
    )
    .unwrap();

    let mut manager =
        ConfigManager::with_path(path).with_env_prefix("VITRINE_TEST_FILE_ONLY");
    let config = manager.load_config().unwrap();

    assert_eq!(config.catalog.base_url, "https://catalog.example.com");
    assert_eq!(config.catalog.username.as_deref(), Some("shop"));
    assert_eq!(config.catalog.timeout_secs, 10);
    assert_eq!(config.search.target_count, 8);
    assert_eq!(config.search.result_cap, 20);
    assert_eq!(config.search.max_attempts, 6);
    assert_eq!(config.search.default_filter.value, "Apparel");
    assert!(manager.validate_config(&config).is_ok());
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[search]\ntarget_count = 8\n").unwrap();

    std::env::set_var("VITRINE_TEST_ENV_SEARCH__TARGET_COUNT", "3");
    std::env::set_var("VITRINE_TEST_ENV_LLM__MODEL", "gpt-4o");

    let mut manager = ConfigManager::with_path(path).with_env_prefix("VITRINE_TEST_ENV");
    let config = manager.load_config().unwrap();

    assert_eq!(config.search.target_count, 3);
    assert_eq!(config.llm.model, "gpt-4o");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = ConfigManager::with_path(dir.path().join("absent.toml"));
    assert!(matches!(
        manager.load_config(),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.values.ttl_secs = 60;
    config.llm.model = "gpt-4o".to_string();

    let mut manager =
        ConfigManager::with_path(path.clone()).with_env_prefix("VITRINE_TEST_SAVE");
    manager.save_config(&config).unwrap();
    assert!(path.exists());

    let loaded = manager.load_config().unwrap();
    assert_eq!(loaded.values.ttl_secs, 60);
    assert_eq!(loaded.llm.model, "gpt-4o");
}

#[test]
fn test_redacted_hides_secrets() {
    let mut config = AppConfig::default();
    config.catalog.password = Some("secret".to_string());
    config.llm.api_key = Some("sk-live".to_string());

    let shown = config.redacted();
    assert_eq!(shown.catalog.password.as_deref(), Some("********"));
    assert_eq!(shown.llm.api_key.as_deref(), Some("********"));
    assert_eq!(config.llm.api_key.as_deref(), Some("sk-live"));
}
