use std::fs;

use tempfile::TempDir;

use convo::config::{normalize_endpoint, FileConfig, DEFAULT_ENDPOINT};

#[test]
fn endpoint_normalization_appends_v1_once() {
    assert_eq!(
        normalize_endpoint("https://api.openai.com"),
        "https://api.openai.com/v1"
    );
    assert_eq!(
        normalize_endpoint("https://api.openai.com/v1"),
        "https://api.openai.com/v1"
    );
    assert_eq!(
        normalize_endpoint("https://api.openai.com/v1/"),
        "https://api.openai.com/v1"
    );
    assert_eq!(
        normalize_endpoint("http://localhost:11434/"),
        "http://localhost:11434/v1"
    );
    assert_eq!(normalize_endpoint(DEFAULT_ENDPOINT), DEFAULT_ENDPOINT);
}

#[test]
fn loads_yaml_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("convo.yaml");
    fs::write(
        &path,
        concat!(
            "api:\n",
            "  endpoint: http://localhost:11434\n",
            "model:\n",
            "  default_model: llama3\n",
            "run:\n",
            "  poll_interval_ms: 250\n",
            "  poll_timeout_secs: 60\n",
        ),
    )
    .unwrap();

    let config = FileConfig::load_from(&[path]).unwrap();
    assert_eq!(config.api.endpoint.as_deref(), Some("http://localhost:11434"));
    assert_eq!(config.model.default_model.as_deref(), Some("llama3"));
    assert_eq!(config.run.poll_interval_ms, Some(250));
    assert_eq!(config.run.poll_timeout_secs, Some(60));
    assert_eq!(config.assistant.id, None);
}

#[test]
fn loads_json_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("convo.json");
    fs::write(
        &path,
        r#"{"assistant": {"id": "asst_123"}, "session": {"verbose": true}}"#,
    )
    .unwrap();

    let config = FileConfig::load_from(&[path]).unwrap();
    assert_eq!(config.assistant.id.as_deref(), Some("asst_123"));
    assert_eq!(config.session.verbose, Some(true));
}

#[test]
fn missing_config_files_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.yaml");

    let config = FileConfig::load_from(&[path]).unwrap();
    assert!(config.api.endpoint.is_none());
    assert!(config.model.default_model.is_none());
}

#[test]
fn invalid_yaml_is_an_error_not_a_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("convo.yaml");
    fs::write(&path, "api: [not, a, mapping").unwrap();

    assert!(FileConfig::load_from(&[path]).is_err());
}

#[test]
fn first_existing_path_wins() {
    let temp_dir = TempDir::new().unwrap();
    let local = temp_dir.path().join("local.yaml");
    let global = temp_dir.path().join("global.yaml");
    fs::write(&local, "model:\n  default_model: local-model\n").unwrap();
    fs::write(&global, "model:\n  default_model: global-model\n").unwrap();

    let config = FileConfig::load_from(&[local, global]).unwrap();
    assert_eq!(config.model.default_model.as_deref(), Some("local-model"));
}
