use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::conversation::DEFAULT_POLL_INTERVAL;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiFileConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelFileConfig {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssistantFileConfig {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunFileConfig {
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub poll_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionFileConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiFileConfig,
    #[serde(default)]
    pub model: ModelFileConfig,
    #[serde(default)]
    pub assistant: AssistantFileConfig,
    #[serde(default)]
    pub run: RunFileConfig,
    #[serde(default)]
    pub session: SessionFileConfig,
}

pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub assistant_id: Option<String>,
    pub poll_interval: Duration,
    pub poll_timeout: Option<Duration>,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        let file_config = FileConfig::load().unwrap_or_default();

        // API key stays env-only.
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable not set".to_string())?;

        // Precedence throughout: CLI args > env vars > config file > default.
        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("AI_API_ENDPOINT").ok())
            .or(file_config.api.endpoint.clone())
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let model = args
            .model
            .clone()
            .or_else(|| env::var("AI_MODEL").ok())
            .or(file_config.model.default_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let system_prompt = args
            .system
            .clone()
            .or_else(|| env::var("AI_SYSTEM_PROMPT").ok())
            .or(file_config.model.system_prompt.clone());

        let assistant_id = args
            .assistant_id
            .clone()
            .or_else(|| env::var("AI_ASSISTANT_ID").ok())
            .or(file_config.assistant.id.clone());

        let poll_interval = env::var("AI_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.run.poll_interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        // Absent means poll until the run settles.
        let poll_timeout = env::var("AI_POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.run.poll_timeout_secs)
            .map(Duration::from_secs);

        let verbose = args.verbose
            || env::var("AI_VERBOSE")
                .ok()
                .map(|v| v == "true")
                .or(file_config.session.verbose)
                .unwrap_or(false);

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            system_prompt,
            assistant_id,
            poll_interval,
            poll_timeout,
            verbose,
        })
    }
}

/// Normalize a user-supplied endpoint to the API base URL ending in `/v1`.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{}/v1", trimmed)
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_paths())
    }

    pub fn load_from(paths: &[PathBuf]) -> Result<Self> {
        for path in paths {
            if path.exists() {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                return Self::parse(path, &contents);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        if matches!(extension, Some("yaml") | Some("yml")) {
            serde_yaml::from_str(contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))
        } else {
            serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))
        }
    }

    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory first: local override
            PathBuf::from(".convo.yaml"),
            PathBuf::from(".convo.yml"),
            PathBuf::from(".convo.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("convo");
            paths.push(config_dir.join("convo.yaml"));
            paths.push(config_dir.join("convo.yml"));
            paths.push(config_dir.join("convo.json"));
        }

        paths
    }
}
