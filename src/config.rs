use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub project: ProjectConfig,
}

/// Configuration for the completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the completion service
    pub api_key: Option<String>,

    /// Model identifier (default: gpt-4)
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (default: 0.3)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum output tokens per completion (default: 4000)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Base URL for the API (optional, for custom endpoints)
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_max_tokens() -> usize {
    4000
}

/// Tokens for the Slack listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    pub bot_token: Option<String>,
    pub app_token: Option<String>,
}

/// Where plan phases execute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project root; phases run here and the planner prompt is read from here
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("taskpilot").join("config.toml"))
    }

    /// Project root: configured path, else the current directory
    pub fn project_root(&self) -> Result<PathBuf> {
        match &self.project.path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Could not determine current directory"),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| default_model());
        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_temperature);
        let max_tokens = std::env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_tokens);
        let base_url = std::env::var("OPENAI_BASE_URL").ok();

        Self {
            api_key,
            model,
            temperature,
            max_tokens,
            base_url,
        }
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: std::env::var("SLACK_BOT_TOKEN").ok(),
            app_token: std::env::var("SLACK_APP_TOKEN").ok(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            path: std::env::var_os("PROJECT_PATH").map(PathBuf::from),
        }
    }
}
