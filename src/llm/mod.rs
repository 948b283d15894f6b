use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub mod openai;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A completion provider: turns a message list into the text content of the
/// model's reply. Injected so the planner can be tested with a fake provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// Create the completion client for the configured service.
///
/// Fails eagerly when no API key is configured, before any work begins.
pub fn create_client(config: &Config) -> Result<Box<dyn CompletionClient>> {
    let api_key = config
        .llm
        .api_key
        .clone()
        .context("OpenAI API key not set. Set OPENAI_API_KEY or configure api_key")?;

    Ok(Box::new(openai::OpenAiClient::new(
        api_key,
        config.llm.model.clone(),
        config.llm.temperature,
        config.llm.max_tokens,
        config.llm.base_url.clone(),
    )))
}
