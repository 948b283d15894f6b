//! Slack listener
//!
//! Receives app-mention events and acknowledges them in-channel. Tokens are
//! validated eagerly at construction; the Socket Mode handshake and the
//! reply call go through the Slack Web API.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::config::SlackConfig;

use super::{EventSource, MentionEvent};

const SLACK_API_BASE: &str = "https://slack.com/api";

pub struct SlackListener {
    bot_token: String,
    app_token: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl SlackListener {
    /// Create a listener from configured tokens.
    ///
    /// Missing tokens are a hard failure here, before any work begins.
    pub fn new(config: &SlackConfig) -> Result<Self> {
        let bot_token = config
            .bot_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .context("SLACK_BOT_TOKEN is not set")?
            .to_string();
        let app_token = config
            .app_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .context("SLACK_APP_TOKEN is not set")?
            .to_string();

        Ok(Self {
            bot_token,
            app_token,
            base_url: SLACK_API_BASE.to_string(),
            client: reqwest::Client::new(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&SlackConfig::default())
    }

    /// Override the API base URL (for tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The acknowledgement text posted back for a mention.
    pub fn acknowledge_text(event: &MentionEvent) -> String {
        format!("<@{}> received: {}", event.user, event.text)
    }

    /// Open a Socket Mode connection and return the websocket URL.
    pub async fn open_socket_url(&self) -> Result<String> {
        let response: SlackApiResponse = self
            .client
            .post(format!("{}/apps.connections.open", self.base_url))
            .header("Authorization", format!("Bearer {}", self.app_token))
            .send()
            .await
            .context("Failed to reach Slack apps.connections.open")?
            .json()
            .await
            .context("Failed to parse Slack apps.connections.open response")?;

        if !response.ok {
            anyhow::bail!(
                "Slack refused the socket connection: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        response
            .url
            .context("Slack apps.connections.open returned no url")
    }

    /// Post the acknowledgement reply to the event's channel.
    pub async fn post_reply(&self, event: &MentionEvent) -> Result<()> {
        let body = json!({
            "channel": event.channel,
            "text": Self::acknowledge_text(event),
        });

        let response: SlackApiResponse = self
            .client
            .post(format!("{}/chat.postMessage", self.base_url))
            .header("Authorization", format!("Bearer {}", self.bot_token))
            .json(&body)
            .send()
            .await
            .context("Failed to reach Slack chat.postMessage")?
            .json()
            .await
            .context("Failed to parse Slack chat.postMessage response")?;

        if !response.ok {
            anyhow::bail!(
                "Slack rejected the reply: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        Ok(())
    }

    /// Drain the event source, acknowledging each mention.
    pub async fn run(&self, source: &mut dyn EventSource) -> Result<()> {
        while let Some(event) = source.next_event().await? {
            tracing::info!(user = %event.user, channel = %event.channel, "mention received");
            self.post_reply(&event).await?;
        }

        Ok(())
    }
}
