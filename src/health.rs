//! Health probes for collaborator services

use anyhow::{Context, Result};
use tokio::process::Command;

use crate::config::SlackConfig;

/// Both Slack tokens present and non-empty.
pub fn slack_configured(config: &SlackConfig) -> bool {
    let has = |token: &Option<String>| token.as_deref().is_some_and(|t| !t.is_empty());
    has(&config.bot_token) && has(&config.app_token)
}

/// Probe the container runtime by asking the docker CLI for the server
/// version. Returns the version string, or an error carrying whatever the
/// CLI reported.
pub async fn check_docker() -> Result<String> {
    let output = Command::new("docker")
        .args(["version", "--format", "{{.Server.Version}}"])
        .output()
        .await
        .context("Failed to run docker CLI")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{}", stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
