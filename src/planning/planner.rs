//! LLM-based task planner
//!
//! Sends a task summary to the completion provider and parses the reply
//! into an ordered phase plan.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

use crate::llm::{CompletionClient, Message};

use super::types::Plan;

/// Prompt template read from the project root; its content is owned by the
/// project, not by this crate.
pub const PLANNER_PROMPT_PATH: &str = "prompts/planner.md";

const DECOMPOSE_INSTRUCTION: &str =
    "Break the task above into executable phases and respond with the plan as a JSON document.";

/// The model's reply could not be parsed as a plan.
///
/// This is the most likely real-world failure: model output is untrusted
/// text, so the error keeps an excerpt of what actually came back.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan parse failed: {source}. Response was: {excerpt}")]
    Parse {
        source: serde_json::Error,
        excerpt: String,
    },
}

/// Decomposes a task summary into a phase plan via the completion provider.
pub struct TaskPlanner {
    project_root: PathBuf,
}

impl TaskPlanner {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Build the two-message prompt: the planner template as the system
    /// message, the serialized task summary plus a fixed instruction as the
    /// user message.
    pub fn build_prompt(&self, task_summary: &Value) -> Result<Vec<Message>> {
        let prompt_path = self.project_root.join(PLANNER_PROMPT_PATH);
        let system_prompt = std::fs::read_to_string(&prompt_path)
            .with_context(|| format!("Failed to read planner prompt at {}", prompt_path.display()))?;

        let summary_json = serde_json::to_string_pretty(task_summary)
            .context("Failed to serialize task summary")?;

        Ok(vec![
            Message::system(system_prompt),
            Message::user(format!(
                "Task details:\n{}\n\n{}",
                summary_json, DECOMPOSE_INSTRUCTION
            )),
        ])
    }

    /// Create a plan for a task summary.
    ///
    /// Transport errors from the client propagate as-is; a reply that is not
    /// valid plan JSON fails with [`PlanError::Parse`]. No retry either way.
    pub async fn plan_task(
        &self,
        client: &dyn CompletionClient,
        task_summary: &Value,
    ) -> Result<Plan> {
        let messages = self.build_prompt(task_summary)?;
        let content = client.complete(&messages).await?;
        let plan = Self::parse_plan(&content)?;
        tracing::info!(phases = plan.domain_phases.len(), "plan created");
        Ok(plan)
    }

    /// Parse the model's reply, tolerating markdown code-fence wrappers.
    fn parse_plan(text: &str) -> Result<Plan, PlanError> {
        let text = text.trim();

        let json_str = if text.starts_with('{') {
            text
        } else {
            // Reply may wrap the JSON in a code fence or lead-in prose;
            // take the outermost braces
            let start = text.find('{').unwrap_or(0);
            let end = text.rfind('}').map(|i| i + 1).unwrap_or(0);
            &text[start..end.max(start)]
        };

        serde_json::from_str(json_str).map_err(|e| PlanError::Parse {
            source: e,
            excerpt: text.chars().take(200).collect(),
        })
    }
}
