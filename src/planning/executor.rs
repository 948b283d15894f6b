//! Plan executor
//!
//! Runs each phase's command in sequence and collects the captured output.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;

use super::types::{Plan, PhaseResult};

/// Executes a phase plan in a working directory bound at construction.
pub struct PlanExecutor {
    working_dir: PathBuf,
}

impl PlanExecutor {
    /// Bind the working directory: the given path, else `PROJECT_PATH`,
    /// else the current directory.
    pub fn new(working_dir: Option<PathBuf>) -> Result<Self> {
        let working_dir = match working_dir {
            Some(dir) => dir,
            None => match std::env::var_os("PROJECT_PATH") {
                Some(path) => PathBuf::from(path),
                None => {
                    std::env::current_dir().context("Could not determine current directory")?
                }
            },
        };

        Ok(Self { working_dir })
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Run every phase that carries a command, in input order, and return one
    /// result per executed phase.
    ///
    /// A non-zero exit code is recorded as data and does not stop later
    /// phases. Only a failure to spawn the subprocess at all (for example an
    /// invalid working directory) fails the whole call. Commands run through
    /// a shell with no timeout; phases run to completion no matter how long
    /// they take.
    pub async fn execute_plan(&self, plan: &Plan) -> Result<Vec<PhaseResult>> {
        let mut results = Vec::new();

        for phase in &plan.domain_phases {
            let cmd = match phase.exec.as_deref() {
                Some(cmd) if !cmd.is_empty() => cmd,
                _ => continue,
            };

            tracing::debug!(no = ?phase.no, command = %cmd, "executing phase");

            let output = Command::new("sh")
                .arg("-c")
                .arg(cmd)
                .current_dir(&self.working_dir)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .with_context(|| format!("Failed to spawn command: {}", cmd))?;

            // code() is None when the process died to a signal
            let returncode = output.status.code().unwrap_or(-1);

            if returncode != 0 {
                tracing::warn!(no = ?phase.no, returncode, "phase exited non-zero");
            }

            results.push(PhaseResult {
                no: phase.no,
                exec: cmd.to_string(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                returncode,
            });
        }

        Ok(results)
    }
}
