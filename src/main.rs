mod config;
mod health;
mod listener;
mod llm;
mod planning;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use listener::SlackListener;
use planning::{PlanExecutor, TaskPlanner};

#[derive(Parser)]
#[command(name = "taskpilot")]
#[command(about = "Plans tasks with an LLM and executes the resulting phases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check collaborator services (Slack, Docker)
    HealthCheck,
    /// Construct each component and report readiness
    TestComponents,
    /// Decompose a task summary into a phase plan
    Plan {
        /// Task summary JSON file
        #[arg(long = "task-summary")]
        task_summary: PathBuf,
        /// Output plan JSON file
        #[arg(long)]
        output: PathBuf,
    },
    /// Run a phase plan and save the results
    Execute {
        /// Plan JSON file
        #[arg(long)]
        plan: PathBuf,
        /// Output results JSON file
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpilot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::HealthCheck => {
            health_check().await?;
        }
        Commands::TestComponents => {
            test_components()?;
        }
        Commands::Plan {
            task_summary,
            output,
        } => {
            run_plan(&task_summary, &output).await?;
        }
        Commands::Execute { plan, output } => {
            run_execute(&plan, &output).await?;
        }
    }

    Ok(())
}

async fn health_check() -> Result<()> {
    let config = Config::load()?;
    let mut ok = true;

    if health::slack_configured(&config.slack) {
        println!("Slack configuration: OK");
    } else {
        eprintln!("Slack configuration: NG");
        ok = false;
    }

    match health::check_docker().await {
        Ok(_) => println!("Docker connectivity: OK"),
        Err(e) => {
            eprintln!("Docker connectivity: NG ({})", e);
            ok = false;
        }
    }

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

fn test_components() -> Result<()> {
    let config = Config::load()?;

    match SlackListener::new(&config.slack) {
        Ok(_) => println!("SlackListener: OK"),
        Err(e) => eprintln!("SlackListener: ERROR ({})", e),
    }

    match PlanExecutor::new(config.project.path.clone()) {
        Ok(_) => println!("Executor: OK"),
        Err(e) => eprintln!("Executor: ERROR ({})", e),
    }

    Ok(())
}

async fn run_plan(summary_path: &Path, output_path: &Path) -> Result<()> {
    let config = Config::load()?;

    let content = std::fs::read_to_string(summary_path)
        .with_context(|| format!("Failed to read task summary at {}", summary_path.display()))?;
    let summary: serde_json::Value =
        serde_json::from_str(&content).context("Task summary is not valid JSON")?;

    let client = llm::create_client(&config)?;
    let planner = TaskPlanner::new(config.project_root()?);
    let plan = planner.plan_task(client.as_ref(), &summary).await?;

    write_json(output_path, &plan)?;
    println!("Plan saved to {}", output_path.display());

    Ok(())
}

async fn run_execute(plan_path: &Path, output_path: &Path) -> Result<()> {
    let config = Config::load()?;

    let content = std::fs::read_to_string(plan_path)
        .with_context(|| format!("Failed to read plan at {}", plan_path.display()))?;
    let plan: planning::Plan =
        serde_json::from_str(&content).context("Plan file is not valid JSON")?;

    let executor = PlanExecutor::new(config.project.path.clone())?;
    let results = executor.execute_plan(&plan).await?;

    write_json(output_path, &results)?;
    println!("Results saved to {}", output_path.display());

    Ok(())
}

/// Pretty-printed UTF-8 JSON; non-ASCII text is written as-is.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
