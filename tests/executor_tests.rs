use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;

use taskpilot::planning::{Plan, PlanExecutor};

fn plan_from(value: serde_json::Value) -> Plan {
    serde_json::from_value(value).expect("test plan should deserialize")
}

fn executor_in(dir: &TempDir) -> PlanExecutor {
    PlanExecutor::new(Some(dir.path().to_path_buf())).expect("executor should construct")
}

#[tokio::test]
async fn test_records_stdout_and_exit_code() -> Result<()> {
    let dir = TempDir::new()?;
    let executor = executor_in(&dir);

    let plan = plan_from(json!({
        "domain_phases": [{"no": 1, "exec": "echo hello"}]
    }));

    let results = executor.execute_plan(&plan).await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].no, Some(1));
    assert_eq!(results[0].exec, "echo hello");
    assert_eq!(results[0].stdout, "hello\n");
    assert_eq!(results[0].stderr, "");
    assert_eq!(results[0].returncode, 0);

    Ok(())
}

#[tokio::test]
async fn test_failing_phase_does_not_block_later_phases() -> Result<()> {
    let dir = TempDir::new()?;
    let executor = executor_in(&dir);

    let plan = plan_from(json!({
        "domain_phases": [
            {"no": 1, "exec": "exit 1"},
            {"no": 2, "exec": "echo ok"}
        ]
    }));

    let results = executor.execute_plan(&plan).await?;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].returncode, 1);
    assert_eq!(results[1].stdout, "ok\n");
    assert_eq!(results[1].returncode, 0);

    Ok(())
}

#[tokio::test]
async fn test_phases_without_exec_are_skipped() -> Result<()> {
    let dir = TempDir::new()?;
    let executor = executor_in(&dir);

    let plan = plan_from(json!({
        "domain_phases": [
            {"no": 1, "title": "review only"},
            {"no": 2, "exec": "echo here"},
            {"no": 3, "exec": ""}
        ]
    }));

    let results = executor.execute_plan(&plan).await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].no, Some(2));
    assert_eq!(results[0].stdout, "here\n");

    Ok(())
}

#[tokio::test]
async fn test_empty_plan_returns_empty_results() -> Result<()> {
    let dir = TempDir::new()?;
    let executor = executor_in(&dir);

    let plan = plan_from(json!({}));
    let results = executor.execute_plan(&plan).await?;
    assert!(results.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_stderr_is_captured_separately() -> Result<()> {
    let dir = TempDir::new()?;
    let executor = executor_in(&dir);

    let plan = plan_from(json!({
        "domain_phases": [{"no": 1, "exec": "echo oops >&2"}]
    }));

    let results = executor.execute_plan(&plan).await?;

    assert_eq!(results[0].stdout, "");
    assert_eq!(results[0].stderr, "oops\n");
    assert_eq!(results[0].returncode, 0);

    Ok(())
}

#[tokio::test]
async fn test_phases_share_a_working_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let executor = executor_in(&dir);

    // Phase 2 depends on a file phase 1 leaves behind
    let plan = plan_from(json!({
        "domain_phases": [
            {"no": 1, "exec": "printf 'from phase one' > handoff.txt"},
            {"no": 2, "exec": "cat handoff.txt"}
        ]
    }));

    let results = executor.execute_plan(&plan).await?;

    assert_eq!(results.len(), 2);
    assert_eq!(results[1].stdout, "from phase one");
    assert!(dir.path().join("handoff.txt").exists());

    Ok(())
}

#[tokio::test]
async fn test_results_preserve_phase_order() -> Result<()> {
    let dir = TempDir::new()?;
    let executor = executor_in(&dir);

    // Phase numbers are traceability only; order comes from the sequence
    let plan = plan_from(json!({
        "domain_phases": [
            {"no": 7, "exec": "echo first"},
            {"no": 3, "exec": "echo second"},
            {"no": 7, "exec": "echo third"}
        ]
    }));

    let results = executor.execute_plan(&plan).await?;

    let stdouts: Vec<&str> = results.iter().map(|r| r.stdout.as_str()).collect();
    assert_eq!(stdouts, vec!["first\n", "second\n", "third\n"]);
    assert_eq!(results[0].no, Some(7));
    assert_eq!(results[1].no, Some(3));

    Ok(())
}

#[tokio::test]
async fn test_invalid_working_dir_is_fatal() -> Result<()> {
    let executor = PlanExecutor::new(Some("/nonexistent/taskpilot-test-dir".into()))?;

    let plan = plan_from(json!({
        "domain_phases": [{"no": 1, "exec": "echo hi"}]
    }));

    let err = executor.execute_plan(&plan).await.unwrap_err();
    assert!(err.to_string().contains("Failed to spawn command"));

    Ok(())
}
