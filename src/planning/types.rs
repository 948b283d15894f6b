//! Core types for the plan/execute pipeline

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A plan produced by the planner: an ordered sequence of phases.
///
/// A plan document missing the `domain_phases` key deserializes to zero
/// phases. Any other model-supplied fields are preserved through the
/// flattened map so a plan round-trips losslessly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub domain_phases: Vec<Phase>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One executable step inside a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Phase number, for traceability only (not necessarily sequential or unique)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<i64>,

    /// Shell command to run; phases without one are skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,

    /// Other model-supplied fields, ignored by the executor but preserved
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Captured outcome of running one phase's command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub no: Option<i64>,
    pub exec: String,
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_domain_phases_means_empty_plan() {
        let plan: Plan = serde_json::from_str("{}").unwrap();
        assert!(plan.domain_phases.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let doc = json!({
            "domain_phases": [
                {"no": 1, "exec": "echo hi", "title": "greet", "owner": "ai"}
            ],
            "summary": "a one-phase plan"
        });

        let plan: Plan = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(plan.domain_phases.len(), 1);
        assert_eq!(plan.extra["summary"], json!("a one-phase plan"));
        assert_eq!(plan.domain_phases[0].extra["title"], json!("greet"));

        let round_tripped = serde_json::to_value(&plan).unwrap();
        assert_eq!(round_tripped, doc);
    }

    #[test]
    fn test_non_ascii_round_trip() {
        let doc = json!({
            "domain_phases": [
                {"no": 1, "exec": "echo 'タスク完了'", "説明": "日本語のフィールド"}
            ]
        });

        let plan: Plan = serde_json::from_value(doc.clone()).unwrap();
        let text = serde_json::to_string_pretty(&plan).unwrap();
        assert!(text.contains("タスク完了"));
        assert!(text.contains("日本語のフィールド"));

        let reparsed: Plan = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, plan);
    }

    #[test]
    fn test_phase_without_exec() {
        let phase: Phase = serde_json::from_value(json!({"no": 3})).unwrap();
        assert_eq!(phase.no, Some(3));
        assert!(phase.exec.is_none());
    }
}
