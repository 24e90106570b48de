//! Decision debt: unresolved vagueness across raw tasks and workflows.

use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::task::{TaskStatus, VAGUE_CLARITY_THRESHOLD};

/// Task contributing to decision debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtItem {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDebtReport {
    /// Raw tasks with clarity below 0.5
    pub vague_tasks: usize,
    /// Pending workflow tasks whose cached clarity is below 0.5
    pub pending_decisions: usize,
    pub total: usize,
    /// Vague raw tasks first, then pending workflow tasks
    pub items: Vec<DebtItem>,
}

/// Count vague raw tasks and unclear pending tasks in every workflow.
///
/// Workflow tasks only count when they carry metadata; raw tasks fall back
/// to clarity computed from the text.
pub fn track_decision_debt(state: &AppState) -> DecisionDebtReport {
    let vague: Vec<DebtItem> = state
        .raw_tasks
        .iter()
        .filter(|t| t.is_vague())
        .map(|t| DebtItem {
            id: t.id.clone(),
            text: t.text.clone(),
        })
        .collect();

    let pending: Vec<DebtItem> = state
        .workflows
        .iter()
        .flat_map(|w| w.phases.all_tasks())
        .filter(|t| t.status == TaskStatus::Pending)
        .filter(|t| t.metadata.is_some_and(|m| m.clarity < VAGUE_CLARITY_THRESHOLD))
        .map(|t| DebtItem {
            id: t.id.clone(),
            text: t.text.clone(),
        })
        .collect();

    let vague_tasks = vague.len();
    let pending_decisions = pending.len();

    DecisionDebtReport {
        vague_tasks,
        pending_decisions,
        total: vague_tasks + pending_decisions,
        items: vague.into_iter().chain(pending).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Effort, ExecutionType, Task, TaskMetadata};
    use crate::workflow::{Phases, Workflow};

    fn unclear() -> TaskMetadata {
        TaskMetadata {
            clarity: 0.2,
            effort: Effort::Medium,
            execution_type: ExecutionType::Think,
            readiness: 0.1,
        }
    }

    #[test]
    fn empty_state_has_no_debt() {
        assert_eq!(track_decision_debt(&AppState::default()), DecisionDebtReport::default());
    }

    #[test]
    fn counts_raw_and_workflow_debt_in_order() {
        let workflow = Workflow {
            id: "w".into(),
            name: "Plan".into(),
            status: Default::default(),
            phases: Phases {
                planning: vec![
                    Task::new("p1", "Decide on vendor").with_metadata(unclear()),
                    Task::new("p2", "maybe?"),
                ],
                execution: vec![Task::new("e1", "Resolve scope")
                    .with_metadata(unclear())
                    .with_status(TaskStatus::Completed)],
                cooldown: Vec::new(),
            },
            checkpoints: Vec::new(),
            variant: Default::default(),
            context: "focus".into(),
        };
        let state = AppState {
            raw_tasks: vec![
                Task::new("r1", "perhaps look into it?"),
                Task::new("r2", "Write the quarterly report for the finance team"),
            ],
            workflows: vec![workflow],
            ..AppState::default()
        };

        let report = track_decision_debt(&state);
        assert_eq!(report.vague_tasks, 1);
        // p2 has no metadata, e1 is completed
        assert_eq!(report.pending_decisions, 1);
        assert_eq!(report.total, 2);
        let ids: Vec<_> = report.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "p1"]);
    }
}
