//! Workflow usage and effectiveness analysis against the execution history.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Phase, Workflow};
use crate::events::{Event, EventKind};

/// Execution phases longer than this trigger a rebalance suggestion.
const REBALANCE_EXECUTION_LIMIT: usize = 8;

/// Deviation from the planned phase order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    /// Work touched a later phase before an earlier one
    PhaseSkip,
}

/// Combined workflow metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowReport {
    /// Fraction of workflow tasks referenced by the history (0.0 to 1.0)
    pub usage: f64,
    pub deviations: Vec<Deviation>,
    /// Completion/time blend (0.0 to 1.0)
    pub effectiveness: f64,
}

/// Rebalancing hint for the active workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceSuggestion {
    pub text: String,
    pub action: RebalanceAction,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceAction {
    Adjust,
    None,
}

/// Compute usage, deviations and effectiveness in one pass over the inputs.
pub fn analyze_workflow(workflow: &Workflow, history: &[Event]) -> WorkflowReport {
    WorkflowReport {
        usage: calculate_workflow_usage(workflow, history),
        deviations: detect_deviations(workflow, history),
        effectiveness: calculate_effectiveness(workflow, history),
    }
}

fn task_ids(workflow: &Workflow) -> HashSet<&str> {
    workflow.phases.all_tasks().map(|t| t.id.as_str()).collect()
}

/// Distinct workflow task ids seen in any history event, over the task count.
pub fn calculate_workflow_usage(workflow: &Workflow, history: &[Event]) -> f64 {
    let ids = task_ids(workflow);
    if ids.is_empty() {
        return 0.0;
    }
    let seen: HashSet<&str> = history
        .iter()
        .filter_map(Event::task_id)
        .filter(|id| ids.contains(id))
        .collect();
    seen.len() as f64 / ids.len() as f64
}

/// Detect out-of-order phase execution.
///
/// Phases are recorded in first-touch order as start/complete events are
/// walked; if that sequence is not non-decreasing in canonical phase order,
/// a [`Deviation::PhaseSkip`] is reported.
pub fn detect_deviations(workflow: &Workflow, history: &[Event]) -> Vec<Deviation> {
    let mut executed: Vec<Phase> = Vec::with_capacity(Phase::ORDER.len());

    for event in history.iter().filter(|e| e.kind.is_execution()) {
        let Some(task_id) = event.task_id() else {
            continue;
        };
        for phase in workflow.phases.phases_containing(task_id) {
            if !executed.contains(&phase) {
                executed.push(phase);
            }
        }
    }

    let out_of_order = executed
        .windows(2)
        .any(|pair| pair[1].index() < pair[0].index());

    if out_of_order {
        vec![Deviation::PhaseSkip]
    } else {
        Vec::new()
    }
}

/// Mean minutes between consecutive completions of workflow tasks.
///
/// Returns 0.0 when fewer than two completions are recorded.
pub fn average_completion_minutes(workflow: &Workflow, history: &[Event]) -> f64 {
    let ids = task_ids(workflow);
    let completions: Vec<&Event> = history
        .iter()
        .filter(|e| e.kind == EventKind::TaskComplete)
        .filter(|e| e.task_id().is_some_and(|id| ids.contains(id)))
        .collect();

    if completions.len() < 2 {
        return 0.0;
    }

    let gaps: Vec<f64> = completions
        .windows(2)
        .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 60_000.0)
        .collect();
    gaps.iter().sum::<f64>() / gaps.len() as f64
}

/// `completion_rate * 0.7 + time_score * 0.3`; 0.0 for an empty workflow.
pub fn calculate_effectiveness(workflow: &Workflow, history: &[Event]) -> f64 {
    let Some(completion_rate) = workflow.completion_ratio() else {
        return 0.0;
    };

    let avg_minutes = average_completion_minutes(workflow, history);
    let time_score = if avg_minutes > 0.0 {
        (1.0 / (avg_minutes / 60.0)).min(1.0)
    } else {
        0.5
    };

    completion_rate * 0.7 + time_score * 0.3
}

/// Suggest rebalancing when the execution phase is overcrowded.
pub fn generate_rebalance_suggestions(workflow: Option<&Workflow>) -> Vec<RebalanceSuggestion> {
    let mut suggestions = Vec::new();

    if let Some(workflow) = workflow {
        if workflow.phases.execution.len() > REBALANCE_EXECUTION_LIMIT {
            suggestions.push(RebalanceSuggestion {
                text: "Execution phase has many tasks. Consider splitting or moving some to cooldown."
                    .to_string(),
                action: RebalanceAction::Adjust,
            });
        }
    }

    if suggestions.is_empty() {
        suggestions.push(RebalanceSuggestion {
            text: "Workflow is well balanced. Continue as planned.".to_string(),
            action: RebalanceAction::None,
        });
    }

    suggestions
}
