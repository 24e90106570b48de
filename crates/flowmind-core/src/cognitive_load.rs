//! Cognitive load assessment over the whole application state.
//!
//! Load blends the raw task count, the size of the active workflow and the
//! number of vague tasks. The assessment here looks the active workflow up
//! by id and buckets on the normalized index; the behavior-side variant in
//! [`crate::behavior`] buckets on the raw load instead.

use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::task::{count_vague, Task};

/// Index above which the load counts as high.
pub const OVERLOAD_THRESHOLD: f64 = 0.7;

const MEDIUM_THRESHOLD: f64 = 0.4;

/// More raw tasks than this triggers `too_many_tasks`.
const TOO_MANY_TASKS: usize = 10;

/// More vague tasks than this triggers `vague_tasks`.
pub(crate) const VAGUE_TASK_TRIGGER: usize = 3;

/// More workflow tasks than this triggers `large_workflow`.
const LARGE_WORKFLOW_TASKS: usize = 15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    Low,
    Medium,
    High,
}

/// Condition contributing to high cognitive load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadTrigger {
    TooManyTasks,
    VagueTasks,
    LargeWorkflow,
}

/// State-level cognitive load assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveLoadReport {
    /// Normalized load (0.0 to 1.0)
    pub index: f64,
    pub level: LoadLevel,
    pub triggers: Vec<LoadTrigger>,
    /// Index at which intervention is warranted
    pub threshold: f64,
}

/// Weighted load from task counts: `0.3*raw + 0.2*workflow + 0.5*vague`.
pub(crate) fn weighted_load(raw_tasks: &[Task], workflow_tasks: usize) -> f64 {
    raw_tasks.len() as f64 * 0.3 + workflow_tasks as f64 * 0.2 + count_vague(raw_tasks) as f64 * 0.5
}

/// Assess cognitive load for a snapshot.
pub fn assess_cognitive_load(state: &AppState) -> CognitiveLoadReport {
    let workflow_tasks = state.active_workflow().map_or(0, |w| w.task_count());
    let index = (weighted_load(&state.raw_tasks, workflow_tasks) / 10.0).min(1.0);

    let level = if index > OVERLOAD_THRESHOLD {
        LoadLevel::High
    } else if index > MEDIUM_THRESHOLD {
        LoadLevel::Medium
    } else {
        LoadLevel::Low
    };

    CognitiveLoadReport {
        index,
        level,
        triggers: identify_triggers(state),
        threshold: OVERLOAD_THRESHOLD,
    }
}

/// Load triggers in fixed order: too many tasks, vague tasks, large workflow.
pub fn identify_triggers(state: &AppState) -> Vec<LoadTrigger> {
    let mut triggers = Vec::new();

    if state.raw_tasks.len() > TOO_MANY_TASKS {
        triggers.push(LoadTrigger::TooManyTasks);
    }
    if count_vague(&state.raw_tasks) > VAGUE_TASK_TRIGGER {
        triggers.push(LoadTrigger::VagueTasks);
    }
    if state
        .active_workflow()
        .is_some_and(|w| w.task_count() > LARGE_WORKFLOW_TASKS)
    {
        triggers.push(LoadTrigger::LargeWorkflow);
    }

    triggers
}
