//! Per-task classification.
//!
//! [`analyze_task`] combines the text heuristics into a [`TaskMetadata`]
//! record. [`enrich_task`] is the ingestion step that caches that record on
//! the task; it is the only place in the engine that mutates an input.

use tracing::trace;

use super::heuristics::{
    calculate_clarity, calculate_readiness, detect_execution_type, estimate_effort,
};
use super::{Task, TaskMetadata};

/// Compute fresh metadata for a task.
///
/// Clarity, effort and execution type are always derived from the text;
/// readiness reads the task's cached metadata when present.
pub fn analyze_task(task: &Task) -> TaskMetadata {
    TaskMetadata {
        clarity: calculate_clarity(&task.text),
        effort: estimate_effort(&task.text),
        execution_type: detect_execution_type(&task.text),
        readiness: calculate_readiness(task),
    }
}

/// Fill in missing metadata. Existing metadata is left untouched.
///
/// With `ai_mode` off the task receives [`TaskMetadata::neutral`] instead of
/// heuristic scores.
pub fn enrich_task(task: &mut Task, ai_mode: bool) {
    if task.metadata.is_some() {
        return;
    }
    let metadata = if ai_mode {
        analyze_task(task)
    } else {
        TaskMetadata::neutral()
    };
    trace!(task_id = %task.id, clarity = metadata.clarity, effort = %metadata.effort, "task enriched");
    task.metadata = Some(metadata);
}

/// Return a copy of the task with metadata resolved.
pub fn enriched(task: &Task) -> Task {
    let mut copy = task.clone();
    enrich_task(&mut copy, true);
    copy
}
