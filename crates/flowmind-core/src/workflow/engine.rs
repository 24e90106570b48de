//! Workflow generation.
//!
//! Tasks are split by position into planning, execution and cooldown using
//! ceil-based counts. Planning and execution counts are computed
//! independently from the total, so for small task lists they can add up to
//! more than the total; cooldown then receives whatever is left (possibly
//! nothing). Every input task lands in exactly one phase.

use tracing::debug;
use uuid::Uuid;

use super::{Checkpoint, Phase, PhaseRatios, Phases, Variant, Workflow, WorkflowStatus};
use crate::task::classifier::enrich_task;
use crate::task::{Task, TaskStatus};

/// Context used when the caller supplies none.
pub const DEFAULT_CONTEXT: &str = "focus";

/// Name given to generated workflows.
pub const DEFAULT_WORKFLOW_NAME: &str = "Today's Workflow";

/// Execution phases longer than this get a midpoint checkpoint.
const CHECKPOINT_MIN_EXECUTION_TASKS: usize = 5;

const CHECKPOINT_QUESTION: &str = "Should we continue or adjust?";

/// Split tasks by position according to phase ratios.
fn split_tasks(tasks: Vec<Task>, ratios: PhaseRatios) -> Phases {
    let total = tasks.len() as f64;
    let planning_count = (total * ratios.planning).ceil() as usize;
    let execution_count = (total * ratios.execution).ceil() as usize;

    let mut phases = Phases::default();
    for (index, task) in tasks.into_iter().enumerate() {
        let phase = if index < planning_count {
            Phase::Planning
        } else if index < planning_count + execution_count {
            Phase::Execution
        } else {
            Phase::Cooldown
        };
        phases.get_mut(phase).push(task);
    }
    phases
}

/// Build a new active workflow from an ordered task list.
///
/// Every task is reset to pending and receives metadata if it has none.
pub fn generate_workflow(tasks: &[Task], context: &str) -> Workflow {
    let prepared: Vec<Task> = tasks
        .iter()
        .cloned()
        .map(|mut task| {
            task.status = TaskStatus::Pending;
            enrich_task(&mut task, true);
            task
        })
        .collect();

    let phases = split_tasks(prepared, Variant::Default.ratios());
    let checkpoints = generate_checkpoints(&phases);

    debug!(
        planning = phases.planning.len(),
        execution = phases.execution.len(),
        cooldown = phases.cooldown.len(),
        checkpoints = checkpoints.len(),
        "workflow generated"
    );

    let context = if context.trim().is_empty() {
        DEFAULT_CONTEXT.to_string()
    } else {
        context.to_string()
    };

    Workflow {
        id: Uuid::new_v4().to_string(),
        name: DEFAULT_WORKFLOW_NAME.to_string(),
        status: WorkflowStatus::Active,
        phases,
        checkpoints,
        variant: Variant::Default,
        context,
    }
}

/// Insert a midpoint checkpoint into long execution phases.
pub fn generate_checkpoints(phases: &Phases) -> Vec<Checkpoint> {
    let execution_tasks = phases.execution.len();
    if execution_tasks <= CHECKPOINT_MIN_EXECUTION_TASKS {
        return Vec::new();
    }

    vec![Checkpoint {
        id: Uuid::new_v4().to_string(),
        phase: Phase::Execution,
        position: execution_tasks / 2,
        question: CHECKPOINT_QUESTION.to_string(),
        inserted: true,
    }]
}

/// Re-split a workflow's tasks using a variant preset.
///
/// Tasks are flattened in phase order before re-splitting. All other fields
/// (id, name, status, checkpoints, context) are preserved. `Variant::Default`
/// re-splits with the deep preset.
pub fn generate_workflow_variant(workflow: &Workflow, variant: Variant) -> Workflow {
    let variant = variant.preset();
    let tasks = workflow.phases.clone().into_tasks();
    let phases = split_tasks(tasks, variant.ratios());

    debug!(
        workflow_id = %workflow.id,
        variant = %variant,
        planning = phases.planning.len(),
        execution = phases.execution.len(),
        cooldown = phases.cooldown.len(),
        "workflow variant generated"
    );

    Workflow {
        phases,
        variant,
        ..workflow.clone()
    }
}
