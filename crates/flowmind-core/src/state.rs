//! Application state snapshot consumed by the analysis engine.
//!
//! The UI layer owns the live state; the engine only ever receives a
//! snapshot. Field names follow the UI's JSON export (camelCase).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::DaySummary;
use crate::events::Event;
use crate::task::Task;
use crate::workflow::Workflow;

/// Read-only snapshot of application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub raw_tasks: Vec<Task>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
    /// Id of the workflow the user is currently following
    #[serde(default)]
    pub active_workflow: Option<String>,
    #[serde(default)]
    pub execution_history: Vec<Event>,
    /// Daily summaries keyed by `YYYY-MM-DD`
    #[serde(default)]
    pub calendar_data: BTreeMap<String, DaySummary>,
    #[serde(default)]
    pub current_context: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The workflow referenced by `active_workflow`, whatever its status.
    pub fn active_workflow(&self) -> Option<&Workflow> {
        let id = self.active_workflow.as_deref()?;
        self.workflows.iter().find(|w| w.id == id)
    }

    pub fn active_workflow_mut(&mut self) -> Option<&mut Workflow> {
        let id = self.active_workflow.clone()?;
        self.workflows.iter_mut().find(|w| w.id == id)
    }

    /// The first workflow whose status is active.
    pub fn first_workflow_with_active_status(&self) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.is_active())
    }

    /// Raw tasks plus active-workflow tasks, deduplicated by id.
    ///
    /// The first occurrence of an id wins, so a raw task shadows its copy
    /// inside the workflow.
    pub fn unique_tasks(&self) -> Vec<&Task> {
        let mut seen = std::collections::HashSet::new();
        let workflow_tasks = self
            .active_workflow()
            .into_iter()
            .flat_map(|w| w.phases.all_tasks());

        self.raw_tasks
            .iter()
            .chain(workflow_tasks)
            .filter(|task| seen.insert(task.id.as_str()))
            .collect()
    }

    /// Find a task by id among raw tasks and all workflows.
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.raw_tasks.iter().any(|t| t.id == task_id)
            || self.workflows.iter().any(|w| w.phases.contains(task_id))
    }
}
