//! The `FlowMind` facade.
//!
//! Bundles every analysis behind one handle configured once (AI mode,
//! behavior analyzer). Read-only analyses take a snapshot by reference; the
//! few state transitions a caller needs (adding a task, logging an event,
//! activating a workflow) take it mutably and validate their input.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::behavior::{BehaviorAnalyzer, BehaviorReport};
use crate::calendar::{self, DaySummary};
use crate::cognitive_load::{self, CognitiveLoadReport};
use crate::decision_debt::{self, DecisionDebtReport};
use crate::error::{Result, ValidationError};
use crate::events::{Event, EventKind};
use crate::intervention::{self, InterventionDecision, Suggestion, SuggestionKind};
use crate::patterns::{self, Pattern};
use crate::state::AppState;
use crate::stats::{
    self, MomentumFrictionReport, ProductivityReport, Pulse, WorkloadReport, WorkloadSuggestion,
};
use crate::storage::Config;
use crate::task::{classifier, Task, TaskMetadata, TaskStatus};
use crate::workflow::analysis::{self, RebalanceSuggestion, WorkflowReport};
use crate::workflow::{engine as workflow_engine, Variant, Workflow, WorkflowStatus};

/// Heuristic analysis engine.
#[derive(Debug, Clone)]
pub struct FlowMind {
    ai_mode: bool,
    behavior: BehaviorAnalyzer,
}

impl Default for FlowMind {
    fn default() -> Self {
        Self {
            ai_mode: true,
            behavior: BehaviorAnalyzer::default(),
        }
    }
}

impl FlowMind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new().with_ai_mode(config.engine.ai_mode)
    }

    pub fn with_ai_mode(mut self, ai_mode: bool) -> Self {
        self.ai_mode = ai_mode;
        self
    }

    pub fn ai_mode(&self) -> bool {
        self.ai_mode
    }

    // Task classification

    pub fn analyze_task(&self, task: &Task) -> TaskMetadata {
        classifier::analyze_task(task)
    }

    /// Resolve missing metadata according to the configured AI mode.
    pub fn enrich_task(&self, task: &mut Task) {
        classifier::enrich_task(task, self.ai_mode);
    }

    // Read-only analyses

    pub fn analyze_behavior(
        &self,
        history: &[Event],
        raw_tasks: &[Task],
        workflows: &[Workflow],
    ) -> BehaviorReport {
        self.behavior.analyze(history, raw_tasks, workflows)
    }

    pub fn analyze_workflow(&self, workflow: &Workflow, history: &[Event]) -> WorkflowReport {
        analysis::analyze_workflow(workflow, history)
    }

    pub fn assess_cognitive_load(&self, state: &AppState) -> CognitiveLoadReport {
        cognitive_load::assess_cognitive_load(state)
    }

    pub fn should_intervene(&self, state: &AppState) -> InterventionDecision {
        intervention::should_intervene(state)
    }

    pub fn generate_suggestion(&self, kind: SuggestionKind, state: &AppState) -> Suggestion {
        intervention::generate_suggestion(kind, state)
    }

    pub fn generate_workflow(&self, tasks: &[Task], context: &str) -> Workflow {
        workflow_engine::generate_workflow(tasks, context)
    }

    pub fn generate_workflow_variant(&self, workflow: &Workflow, variant: Variant) -> Workflow {
        workflow_engine::generate_workflow_variant(workflow, variant)
    }

    pub fn detect_patterns(&self, state: &AppState) -> Vec<Pattern> {
        patterns::detect_patterns(state)
    }

    pub fn track_decision_debt(&self, state: &AppState) -> DecisionDebtReport {
        decision_debt::track_decision_debt(state)
    }

    pub fn analyze_workload(&self, state: &AppState) -> WorkloadReport {
        stats::analyze_workload(state)
    }

    pub fn generate_workload_suggestions(
        &self,
        state: &AppState,
        analysis: &WorkloadReport,
    ) -> Vec<WorkloadSuggestion> {
        stats::generate_workload_suggestions(state, analysis)
    }

    pub fn analyze_productivity(&self, state: &AppState) -> ProductivityReport {
        stats::analyze_productivity(state)
    }

    pub fn analyze_momentum_friction(&self, state: &AppState) -> MomentumFrictionReport {
        stats::analyze_momentum_friction(state)
    }

    pub fn generate_execution_pulses(&self, state: &AppState) -> Vec<Pulse> {
        stats::generate_execution_pulses(state)
    }

    /// Rebalance hints for the workflow referenced by `activeWorkflow`.
    pub fn generate_rebalance_suggestions(&self, state: &AppState) -> Vec<RebalanceSuggestion> {
        analysis::generate_rebalance_suggestions(state.active_workflow())
    }

    pub fn summarize_day(&self, state: &AppState, date: NaiveDate) -> DaySummary {
        calendar::summarize_day(state, date)
    }

    // State transitions

    /// Create, enrich and append a raw task.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyText`] for blank text.
    pub fn add_task<'a>(
        &self,
        state: &'a mut AppState,
        text: &str,
        context: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&'a Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let mut task = Task::new(Uuid::new_v4().to_string(), text);
        task.context = context
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .or_else(|| state.current_context.clone());
        task.timestamp = Some(now);
        self.enrich_task(&mut task);

        debug!(task_id = %task.id, "task added");
        let index = state.raw_tasks.len();
        state.raw_tasks.push(task);
        Ok(&state.raw_tasks[index])
    }

    /// Append a start, complete or skip event for a known task.
    ///
    /// Completing marks every copy of the task (raw and in workflows) as
    /// completed; skipping bumps its skip counter.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownTask`] if no task has that id.
    pub fn record_task_event(
        &self,
        state: &mut AppState,
        kind: EventKind,
        task_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let task_ref = state
            .raw_tasks
            .iter()
            .chain(state.workflows.iter().flat_map(|w| w.phases.all_tasks()))
            .find(|t| t.id == task_id)
            .map(Task::to_ref)
            .ok_or_else(|| ValidationError::UnknownTask(task_id.to_string()))?;

        let copies = state
            .raw_tasks
            .iter_mut()
            .chain(state.workflows.iter_mut().flat_map(|w| w.phases.all_tasks_mut()))
            .filter(|t| t.id == task_id);
        for task in copies {
            match kind {
                EventKind::TaskComplete => task.status = TaskStatus::Completed,
                EventKind::TaskSkip => task.skip_count += 1,
                _ => {}
            }
        }

        debug!(task_id, kind = ?kind, "event recorded");
        state
            .execution_history
            .push(Event::new(kind, now).with_task(task_ref));
        Ok(())
    }

    /// Generate a workflow from the raw tasks and make it the active one.
    ///
    /// Any workflow still marked active is paused first, so at most one
    /// workflow carries the active status.
    pub fn activate_workflow<'a>(
        &self,
        state: &'a mut AppState,
        context: &str,
        now: DateTime<Utc>,
    ) -> &'a Workflow {
        let mut tasks = state.raw_tasks.clone();
        for task in &mut tasks {
            self.enrich_task(task);
        }
        let workflow = self.generate_workflow(&tasks, context);

        for previous in state.workflows.iter_mut().filter(|w| w.is_active()) {
            debug!(workflow_id = %previous.id, "pausing previously active workflow");
            previous.status = WorkflowStatus::Paused;
        }
        state.active_workflow = Some(workflow.id.clone());
        state
            .execution_history
            .push(Event::new(EventKind::WorkflowCreated, now));

        let index = state.workflows.len();
        state.workflows.push(workflow);
        &state.workflows[index]
    }

    /// Re-split the active workflow in place using `variant`.
    ///
    /// # Errors
    /// Returns [`ValidationError::NoActiveWorkflow`] when none is set.
    pub fn apply_variant<'a>(&self, state: &'a mut AppState, variant: Variant) -> Result<&'a Workflow> {
        let workflow = state
            .active_workflow_mut()
            .ok_or(ValidationError::NoActiveWorkflow)?;
        *workflow = workflow_engine::generate_workflow_variant(workflow, variant);
        debug!(workflow_id = %workflow.id, %variant, "variant applied");
        Ok(workflow)
    }

    /// Summarize `date` and store the record in the calendar data.
    pub fn record_day(&self, state: &mut AppState, date: NaiveDate) -> DaySummary {
        calendar::record_day(state, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap()
    }

    #[test]
    fn add_task_enriches_and_inherits_context() {
        let engine = FlowMind::new();
        let mut state = AppState {
            current_context: Some("work".into()),
            ..AppState::default()
        };
        let task = engine
            .add_task(&mut state, "  Write the weekly report  ", None, now())
            .unwrap();
        assert_eq!(task.text, "Write the weekly report");
        assert_eq!(task.context.as_deref(), Some("work"));
        assert!(task.metadata.is_some());
        assert_eq!(task.timestamp, Some(now()));
    }

    #[test]
    fn add_task_without_ai_mode_uses_neutral_metadata() {
        let engine = FlowMind::new().with_ai_mode(false);
        let mut state = AppState::default();
        let task = engine.add_task(&mut state, "maybe?", None, now()).unwrap();
        assert_eq!(task.metadata, Some(TaskMetadata::neutral()));
    }

    #[test]
    fn add_task_rejects_blank_text() {
        let engine = FlowMind::new();
        let err = engine
            .add_task(&mut AppState::default(), "   ", None, now())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyText)));
    }

    #[test]
    fn completing_updates_every_copy() {
        let engine = FlowMind::new();
        let mut state = AppState {
            raw_tasks: vec![Task::new("t1", "Build the parser").with_context("work")],
            ..AppState::default()
        };
        engine.activate_workflow(&mut state, "", now());
        engine
            .record_task_event(&mut state, EventKind::TaskComplete, "t1", now())
            .unwrap();

        assert!(state.raw_tasks[0].is_completed());
        let workflow = state.active_workflow().unwrap();
        assert!(workflow.phases.all_tasks().all(Task::is_completed));

        let last = state.execution_history.last().unwrap();
        assert_eq!(last.kind, EventKind::TaskComplete);
        assert_eq!(last.task_context(), Some("work"));
    }

    #[test]
    fn unknown_task_event_is_rejected() {
        let engine = FlowMind::new();
        let mut state = AppState::default();
        let err = engine
            .record_task_event(&mut state, EventKind::TaskStart, "nope", now())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownTask(_))
        ));
        assert!(state.execution_history.is_empty());
    }

    #[test]
    fn activate_workflow_logs_creation() {
        let engine = FlowMind::new();
        let mut state = AppState {
            raw_tasks: (0..4).map(|i| Task::new(format!("{i}"), "Write tests")).collect(),
            ..AppState::default()
        };
        let id = engine.activate_workflow(&mut state, "deep-work", now()).id.clone();
        assert_eq!(state.active_workflow.as_deref(), Some(id.as_str()));
        assert_eq!(state.execution_history[0].kind, EventKind::WorkflowCreated);
        assert_eq!(state.active_workflow().map(|w| w.task_count()), Some(4));
    }

    #[test]
    fn reactivating_pauses_the_previous_workflow() {
        let engine = FlowMind::new();
        let mut state = AppState {
            raw_tasks: (0..2).map(|i| Task::new(format!("a{i}"), "Write tests")).collect(),
            ..AppState::default()
        };
        let first = engine.activate_workflow(&mut state, "", now()).id.clone();
        state.raw_tasks = (0..20).map(|i| Task::new(format!("b{i}"), "Write tests")).collect();
        let second = engine.activate_workflow(&mut state, "", now()).id.clone();

        let active: Vec<&str> = state
            .workflows
            .iter()
            .filter(|w| w.is_active())
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(active, vec![second.as_str()]);
        let paused = state.workflows.iter().find(|w| w.id == first).unwrap();
        assert_eq!(paused.status, WorkflowStatus::Paused);

        // Behavior-side load follows the newest workflow: 0.2 * 20 tasks
        state.raw_tasks.clear();
        let report =
            engine.analyze_behavior(&state.execution_history, &state.raw_tasks, &state.workflows);
        assert!((report.cognitive_load.index - 0.4).abs() < 1e-9);
    }

    #[test]
    fn variant_requires_active_workflow() {
        let engine = FlowMind::new();
        let mut state = AppState::default();
        assert!(engine.apply_variant(&mut state, Variant::Quick).is_err());

        state.raw_tasks = (0..10).map(|i| Task::new(format!("{i}"), "Ship")).collect();
        engine.activate_workflow(&mut state, "", now());
        let workflow = engine.apply_variant(&mut state, Variant::Quick).unwrap();
        assert_eq!(workflow.variant, Variant::Quick);
        assert_eq!(workflow.phases.planning.len(), 1);
        assert_eq!(workflow.phases.execution.len(), 7);
    }
}
