//! Daily completion summaries stored in the snapshot's calendar data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::task::Task;

/// One calendar day's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub context: Option<String>,
    /// Name of the active workflow, if any
    #[serde(default)]
    pub workflow: Option<String>,
    /// Completed over total tasks (0.0 when there are none)
    #[serde(default)]
    pub completion: f64,
    #[serde(default)]
    pub summary: String,
}

/// Calendar key for a date (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Summarize the active workflow's tasks, or the raw tasks when no workflow
/// is active.
pub fn summarize_day(state: &AppState, date: NaiveDate) -> DaySummary {
    let workflow = state.active_workflow();
    let tasks: Vec<&Task> = match workflow {
        Some(w) => w.phases.all_tasks().collect(),
        None => state.raw_tasks.iter().collect(),
    };

    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    let completion = if total > 0 {
        completed as f64 / total as f64
    } else {
        0.0
    };

    DaySummary {
        date: Some(date),
        context: state.current_context.clone(),
        workflow: workflow.map(|w| w.name.clone()),
        completion,
        summary: format!("{completed} of {total} tasks completed"),
    }
}

/// Summarize `date` and store the record in the snapshot's calendar data.
pub fn record_day(state: &mut AppState, date: NaiveDate) -> DaySummary {
    let summary = summarize_day(state, date);
    state.calendar_data.insert(date_key(date), summary.clone());
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use crate::workflow::engine::generate_workflow;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    #[test]
    fn empty_day() {
        let summary = summarize_day(&AppState::default(), day());
        assert_eq!(summary.completion, 0.0);
        assert_eq!(summary.summary, "0 of 0 tasks completed");
        assert!(summary.workflow.is_none());
    }

    #[test]
    fn raw_tasks_without_workflow() {
        let state = AppState {
            raw_tasks: vec![
                Task::new("1", "a").with_status(TaskStatus::Completed),
                Task::new("2", "b"),
                Task::new("3", "c"),
                Task::new("4", "d").with_status(TaskStatus::Completed),
            ],
            current_context: Some("work".into()),
            ..AppState::default()
        };
        let summary = summarize_day(&state, day());
        assert_eq!(summary.completion, 0.5);
        assert_eq!(summary.summary, "2 of 4 tasks completed");
        assert_eq!(summary.context.as_deref(), Some("work"));
    }

    #[test]
    fn active_workflow_replaces_raw_tasks() {
        let mut workflow = generate_workflow(&[Task::new("w1", "Ship"), Task::new("w2", "Test")], "");
        workflow.phases.all_tasks_mut().take(1).for_each(|t| t.status = TaskStatus::Completed);
        let mut state = AppState {
            raw_tasks: vec![Task::new("r", "raw")],
            active_workflow: Some(workflow.id.clone()),
            workflows: vec![workflow],
            ..AppState::default()
        };
        let summary = record_day(&mut state, day());
        assert_eq!(summary.workflow.as_deref(), Some("Today's Workflow"));
        assert_eq!(summary.summary, "1 of 2 tasks completed");
        assert_eq!(state.calendar_data.get("2024-02-29"), Some(&summary));
    }

    #[test]
    fn ui_record_without_date_deserializes() {
        let summary: DaySummary = serde_json::from_str(
            r#"{"context":null,"workflow":null,"completion":0,"summary":"0 of 0 tasks completed"}"#,
        )
        .unwrap();
        assert!(summary.date.is_none());
    }
}
