//! Intervention decisions: whether to interrupt the user, and with what.
//!
//! Checks run in a fixed priority order and the first match wins:
//! 1. Cognitive overload (state-level load is high)
//! 2. Stall detected in the recent history
//! 3. Mode switching with a switch frequency above 0.5

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::behavior::BehaviorAnalyzer;
use crate::cognitive_load::{assess_cognitive_load, LoadLevel};
use crate::state::AppState;
use crate::task::count_vague;

const MODE_SWITCH_FREQUENCY: f64 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InterventionReason {
    CognitiveOverload,
    StallDetected,
    ModeSwitching,
}

impl fmt::Display for InterventionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterventionReason::CognitiveOverload => write!(f, "cognitive_overload"),
            InterventionReason::StallDetected => write!(f, "stall_detected"),
            InterventionReason::ModeSwitching => write!(f, "mode_switching"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InterventionPriority {
    High,
    Medium,
    Low,
}

/// Canned suggestion templates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    #[default]
    Organize,
    Simplify,
    Focus,
    Checkpoint,
}

impl SuggestionKind {
    /// Parse a suggestion name; unknown names fall back to organize.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "simplify" => SuggestionKind::Simplify,
            "focus" => SuggestionKind::Focus,
            "checkpoint" => SuggestionKind::Checkpoint,
            _ => SuggestionKind::Organize,
        }
    }
}

/// Live counts attached to a suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vague_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub action: SuggestionKind,
    pub data: SuggestionData,
}

/// Outcome of [`should_intervene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionDecision {
    pub should: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<InterventionReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<InterventionPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl InterventionDecision {
    pub fn none() -> Self {
        Self {
            should: false,
            reason: None,
            priority: None,
            suggestion: None,
        }
    }

    fn intervene(
        reason: InterventionReason,
        priority: InterventionPriority,
        suggestion: Suggestion,
    ) -> Self {
        Self {
            should: true,
            reason: Some(reason),
            priority: Some(priority),
            suggestion: Some(suggestion),
        }
    }
}

/// Decide whether to interrupt the user.
pub fn should_intervene(state: &AppState) -> InterventionDecision {
    let load = assess_cognitive_load(state);
    if load.level == LoadLevel::High {
        debug!(index = load.index, "intervening on cognitive overload");
        return InterventionDecision::intervene(
            InterventionReason::CognitiveOverload,
            InterventionPriority::High,
            generate_suggestion(SuggestionKind::Organize, state),
        );
    }

    let behavior = BehaviorAnalyzer::new().analyze(
        &state.execution_history,
        &state.raw_tasks,
        &state.workflows,
    );

    if behavior.stall_detection.detected {
        debug!(skips = behavior.stall_detection.duration, "intervening on stall");
        return InterventionDecision::intervene(
            InterventionReason::StallDetected,
            InterventionPriority::Medium,
            generate_suggestion(SuggestionKind::Simplify, state),
        );
    }

    let switching = &behavior.mode_switching;
    if switching.detected && switching.frequency > MODE_SWITCH_FREQUENCY {
        debug!(frequency = switching.frequency, "intervening on mode switching");
        return InterventionDecision::intervene(
            InterventionReason::ModeSwitching,
            InterventionPriority::Low,
            generate_suggestion(SuggestionKind::Focus, state),
        );
    }

    InterventionDecision::none()
}

/// Build a canned suggestion filled with live counts from the snapshot.
pub fn generate_suggestion(kind: SuggestionKind, state: &AppState) -> Suggestion {
    let (text, data) = match kind {
        SuggestionKind::Organize => (
            "Consider organising tasks to reduce cognitive load",
            SuggestionData {
                task_count: Some(state.raw_tasks.len()),
                ..SuggestionData::default()
            },
        ),
        SuggestionKind::Simplify => (
            "Some tasks may need simplification",
            SuggestionData {
                vague_count: Some(count_vague(&state.raw_tasks)),
                ..SuggestionData::default()
            },
        ),
        SuggestionKind::Focus => ("Frequent mode switching detected", SuggestionData::default()),
        SuggestionKind::Checkpoint => (
            "Consider adding a workflow checkpoint",
            SuggestionData::default(),
        ),
    };

    Suggestion {
        text: text.to_string(),
        action: kind,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventKind, TaskRef};
    use crate::task::Task;
    use chrono::{Duration, TimeZone, Utc};

    fn skips(n: usize) -> Vec<Event> {
        let base = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        (0..n)
            .map(|i| Event::new(EventKind::TaskSkip, base + Duration::minutes(i as i64)))
            .collect()
    }

    #[test]
    fn quiet_state_does_not_intervene() {
        let decision = should_intervene(&AppState::default());
        assert_eq!(decision, InterventionDecision::none());
        assert_eq!(serde_json::to_string(&decision).unwrap(), r#"{"should":false}"#);
    }

    #[test]
    fn stall_triggers_medium_priority() {
        let state = AppState {
            execution_history: skips(5),
            ..AppState::default()
        };
        let decision = should_intervene(&state);
        assert_eq!(decision.reason, Some(InterventionReason::StallDetected));
        assert_eq!(decision.priority, Some(InterventionPriority::Medium));
        assert_eq!(
            decision.suggestion.map(|s| s.action),
            Some(SuggestionKind::Simplify)
        );
    }

    #[test]
    fn mode_switching_needs_high_frequency() {
        let base = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let history: Vec<Event> = ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, ctx)| {
                Event::new(EventKind::TaskStart, base + Duration::minutes(i as i64)).with_task(
                    TaskRef {
                        id: format!("t{i}"),
                        text: None,
                        context: Some((*ctx).to_string()),
                    },
                )
            })
            .collect();
        let state = AppState {
            execution_history: history,
            ..AppState::default()
        };
        let decision = should_intervene(&state);
        assert_eq!(decision.reason, Some(InterventionReason::ModeSwitching));
        assert_eq!(decision.priority, Some(InterventionPriority::Low));
    }

    #[test]
    fn unknown_suggestion_defaults_to_organize() {
        assert_eq!(SuggestionKind::from_name("reflect"), SuggestionKind::Organize);
        assert_eq!(SuggestionKind::from_name("Focus"), SuggestionKind::Focus);

        let state = AppState {
            raw_tasks: vec![Task::new("1", "maybe?"), Task::new("2", "x")],
            ..AppState::default()
        };
        let organize = generate_suggestion(SuggestionKind::from_name("???"), &state);
        assert_eq!(organize.data.task_count, Some(2));
        let simplify = generate_suggestion(SuggestionKind::Simplify, &state);
        assert_eq!(simplify.data.vague_count, Some(2));
    }
}
