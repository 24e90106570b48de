//! Long-run behavior patterns.

use serde::{Deserialize, Serialize};

use crate::events::{count_kind, recent, EventKind};
use crate::state::AppState;
use crate::task::ExecutionType;

const WINDOW: usize = 20;
const EXECUTION_IMPROVEMENT_RATE: f64 = 0.5;
const THINK_OVERLOAD_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Completion rate is high after organizing
    ExecutionImprovement,
    /// Most raw tasks are think tasks
    ThinkOverload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub text: String,
    /// The ratio that triggered the pattern
    pub confidence: f64,
}

/// Detect patterns over the last 20 events and the raw task list.
pub fn detect_patterns(state: &AppState) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    let window = recent(&state.execution_history, WINDOW);
    if let Some(index) = window.iter().rposition(|e| e.kind.is_organize()) {
        let after = &window[index..];
        let rate = count_kind(after, EventKind::TaskComplete) as f64 / after.len().max(1) as f64;
        if rate > EXECUTION_IMPROVEMENT_RATE {
            patterns.push(Pattern {
                kind: PatternKind::ExecutionImprovement,
                text: "You execute better after organising".to_string(),
                confidence: rate,
            });
        }
    }

    let total = state.raw_tasks.len();
    if total > 0 {
        let think = state
            .raw_tasks
            .iter()
            .filter(|t| t.execution_type() == ExecutionType::Think)
            .count();
        if think as f64 > total as f64 * THINK_OVERLOAD_RATIO {
            patterns.push(Pattern {
                kind: PatternKind::ThinkOverload,
                text: "Too many Think tasks reduce completion".to_string(),
                confidence: think as f64 / total as f64,
            });
        }
    }

    patterns
}
