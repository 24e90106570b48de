//! Productivity score over the recent execution history.

use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorAnalyzer;
use crate::events::{recent, WindowCounts};
use crate::state::AppState;
use crate::task::Task;

/// Number of most recent events examined.
const WINDOW: usize = 15;

/// History shorter than this yields the neutral report.
const MIN_HISTORY: usize = 3;

/// Clarity assumed for tasks without cached metadata.
const DEFAULT_CLARITY: f64 = 0.5;

const MODE_SWITCH_PENALTY: f64 = 0.1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductivityLevel {
    Low,
    Stable,
    High,
    Peak,
}

impl ProductivityLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 0.4 {
            ProductivityLevel::Low
        } else if score < 0.65 {
            ProductivityLevel::Stable
        } else if score < 0.85 {
            ProductivityLevel::High
        } else {
            ProductivityLevel::Peak
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            ProductivityLevel::Low => {
                "Low productivity. High skip rate or low completion. Consider simplifying tasks."
            }
            ProductivityLevel::Stable => "Stable productivity. Consistent execution pattern.",
            ProductivityLevel::High => {
                "High productivity. Strong completion rate and workflow adherence."
            }
            ProductivityLevel::Peak => {
                "Peak productivity. Excellent execution with high clarity and completion."
            }
        }
    }
}

/// Inputs that went into the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityComponents {
    pub completion_rate: f64,
    pub skip_rate: f64,
    pub adherence: f64,
    pub avg_clarity: f64,
    pub mode_switch_penalty: f64,
}

/// Productivity analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityReport {
    /// Composite score (0.0 to 1.0)
    pub score: f64,
    pub level: ProductivityLevel,
    pub explanation: String,
    /// `None` when there was not enough history to score
    pub components: Option<ProductivityComponents>,
}

impl ProductivityReport {
    /// Report used until enough history exists.
    pub fn neutral() -> Self {
        Self {
            score: 0.5,
            level: ProductivityLevel::Stable,
            explanation: "Not enough data yet. Continue working to see productivity analysis."
                .to_string(),
            components: None,
        }
    }
}

/// Mean cached clarity; tasks without metadata count as 0.5.
fn average_cached_clarity(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return DEFAULT_CLARITY;
    }
    let sum: f64 = tasks
        .iter()
        .map(|t| t.metadata.map_or(DEFAULT_CLARITY, |m| m.clarity))
        .sum();
    sum / tasks.len() as f64
}

/// Score recent execution:
/// `0.4*completion + 0.3*adherence + 0.2*clarity + 0.1*(1 - skips) - penalty`.
pub fn analyze_productivity(state: &AppState) -> ProductivityReport {
    let history = &state.execution_history;
    if history.len() < MIN_HISTORY {
        return ProductivityReport::neutral();
    }

    let counts = WindowCounts::of(recent(history, WINDOW));
    let completion_rate = counts.completes as f64 / counts.divisor();
    let skip_rate = counts.skips as f64 / counts.divisor();

    let adherence = state
        .active_workflow()
        .and_then(|w| w.completion_ratio())
        .unwrap_or(0.5);

    let avg_clarity = average_cached_clarity(&state.raw_tasks);

    let mode_switch_penalty = if BehaviorAnalyzer::new()
        .detect_mode_switching(history)
        .detected
    {
        MODE_SWITCH_PENALTY
    } else {
        0.0
    };

    let score = (completion_rate * 0.4 + adherence * 0.3 + avg_clarity * 0.2
        + (1.0 - skip_rate) * 0.1
        - mode_switch_penalty)
        .clamp(0.0, 1.0);
    let level = ProductivityLevel::from_score(score);

    ProductivityReport {
        score,
        level,
        explanation: level.explanation().to_string(),
        components: Some(ProductivityComponents {
            completion_rate,
            skip_rate,
            adherence,
            avg_clarity,
            mode_switch_penalty,
        }),
    }
}
