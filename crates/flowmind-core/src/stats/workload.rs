//! Workload index and level.
//!
//! The workload index blends five individually clamped factors over the
//! union of raw tasks and active-workflow tasks:
//!
//! | Factor | Formula | Max |
//! |--------|---------|-----|
//! | Task count | `min(N/15, 1) * 0.25` | 0.25 |
//! | Complexity | `min(avgComplexity/3, 1) * 0.25` | 0.25 |
//! | Clarity | `(1 - avgClarity) * 0.25` | 0.25 |
//! | Cognitive | `min(cogScore/N, 1) * 0.15` | 0.15 |
//! | Active workflow | `0.1` when one is running | 0.10 |
//!
//! Levels are half-open bands: `[0, 0.25)` light, `[0.25, 0.5)` balanced,
//! `[0.5, 0.75)` heavy, `[0.75, 1]` overloaded.

use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::task::{count_vague, Effort, ExecutionType, VAGUE_CLARITY_THRESHOLD};

/// Task count at which the task-count factor saturates.
const TASK_COUNT_SATURATION: f64 = 15.0;

/// Maximum complexity added by long task text.
const MAX_LENGTH_COMPLEXITY: f64 = 0.2;

/// Suggestions fire above these counts.
const HEAVY_TASKS_TO_MOVE: usize = 3;
const VAGUE_TASKS_TO_CLARIFY: usize = 2;
const RAW_TASKS_TO_ORGANISE: usize = 8;

/// Workload level bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadLevel {
    Light,
    Balanced,
    Heavy,
    Overloaded,
}

impl WorkloadLevel {
    /// Bucket an index into its half-open band.
    pub fn from_index(index: f64) -> Self {
        if index < 0.25 {
            WorkloadLevel::Light
        } else if index < 0.5 {
            WorkloadLevel::Balanced
        } else if index < 0.75 {
            WorkloadLevel::Heavy
        } else {
            WorkloadLevel::Overloaded
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            WorkloadLevel::Light => {
                "Light workload detected. You have good capacity for additional tasks."
            }
            WorkloadLevel::Balanced => {
                "Balanced workload. Good distribution of task complexity and clarity."
            }
            WorkloadLevel::Heavy => {
                "Heavy workload detected. Consider prioritizing or simplifying tasks."
            }
            WorkloadLevel::Overloaded => {
                "Overloaded workload. Immediate action needed to prevent burnout."
            }
        }
    }

    /// Heavy or overloaded.
    pub fn needs_relief(self) -> bool {
        matches!(self, WorkloadLevel::Heavy | WorkloadLevel::Overloaded)
    }
}

/// Task counts per effort tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadBreakdown {
    pub heavy: usize,
    pub medium: usize,
    pub light: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Positive,
}

/// Observation about the task mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: String,
}

/// Workload analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadReport {
    /// Composite workload index (0.0 to 1.0)
    pub index: f64,
    pub level: WorkloadLevel,
    pub explanation: String,
    pub breakdown: WorkloadBreakdown,
    /// Number of distinct tasks analyzed
    pub total: usize,
    pub vague_count: usize,
    pub avg_clarity: f64,
    pub avg_complexity: f64,
    pub heavy_ratio: f64,
    pub vague_ratio: f64,
    pub cognitive_load_score: f64,
    pub recommendations: Vec<String>,
    pub insights: Vec<WorkloadInsight>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadSuggestionKind {
    Move,
    Downgrade,
    Organise,
}

/// Actionable relief suggestion for heavy workloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSuggestion {
    pub text: String,
    /// Button label
    pub action: String,
    #[serde(rename = "type")]
    pub kind: WorkloadSuggestionKind,
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Analyze the combined task set of a snapshot.
pub fn analyze_workload(state: &AppState) -> WorkloadReport {
    let tasks = state.unique_tasks();

    let mut breakdown = WorkloadBreakdown::default();
    let mut total_complexity = 0.0;
    let mut total_clarity = 0.0;
    let mut vague_count = 0usize;
    let mut cognitive_load_score = 0.0;

    for task in &tasks {
        let effort = task.effort();
        let clarity = task.clarity();

        match effort {
            Effort::High => breakdown.heavy += 1,
            Effort::Medium => breakdown.medium += 1,
            Effort::Low => breakdown.light += 1,
        }
        total_complexity += effort.complexity_weight();

        total_clarity += clarity;
        if clarity < VAGUE_CLARITY_THRESHOLD {
            vague_count += 1;
            cognitive_load_score += 0.3;
        }

        match task.execution_type() {
            ExecutionType::Think => cognitive_load_score += 0.2,
            ExecutionType::Organize => cognitive_load_score += 0.1,
            ExecutionType::Do | ExecutionType::Learn => {}
        }

        total_complexity += (task.text.chars().count() as f64 / 100.0).min(MAX_LENGTH_COMPLEXITY);
    }

    let total = tasks.len();
    let divisor = total.max(1) as f64;
    let avg_clarity = if total > 0 { total_clarity / divisor } else { 1.0 };
    let heavy_ratio = breakdown.heavy as f64 / divisor;
    let vague_ratio = vague_count as f64 / divisor;
    let avg_complexity = total_complexity / divisor;

    let task_count_factor = (total as f64 / TASK_COUNT_SATURATION).min(1.0) * 0.25;
    let complexity_factor = (avg_complexity / 3.0).min(1.0) * 0.25;
    let clarity_factor = (1.0 - avg_clarity) * 0.25;
    let cognitive_factor = (cognitive_load_score / divisor).min(1.0) * 0.15;
    let workflow_factor = if state.active_workflow().is_some_and(|w| w.is_active()) {
        0.1
    } else {
        0.0
    };

    let index = (task_count_factor
        + complexity_factor
        + clarity_factor
        + cognitive_factor
        + workflow_factor)
        .clamp(0.0, 1.0);
    let level = WorkloadLevel::from_index(index);

    let recommendations = recommendations(level, total, vague_count, breakdown.heavy);
    let insights = insights(total, avg_clarity, heavy_ratio, vague_ratio);

    WorkloadReport {
        index,
        level,
        explanation: level.explanation().to_string(),
        breakdown,
        total,
        vague_count,
        avg_clarity,
        avg_complexity,
        heavy_ratio,
        vague_ratio,
        cognitive_load_score,
        recommendations,
        insights,
    }
}

fn recommendations(level: WorkloadLevel, total: usize, vague: usize, heavy: usize) -> Vec<String> {
    match level {
        WorkloadLevel::Light => vec!["Consider adding more tasks if you have capacity".to_string()],
        WorkloadLevel::Balanced => vec!["Maintain current pace".to_string()],
        WorkloadLevel::Heavy => {
            let mut recs = Vec::new();
            if vague > 0 {
                recs.push(format!("Simplify {vague} vague task{}", plural(vague)));
            }
            if heavy > 0 {
                recs.push(format!("Break down {heavy} high-effort task{}", plural(heavy)));
            }
            recs.push("Consider moving some tasks to tomorrow".to_string());
            recs
        }
        WorkloadLevel::Overloaded => {
            let to_remove = (total as f64 * 0.3).ceil() as usize;
            vec![
                format!("Urgent: Simplify or remove {to_remove} tasks"),
                "Focus on top 3 priorities only".to_string(),
                "Consider taking a break before continuing".to_string(),
            ]
        }
    }
}

fn insights(total: usize, avg_clarity: f64, heavy_ratio: f64, vague_ratio: f64) -> Vec<WorkloadInsight> {
    let mut insights = Vec::new();
    if vague_ratio > 0.3 {
        insights.push(WorkloadInsight {
            kind: InsightKind::Warning,
            text: format!(
                "{}% of tasks are vague, increasing cognitive load",
                (vague_ratio * 100.0).round()
            ),
        });
    }
    if heavy_ratio > 0.4 {
        insights.push(WorkloadInsight {
            kind: InsightKind::Warning,
            text: format!(
                "{}% of tasks are high-effort, consider breaking them down",
                (heavy_ratio * 100.0).round()
            ),
        });
    }
    if avg_clarity > 0.8 && total < 10 {
        insights.push(WorkloadInsight {
            kind: InsightKind::Positive,
            text: "High task clarity and manageable count - excellent for execution".to_string(),
        });
    }
    insights
}

/// Relief suggestions, only produced for heavy or overloaded workloads.
pub fn generate_workload_suggestions(
    state: &AppState,
    analysis: &WorkloadReport,
) -> Vec<WorkloadSuggestion> {
    let mut suggestions = Vec::new();
    if !analysis.level.needs_relief() {
        return suggestions;
    }

    if analysis.breakdown.heavy > HEAVY_TASKS_TO_MOVE {
        suggestions.push(WorkloadSuggestion {
            text: format!(
                "Move {} heavy tasks to tomorrow",
                analysis.breakdown.heavy.min(2)
            ),
            action: "Move Tasks".to_string(),
            kind: WorkloadSuggestionKind::Move,
        });
    }

    let vague = count_vague(&state.raw_tasks);
    if vague > VAGUE_TASKS_TO_CLARIFY {
        suggestions.push(WorkloadSuggestion {
            text: format!("Clarify {vague} vague tasks to reduce cognitive load"),
            action: "Clarify".to_string(),
            kind: WorkloadSuggestionKind::Downgrade,
        });
    }

    if state.raw_tasks.len() > RAW_TASKS_TO_ORGANISE {
        suggestions.push(WorkloadSuggestion {
            text: "Organise tasks into a structured workflow".to_string(),
            action: "Organise".to_string(),
            kind: WorkloadSuggestionKind::Organise,
        });
    }

    suggestions
}
