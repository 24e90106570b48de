//! Behavioral signals from the execution history.
//!
//! Every signal is computed over a short recency window (the last 10 events
//! by default):
//! - **Mode switching**: many distinct task contexts in the window
//! - **Stalls**: skips outnumbering completions more than two to one
//! - **Momentum**: weighted balance of completes, skips and starts
//! - **Cognitive load**: task volume plus vague-task pressure

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cognitive_load::{weighted_load, LoadLevel, LoadTrigger, VAGUE_TASK_TRIGGER};
use crate::events::{recent, Event, WindowCounts};
use crate::task::{count_vague, Task};
use crate::workflow::Workflow;

/// Mode-switching signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeSwitching {
    pub detected: bool,
    /// Distinct contexts over context-bearing events (0.0 to 1.0)
    pub frequency: f64,
    /// Distinct contexts in first-seen order
    pub contexts: Vec<String>,
}

/// Stall signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StallDetection {
    pub detected: bool,
    /// Number of skips in the window
    pub duration: usize,
    /// Skips over window size
    pub ratio: f64,
}

/// Short-window progress label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Flowing,
    Recovering,
    Stalled,
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Momentum::Flowing => write!(f, "flowing"),
            Momentum::Recovering => write!(f, "recovering"),
            Momentum::Stalled => write!(f, "stalled"),
        }
    }
}

/// Behavior-side cognitive load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveLoad {
    /// Normalized load (0.0 to 1.0)
    pub index: f64,
    pub level: LoadLevel,
    pub triggers: Vec<LoadTrigger>,
}

/// All behavioral signals for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorReport {
    pub mode_switching: ModeSwitching,
    pub stall_detection: StallDetection,
    pub momentum: Momentum,
    pub cognitive_load: CognitiveLoad,
}

/// Analyzer for behavioral signals.
#[derive(Debug, Clone)]
pub struct BehaviorAnalyzer {
    /// Number of most recent events examined
    pub window: usize,
    /// Minimum history length for mode-switch detection
    pub min_history_mode_switch: usize,
    /// Minimum history length for stall detection
    pub min_history_stall: usize,
}

impl Default for BehaviorAnalyzer {
    fn default() -> Self {
        Self {
            window: 10,
            min_history_mode_switch: 3,
            min_history_stall: 5,
        }
    }
}

impl BehaviorAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute every behavioral signal.
    pub fn analyze(
        &self,
        history: &[Event],
        raw_tasks: &[Task],
        workflows: &[Workflow],
    ) -> BehaviorReport {
        BehaviorReport {
            mode_switching: self.detect_mode_switching(history),
            stall_detection: self.detect_stalls(history),
            momentum: self.calculate_momentum(history),
            cognitive_load: self.calculate_cognitive_load(raw_tasks, workflows),
        }
    }

    /// More than two distinct task contexts in the window.
    pub fn detect_mode_switching(&self, history: &[Event]) -> ModeSwitching {
        if history.len() < self.min_history_mode_switch {
            return ModeSwitching::default();
        }

        let contexts: Vec<&str> = recent(history, self.window)
            .iter()
            .filter_map(Event::task_context)
            .collect();

        let mut distinct: Vec<String> = Vec::new();
        for context in &contexts {
            if !distinct.iter().any(|c| c == context) {
                distinct.push((*context).to_string());
            }
        }

        ModeSwitching {
            detected: distinct.len() > 2,
            frequency: distinct.len() as f64 / contexts.len().max(1) as f64,
            contexts: distinct,
        }
    }

    /// Skips outnumber twice the completions in the window.
    pub fn detect_stalls(&self, history: &[Event]) -> StallDetection {
        if history.len() < self.min_history_stall {
            return StallDetection::default();
        }

        let counts = WindowCounts::of(recent(history, self.window));
        StallDetection {
            detected: counts.skips > counts.completes * 2,
            duration: counts.skips,
            ratio: counts.skips as f64 / counts.divisor(),
        }
    }

    /// `2*completes - 1.5*skips + 0.5*starts`: above 5 flowing, below -2 stalled.
    pub fn calculate_momentum(&self, history: &[Event]) -> Momentum {
        if history.is_empty() {
            return Momentum::Flowing;
        }

        let counts = WindowCounts::of(recent(history, self.window));
        let score =
            counts.completes as f64 * 2.0 - counts.skips as f64 * 1.5 + counts.starts as f64 * 0.5;

        if score > 5.0 {
            Momentum::Flowing
        } else if score < -2.0 {
            Momentum::Stalled
        } else {
            Momentum::Recovering
        }
    }

    /// Load from raw tasks and the first workflow whose status is active.
    pub fn calculate_cognitive_load(&self, raw_tasks: &[Task], workflows: &[Workflow]) -> CognitiveLoad {
        let workflow_tasks = workflows
            .iter()
            .find(|w| w.is_active())
            .map_or(0, |w| w.task_count());
        let load = weighted_load(raw_tasks, workflow_tasks);

        let level = if load > 7.0 {
            LoadLevel::High
        } else if load > 4.0 {
            LoadLevel::Medium
        } else {
            LoadLevel::Low
        };

        let triggers = if count_vague(raw_tasks) > VAGUE_TASK_TRIGGER {
            vec![LoadTrigger::VagueTasks]
        } else {
            Vec::new()
        };

        CognitiveLoad {
            index: (load / 10.0).min(1.0),
            level,
            triggers,
        }
    }
}
