//! Momentum versus friction readings.
//!
//! Momentum rewards starts and completions, friction penalizes skips and
//! vague raw tasks. Both are normalized by the window size.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::events::{recent, WindowCounts};
use crate::state::AppState;
use crate::task::count_vague;

const WINDOW: usize = 10;
const MIN_HISTORY: usize = 3;

/// Placeholder label shown before there is enough history.
pub const NO_DATA_LABEL: &str = "—";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MomentumStrength {
    Strong,
    Building,
    Low,
    #[serde(rename = "—")]
    NoData,
}

impl MomentumStrength {
    pub fn from_value(momentum: f64) -> Self {
        if momentum > 0.7 {
            MomentumStrength::Strong
        } else if momentum > 0.4 {
            MomentumStrength::Building
        } else {
            MomentumStrength::Low
        }
    }
}

impl fmt::Display for MomentumStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MomentumStrength::Strong => write!(f, "Strong"),
            MomentumStrength::Building => write!(f, "Building"),
            MomentumStrength::Low => write!(f, "Low"),
            MomentumStrength::NoData => write!(f, "{NO_DATA_LABEL}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FrictionLevel {
    High,
    Moderate,
    Low,
    #[serde(rename = "—")]
    NoData,
}

impl FrictionLevel {
    pub fn from_value(friction: f64) -> Self {
        if friction > 0.6 {
            FrictionLevel::High
        } else if friction > 0.3 {
            FrictionLevel::Moderate
        } else {
            FrictionLevel::Low
        }
    }
}

impl fmt::Display for FrictionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrictionLevel::High => write!(f, "High"),
            FrictionLevel::Moderate => write!(f, "Moderate"),
            FrictionLevel::Low => write!(f, "Low"),
            FrictionLevel::NoData => write!(f, "{NO_DATA_LABEL}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumFrictionReport {
    pub momentum: f64,
    pub friction: f64,
    pub momentum_text: MomentumStrength,
    pub friction_text: FrictionLevel,
}

impl MomentumFrictionReport {
    pub fn neutral() -> Self {
        Self {
            momentum: 0.5,
            friction: 0.5,
            momentum_text: MomentumStrength::NoData,
            friction_text: FrictionLevel::NoData,
        }
    }
}

pub fn analyze_momentum_friction(state: &AppState) -> MomentumFrictionReport {
    let history = &state.execution_history;
    if history.len() < MIN_HISTORY {
        return MomentumFrictionReport::neutral();
    }

    let counts = WindowCounts::of(recent(history, WINDOW));
    let vague = count_vague(&state.raw_tasks);

    let momentum = ((counts.completes as f64 * 0.6 + counts.starts as f64 * 0.4)
        / counts.divisor())
    .min(1.0);
    let friction = ((counts.skips as f64 * 0.5 + vague as f64 * 0.1) / counts.divisor()).min(1.0);

    MomentumFrictionReport {
        momentum,
        friction,
        momentum_text: MomentumStrength::from_value(momentum),
        friction_text: FrictionLevel::from_value(friction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventKind};
    use crate::task::Task;
    use chrono::{Duration, TimeZone, Utc};

    fn history(kinds: &[EventKind]) -> Vec<Event> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        kinds
            .iter()
            .enumerate()
            .map(|(i, k)| Event::new(*k, base + Duration::minutes(i as i64 * 5)))
            .collect()
    }

    #[test]
    fn neutral_placeholders_for_short_history() {
        let report = analyze_momentum_friction(&AppState::default());
        assert_eq!(report.momentum, 0.5);
        assert_eq!(report.friction, 0.5);
        assert_eq!(report.momentum_text.to_string(), "—");
        assert_eq!(
            serde_json::to_value(&report).unwrap()["frictionText"],
            serde_json::json!("—")
        );
    }

    #[test]
    fn completions_build_strong_momentum() {
        use EventKind::{TaskComplete, TaskStart};
        let state = AppState {
            execution_history: history(&[TaskStart, TaskComplete, TaskStart, TaskComplete]),
            ..AppState::default()
        };
        let report = analyze_momentum_friction(&state);
        // (2*0.6 + 2*0.4) / 4
        assert!((report.momentum - 0.5).abs() < 1e-12);
        assert_eq!(report.momentum_text, MomentumStrength::Building);
        assert_eq!(report.friction, 0.0);
        assert_eq!(report.friction_text, FrictionLevel::Low);
    }

    #[test]
    fn skips_and_vague_tasks_add_friction() {
        let state = AppState {
            execution_history: history(&[EventKind::TaskSkip; 3]),
            raw_tasks: (0..3).map(|i| Task::new(format!("{i}"), "maybe?")).collect(),
            ..AppState::default()
        };
        let report = analyze_momentum_friction(&state);
        // (1.5 + 0.3) / 3
        assert!((report.friction - 0.6).abs() < 1e-12);
        assert_eq!(report.momentum, 0.0);
        assert_eq!(report.momentum_text, MomentumStrength::Low);
    }

    #[test]
    fn labels_use_strict_thresholds() {
        assert_eq!(MomentumStrength::from_value(0.7), MomentumStrength::Building);
        assert_eq!(MomentumStrength::from_value(0.71), MomentumStrength::Strong);
        assert_eq!(MomentumStrength::from_value(0.4), MomentumStrength::Low);
        assert_eq!(FrictionLevel::from_value(0.6), FrictionLevel::Moderate);
        assert_eq!(FrictionLevel::from_value(0.61), FrictionLevel::High);
        assert_eq!(FrictionLevel::from_value(0.3), FrictionLevel::Low);
    }
}
