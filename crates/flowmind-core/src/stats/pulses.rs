//! Execution pulses: short positive signals surfaced from recent history.

use serde::{Deserialize, Serialize};

use crate::events::{recent, Event, EventKind};
use crate::state::AppState;

const WINDOW: usize = 20;
const MIN_STREAK: usize = 3;
const ORGANIZE_IMPACT_RATE: f64 = 0.6;
const MIN_CONSISTENT_EVENTS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PulseKind {
    CompletionStreak,
    OrganizingImpact,
    ModeConsistency,
}

/// Inclusive index range into the examined window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub kind: PulseKind,
    pub text: String,
    pub highlight: Option<Highlight>,
}

/// Longest run of completions not broken by a skip.
///
/// Returns the run length and the window indices of its first and last
/// completion. Events other than completes and skips neither extend nor
/// break a run.
fn longest_streak(window: &[Event]) -> Option<(usize, Highlight)> {
    let mut best: Option<(usize, Highlight)> = None;
    let mut streak = 0usize;
    let mut start = 0usize;

    for (i, event) in window.iter().enumerate() {
        match event.kind {
            EventKind::TaskComplete => {
                if streak == 0 {
                    start = i;
                }
                streak += 1;
                if best.map_or(true, |(len, _)| streak > len) {
                    best = Some((streak, Highlight { start, end: i }));
                }
            }
            EventKind::TaskSkip => streak = 0,
            _ => {}
        }
    }

    best
}

fn streak_pulse(window: &[Event]) -> Option<Pulse> {
    let (len, highlight) = longest_streak(window)?;
    (len >= MIN_STREAK).then(|| Pulse {
        kind: PulseKind::CompletionStreak,
        text: format!("{len} task completion streak"),
        highlight: Some(highlight),
    })
}

fn organizing_pulse(window: &[Event]) -> Option<Pulse> {
    let index = window.iter().position(|e| e.kind.is_organize())?;
    let after = &window[index..];
    let completes = after
        .iter()
        .filter(|e| e.kind == EventKind::TaskComplete)
        .count();
    let rate = completes as f64 / after.len().max(1) as f64;

    (rate > ORGANIZE_IMPACT_RATE).then(|| Pulse {
        kind: PulseKind::OrganizingImpact,
        text: "Execution improved after organizing".to_string(),
        highlight: Some(Highlight {
            start: index,
            end: window.len() - 1,
        }),
    })
}

fn consistency_pulse(window: &[Event]) -> Option<Pulse> {
    let contexts: Vec<&str> = window.iter().filter_map(Event::task_context).collect();
    let first = *contexts.first()?;
    let single = contexts.iter().all(|c| *c == first);

    (single && contexts.len() > MIN_CONSISTENT_EVENTS).then(|| Pulse {
        kind: PulseKind::ModeConsistency,
        text: "Consistent execution mode".to_string(),
        highlight: None,
    })
}

/// Pulses over the last 20 events, in streak, organizing, consistency order.
pub fn generate_execution_pulses(state: &AppState) -> Vec<Pulse> {
    let window = recent(&state.execution_history, WINDOW);
    if window.is_empty() {
        return Vec::new();
    }

    [
        streak_pulse(window),
        organizing_pulse(window),
        consistency_pulse(window),
    ]
    .into_iter()
    .flatten()
    .collect()
}
