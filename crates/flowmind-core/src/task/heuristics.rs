//! Keyword and length heuristics over a single task's text.
//!
//! All matching is case-insensitive substring matching, so "do" also hits
//! "document" and "todo". Every function here is pure.

use super::{Effort, ExecutionType, Task};

/// Phrases that make a task read as undecided.
const VAGUE_KEYWORDS: [&str; 6] = [
    "maybe",
    "perhaps",
    "think about",
    "consider",
    "look into",
    "figure out",
];

const LOW_EFFORT_KEYWORDS: [&str; 5] = ["quick", "simple", "easy", "just", "only"];

const HIGH_EFFORT_KEYWORDS: [&str; 5] = [
    "complex",
    "detailed",
    "comprehensive",
    "thorough",
    "extensive",
];

/// Keyword groups in match priority order. The first group with a hit wins.
const EXECUTION_TYPE_GROUPS: [(ExecutionType, &[&str]); 4] = [
    (
        ExecutionType::Think,
        &["think", "plan", "design", "consider", "decide"],
    ),
    (
        ExecutionType::Do,
        &["do", "make", "build", "create", "write", "complete"],
    ),
    (
        ExecutionType::Organize,
        &["organize", "sort", "clean", "arrange", "tidy"],
    ),
    (
        ExecutionType::Learn,
        &["learn", "read", "study", "research", "explore"],
    ),
];

/// Text length at which the length component saturates.
const CLARITY_FULL_LENGTH: f64 = 50.0;

/// Count how many distinct keywords occur in the lowercased text.
fn keyword_hits(lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| lower.contains(*kw)).count()
}

/// Heuristic clarity score in `[0, 1]`.
///
/// `min(len/50, 1) * 0.6`, minus 0.2 per distinct vague phrase and 0.1 per
/// literal `?`, clamped.
pub fn calculate_clarity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let vague_count = keyword_hits(&lower, &VAGUE_KEYWORDS) as f64;
    let length_score = (text.chars().count() as f64 / CLARITY_FULL_LENGTH).min(1.0);
    let question_count = text.matches('?').count() as f64;

    let clarity = length_score * 0.6 - vague_count * 0.2 - question_count * 0.1;
    clarity.clamp(0.0, 1.0)
}

/// Effort estimate from low/high keyword counts.
///
/// High wins only on a strict majority; any low hit otherwise yields low,
/// so an equal non-zero count resolves to low.
pub fn estimate_effort(text: &str) -> Effort {
    let lower = text.to_lowercase();
    let low_count = keyword_hits(&lower, &LOW_EFFORT_KEYWORDS);
    let high_count = keyword_hits(&lower, &HIGH_EFFORT_KEYWORDS);

    if high_count > low_count {
        Effort::High
    } else if low_count > 0 {
        Effort::Low
    } else {
        Effort::Medium
    }
}

/// First keyword group (think, do, organize, learn) with a hit; `Do` otherwise.
pub fn detect_execution_type(text: &str) -> ExecutionType {
    let lower = text.to_lowercase();
    EXECUTION_TYPE_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(kind, _)| *kind)
        .unwrap_or(ExecutionType::Do)
}

/// `clarity*0.6 + 0.2 (has context) + 0.2 (has cached effort)`.
pub fn calculate_readiness(task: &Task) -> f64 {
    let clarity = task.clarity();
    let context_bonus = if task.has_context() { 0.2 } else { 0.0 };
    let effort_bonus = if task.metadata.is_some() { 0.2 } else { 0.0 };
    clarity * 0.6 + context_bonus + effort_bonus
}
