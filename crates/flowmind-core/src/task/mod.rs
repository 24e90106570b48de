//! Task records and their heuristic metadata.
//!
//! A task is created from free text by the UI layer. Its [`TaskMetadata`] is
//! computed once at ingestion (see [`classifier::enrich_task`]) and cached on
//! the task. Every analysis reads the cached values first and only falls back
//! to the text heuristics when metadata is absent.

pub mod classifier;
pub mod heuristics;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clarity below this value marks a task as vague.
pub const VAGUE_CLARITY_THRESHOLD: f64 = 0.5;

/// Completion status of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not done yet (initial state)
    #[default]
    Pending,
    /// Done
    Completed,
}

/// Coarse effort estimate derived from keyword cues.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    #[default]
    Medium,
    High,
}

impl Effort {
    /// Complexity weight used by workload analysis (light=1, medium=2, heavy=3).
    pub fn complexity_weight(self) -> f64 {
        match self {
            Effort::Low => 1.0,
            Effort::Medium => 2.0,
            Effort::High => 3.0,
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effort::Low => write!(f, "low"),
            Effort::Medium => write!(f, "medium"),
            Effort::High => write!(f, "high"),
        }
    }
}

/// Dominant cognitive mode a task requires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionType {
    Think,
    #[default]
    Do,
    Organize,
    Learn,
}

impl fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionType::Think => write!(f, "think"),
            ExecutionType::Do => write!(f, "do"),
            ExecutionType::Organize => write!(f, "organize"),
            ExecutionType::Learn => write!(f, "learn"),
        }
    }
}

/// Heuristic metadata cached on a task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// How well-specified the task text is (0.0 to 1.0)
    pub clarity: f64,
    /// Effort estimate
    pub effort: Effort,
    /// Cognitive mode
    pub execution_type: ExecutionType,
    /// How ready the task is to be started (0.0 to 1.0)
    pub readiness: f64,
}

impl TaskMetadata {
    /// Metadata assigned when heuristic analysis is switched off.
    pub fn neutral() -> Self {
        Self {
            clarity: 0.7,
            effort: Effort::Medium,
            execution_type: ExecutionType::Do,
            readiness: 0.5,
        }
    }
}

/// A single user task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    /// Free-form context label ("work", "home", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    /// Cached heuristic metadata; `None` until the task is enriched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TaskMetadata>,
    /// Number of times the text was edited (maintained by the UI)
    #[serde(default)]
    pub edit_count: u32,
    /// Number of times the task was skipped (maintained by the UI)
    #[serde(default)]
    pub skip_count: u32,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task without metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            context: None,
            status: TaskStatus::Pending,
            metadata: None,
            edit_count: 0,
            skip_count: 0,
            timestamp: None,
        }
    }

    /// Builder: set the context label.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Builder: set the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder: attach cached metadata.
    pub fn with_metadata(mut self, metadata: TaskMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// True when the task carries a non-empty context label.
    pub fn has_context(&self) -> bool {
        self.context.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Context label, treating an empty string as absent.
    pub fn context_label(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Cached clarity, or clarity recomputed from the text.
    ///
    /// A cached value of `0.0` is a valid score and is returned as-is.
    pub fn clarity(&self) -> f64 {
        match &self.metadata {
            Some(meta) => meta.clarity,
            None => heuristics::calculate_clarity(&self.text),
        }
    }

    /// Cached effort, or effort estimated from the text.
    pub fn effort(&self) -> Effort {
        match &self.metadata {
            Some(meta) => meta.effort,
            None => heuristics::estimate_effort(&self.text),
        }
    }

    /// Cached execution type, or type detected from the text.
    pub fn execution_type(&self) -> ExecutionType {
        match &self.metadata {
            Some(meta) => meta.execution_type,
            None => heuristics::detect_execution_type(&self.text),
        }
    }

    /// Clarity below [`VAGUE_CLARITY_THRESHOLD`].
    pub fn is_vague(&self) -> bool {
        self.clarity() < VAGUE_CLARITY_THRESHOLD
    }

    /// Lightweight reference used inside events.
    pub fn to_ref(&self) -> crate::events::TaskRef {
        crate::events::TaskRef {
            id: self.id.clone(),
            text: Some(self.text.clone()),
            context: self.context.clone(),
        }
    }
}

/// Number of vague tasks in a slice.
pub fn count_vague(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_vague()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_zero_clarity_is_not_recomputed() {
        let meta = TaskMetadata {
            clarity: 0.0,
            ..TaskMetadata::neutral()
        };
        let task = Task::new("1", "Write a detailed design document for the sync layer")
            .with_metadata(meta);
        assert_eq!(task.clarity(), 0.0);
        assert!(task.is_vague());
    }

    #[test]
    fn missing_metadata_falls_back_to_heuristics() {
        let task = Task::new("1", "maybe");
        assert_eq!(task.effort(), Effort::Medium);
        assert_eq!(task.execution_type(), ExecutionType::Do);
        assert!(task.is_vague());
    }

    #[test]
    fn empty_context_counts_as_absent() {
        let task = Task::new("1", "x").with_context("");
        assert!(!task.has_context());
        assert!(task.context_label().is_none());
    }

    #[test]
    fn deserializes_ui_snapshot_shape() {
        let json = r#"{
            "id": "17",
            "text": "Plan the week",
            "context": "work",
            "status": "completed",
            "metadata": {"clarity": 0.3, "effort": "high", "executionType": "think", "readiness": 0.4},
            "skipCount": 2
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.is_completed());
        assert_eq!(task.skip_count, 2);
        assert_eq!(task.edit_count, 0);
        assert_eq!(task.execution_type(), ExecutionType::Think);
        assert_eq!(task.effort(), Effort::High);
    }
}
