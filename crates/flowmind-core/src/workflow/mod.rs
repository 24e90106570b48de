//! Three-phase workflows.
//!
//! A workflow arranges tasks into the fixed phase sequence
//! planning -> execution -> cooldown. A task belongs to at most one phase.
//!
//! - [`engine`]: generation, checkpoints and variant re-balancing
//! - [`analysis`]: usage, phase-order deviations, effectiveness

pub mod analysis;
pub mod engine;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::Task;

/// Workflow phase. Declaration order is the canonical execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Planning,
    Execution,
    Cooldown,
}

impl Phase {
    /// Canonical phase order.
    pub const ORDER: [Phase; 3] = [Phase::Planning, Phase::Execution, Phase::Cooldown];

    /// Position in [`Phase::ORDER`].
    pub fn index(self) -> usize {
        match self {
            Phase::Planning => 0,
            Phase::Execution => 1,
            Phase::Cooldown => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Planning => "planning",
            Phase::Execution => "execution",
            Phase::Cooldown => "cooldown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tasks grouped by phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phases {
    #[serde(default)]
    pub planning: Vec<Task>,
    #[serde(default)]
    pub execution: Vec<Task>,
    #[serde(default)]
    pub cooldown: Vec<Task>,
}

impl Phases {
    pub fn get(&self, phase: Phase) -> &[Task] {
        match phase {
            Phase::Planning => &self.planning,
            Phase::Execution => &self.execution,
            Phase::Cooldown => &self.cooldown,
        }
    }

    pub fn get_mut(&mut self, phase: Phase) -> &mut Vec<Task> {
        match phase {
            Phase::Planning => &mut self.planning,
            Phase::Execution => &mut self.execution,
            Phase::Cooldown => &mut self.cooldown,
        }
    }

    /// `(phase, tasks)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &[Task])> {
        Phase::ORDER.into_iter().map(move |p| (p, self.get(p)))
    }

    /// All tasks flattened in phase order.
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.planning
            .iter()
            .chain(self.execution.iter())
            .chain(self.cooldown.iter())
    }

    pub fn all_tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.planning
            .iter_mut()
            .chain(self.execution.iter_mut())
            .chain(self.cooldown.iter_mut())
    }

    /// Consume and flatten in phase order.
    pub fn into_tasks(self) -> Vec<Task> {
        let mut tasks = self.planning;
        tasks.extend(self.execution);
        tasks.extend(self.cooldown);
        tasks
    }

    pub fn len(&self) -> usize {
        self.planning.len() + self.execution.len() + self.cooldown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Phases (in canonical order) holding a task with this id.
    pub fn phases_containing(&self, task_id: &str) -> Vec<Phase> {
        self.iter()
            .filter(|(_, tasks)| tasks.iter().any(|t| t.id == task_id))
            .map(|(phase, _)| phase)
            .collect()
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.all_tasks().any(|t| t.id == task_id)
    }

    pub fn find_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.all_tasks_mut().find(|t| t.id == task_id)
    }
}

/// A reassessment marker inside a phase's task sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub phase: Phase,
    /// Index within the phase's task list
    pub position: usize,
    pub question: String,
    pub inserted: bool,
}

/// Lifecycle status of a workflow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
}

/// Phase split preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 30/60/rest split produced by generation
    #[default]
    Default,
    /// Planning-heavy
    Deep,
    /// Gentle, cooldown-heavy
    Low,
    /// Execution-heavy
    Quick,
}

/// Phase ratios of a variant; cooldown takes whatever remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseRatios {
    pub planning: f64,
    pub execution: f64,
    pub cooldown: f64,
}

impl Variant {
    /// Parse a variant name. Unknown names fall back to `Deep`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "low" => Variant::Low,
            "quick" => Variant::Quick,
            _ => Variant::Deep,
        }
    }

    /// Preset used when re-splitting. `Default` is only produced by
    /// generation and resolves to `Deep`.
    pub fn preset(self) -> Self {
        match self {
            Variant::Default => Variant::Deep,
            other => other,
        }
    }

    pub fn ratios(self) -> PhaseRatios {
        match self {
            Variant::Default => PhaseRatios {
                planning: 0.3,
                execution: 0.6,
                cooldown: 0.1,
            },
            Variant::Deep => PhaseRatios {
                planning: 0.4,
                execution: 0.5,
                cooldown: 0.1,
            },
            Variant::Low => PhaseRatios {
                planning: 0.2,
                execution: 0.4,
                cooldown: 0.4,
            },
            Variant::Quick => PhaseRatios {
                planning: 0.1,
                execution: 0.7,
                cooldown: 0.2,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Default => "default",
            Variant::Deep => "deep",
            Variant::Low => "low",
            Variant::Quick => "quick",
        };
        f.write_str(name)
    }
}

/// A phased workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: WorkflowStatus,
    #[serde(default)]
    pub phases: Phases,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub context: String,
}

impl Workflow {
    pub fn is_active(&self) -> bool {
        self.status == WorkflowStatus::Active
    }

    pub fn task_count(&self) -> usize {
        self.phases.len()
    }

    /// Completed tasks over all tasks; `None` when the workflow is empty.
    pub fn completion_ratio(&self) -> Option<f64> {
        let total = self.task_count();
        if total == 0 {
            return None;
        }
        let completed = self.phases.all_tasks().filter(|t| t.is_completed()).count();
        Some(completed as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_variant_defaults_to_deep() {
        assert_eq!(Variant::from_name("quick"), Variant::Quick);
        assert_eq!(Variant::from_name("LOW"), Variant::Low);
        assert_eq!(Variant::from_name("turbo"), Variant::Deep);
        assert_eq!(Variant::from_name(""), Variant::Deep);
        assert_eq!(Variant::from_name("default"), Variant::Deep);
        assert_eq!(Variant::Default.preset(), Variant::Deep);
    }

    #[test]
    fn phases_containing_reports_canonical_order() {
        let phases = Phases {
            planning: vec![Task::new("a", "x")],
            execution: vec![Task::new("b", "y")],
            cooldown: vec![Task::new("a", "dup")],
        };
        assert_eq!(
            phases.phases_containing("a"),
            vec![Phase::Planning, Phase::Cooldown]
        );
        assert!(phases.phases_containing("zz").is_empty());
    }

    #[test]
    fn workflow_from_ui_json_fills_defaults() {
        let json = r#"{"id":"w1","name":"Today's Workflow","phases":{"planning":[{"id":"t","text":"Plan"}],"execution":[],"cooldown":[]}}"#;
        let wf: Workflow = serde_json::from_str(json).unwrap();
        assert_eq!(wf.status, WorkflowStatus::Draft);
        assert_eq!(wf.variant, Variant::Default);
        assert!(wf.checkpoints.is_empty());
        assert_eq!(wf.task_count(), 1);
        assert_eq!(wf.completion_ratio(), Some(0.0));
    }
}
