//! # FlowMind Core Library
//!
//! This library provides the heuristic analysis engine behind FlowMind: a
//! deterministic scoring and classification layer that turns free-text tasks
//! and a log of user actions into structured metrics, three-phase workflows
//! and intervention suggestions. It follows a CLI-first philosophy: every
//! operation is available through the standalone `flowmind` binary, which is
//! a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Text Heuristics**: keyword and length based clarity, effort, execution
//!   type and readiness scores for a single task
//! - **Behavior Analyzer**: mode switching, stalls, momentum and cognitive
//!   load over the recent execution history
//! - **Workflow Engine**: planning/execution/cooldown split, checkpoints,
//!   variants, deviation and effectiveness analysis
//! - **Stats**: workload index, productivity score, momentum vs friction,
//!   execution pulses
//! - **Storage**: TOML configuration and JSON state snapshots
//!
//! Every analysis is a total function over an [`AppState`] snapshot; only the
//! storage layer can fail.
//!
//! ## Key Components
//!
//! - [`FlowMind`]: Facade exposing every analysis
//! - [`AppState`]: Snapshot of tasks, workflows and history
//! - [`Config`]: Application configuration management

pub mod behavior;
pub mod calendar;
pub mod cognitive_load;
pub mod decision_debt;
pub mod engine;
pub mod error;
pub mod events;
pub mod intervention;
pub mod patterns;
pub mod state;
pub mod stats;
pub mod storage;
pub mod task;
pub mod workflow;

pub use behavior::{BehaviorAnalyzer, BehaviorReport, Momentum};
pub use calendar::DaySummary;
pub use cognitive_load::{CognitiveLoadReport, LoadLevel, LoadTrigger};
pub use decision_debt::DecisionDebtReport;
pub use engine::FlowMind;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{Event, EventKind, TaskRef};
pub use intervention::{InterventionDecision, InterventionReason, SuggestionKind};
pub use patterns::{Pattern, PatternKind};
pub use state::AppState;
pub use stats::{
    MomentumFrictionReport, ProductivityLevel, ProductivityReport, Pulse, WorkloadLevel,
    WorkloadReport,
};
pub use storage::Config;
pub use task::{Effort, ExecutionType, Task, TaskMetadata, TaskStatus};
pub use workflow::{Phase, Variant, Workflow, WorkflowStatus};
