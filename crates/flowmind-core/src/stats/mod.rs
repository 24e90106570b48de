//! Aggregate analytics over tasks and execution history.
//!
//! This module provides the workload index, productivity score,
//! momentum/friction readings and execution pulses.

mod momentum_friction;
mod productivity;
mod pulses;
mod workload;

pub use workload::{
    analyze_workload, generate_workload_suggestions, InsightKind, WorkloadBreakdown,
    WorkloadInsight, WorkloadLevel, WorkloadReport, WorkloadSuggestion, WorkloadSuggestionKind,
};

pub use productivity::{
    analyze_productivity, ProductivityComponents, ProductivityLevel, ProductivityReport,
};

pub use momentum_friction::{
    analyze_momentum_friction, FrictionLevel, MomentumFrictionReport, MomentumStrength,
    NO_DATA_LABEL,
};

pub use pulses::{generate_execution_pulses, Highlight, Pulse, PulseKind};
