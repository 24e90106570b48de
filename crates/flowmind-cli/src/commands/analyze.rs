//! Read-only analyses over the stored snapshot.

use clap::Subcommand;
use flowmind_core::SuggestionKind;
use std::path::Path;

use super::Session;

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Mode switching, stalls, momentum and cognitive load
    Behavior,
    /// State-level cognitive load assessment
    Cognitive,
    /// Workload index and level
    Workload {
        /// Print relief suggestions instead of the report
        #[arg(long)]
        suggestions: bool,
    },
    /// Productivity score
    Productivity,
    /// Momentum versus friction
    Momentum,
    /// Vague tasks and pending decisions
    Debt,
    /// Long-run behavior patterns
    Patterns,
    /// Execution pulses from recent history
    Pulses,
    /// Whether the user should be interrupted, and why
    Intervene,
    /// Canned suggestion (organize, simplify, focus, checkpoint)
    Suggest {
        /// Suggestion kind; unknown kinds fall back to organize
        #[arg(default_value = "organize")]
        kind: String,
    },
}

pub fn run(action: AnalyzeAction, state: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(state)?;
    let engine = &session.engine;
    let snapshot = &session.state;

    match action {
        AnalyzeAction::Behavior => session.print(&engine.analyze_behavior(
            &snapshot.execution_history,
            &snapshot.raw_tasks,
            &snapshot.workflows,
        )),
        AnalyzeAction::Cognitive => session.print(&engine.assess_cognitive_load(snapshot)),
        AnalyzeAction::Workload { suggestions } => {
            let report = engine.analyze_workload(snapshot);
            if suggestions {
                session.print(&engine.generate_workload_suggestions(snapshot, &report))
            } else {
                session.print(&report)
            }
        }
        AnalyzeAction::Productivity => session.print(&engine.analyze_productivity(snapshot)),
        AnalyzeAction::Momentum => session.print(&engine.analyze_momentum_friction(snapshot)),
        AnalyzeAction::Debt => session.print(&engine.track_decision_debt(snapshot)),
        AnalyzeAction::Patterns => session.print(&engine.detect_patterns(snapshot)),
        AnalyzeAction::Pulses => session.print(&engine.generate_execution_pulses(snapshot)),
        AnalyzeAction::Intervene => session.print(&engine.should_intervene(snapshot)),
        AnalyzeAction::Suggest { kind } => session.print(
            &engine.generate_suggestion(SuggestionKind::from_name(&kind), snapshot),
        ),
    }
}
