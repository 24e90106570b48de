use chrono::Utc;
use clap::Subcommand;
use flowmind_core::{ValidationError, Variant};
use std::path::Path;

use super::Session;

#[derive(Subcommand)]
pub enum WorkflowAction {
    /// Build a workflow from the raw tasks and make it active
    Generate {
        /// Context label (default: workflow.default_context)
        #[arg(long)]
        context: Option<String>,
    },
    /// Re-split the active workflow (deep, low or quick)
    Variant {
        /// Variant name (default: workflow.default_variant)
        name: Option<String>,
    },
    /// Show the active workflow
    Show,
    /// Usage, deviations and effectiveness of the active workflow
    Report,
    /// Rebalancing suggestions for the active workflow
    Rebalance,
}

pub fn run(action: WorkflowAction, state: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(state)?;

    match action {
        WorkflowAction::Generate { context } => {
            let context = context.unwrap_or_else(|| session.config.workflow.default_context.clone());
            let workflow = session
                .engine
                .activate_workflow(&mut session.state, &context, Utc::now())
                .clone();
            session.save()?;
            session.print(&workflow)?;
        }
        WorkflowAction::Variant { name } => {
            let variant = match name {
                Some(name) => Variant::from_name(&name),
                None => session.config.default_variant(),
            };
            let workflow = session
                .engine
                .apply_variant(&mut session.state, variant)?
                .clone();
            session.save()?;
            session.print(&workflow)?;
        }
        WorkflowAction::Show => {
            let workflow = session
                .state
                .active_workflow()
                .ok_or(ValidationError::NoActiveWorkflow)?;
            session.print(workflow)?;
        }
        WorkflowAction::Report => {
            let workflow = session
                .state
                .active_workflow()
                .ok_or(ValidationError::NoActiveWorkflow)?;
            let report = session
                .engine
                .analyze_workflow(workflow, &session.state.execution_history);
            session.print(&report)?;
        }
        WorkflowAction::Rebalance => {
            let suggestions = session.engine.generate_rebalance_suggestions(&session.state);
            session.print(&suggestions)?;
        }
    }
    Ok(())
}
