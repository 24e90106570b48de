//! Task capture and execution-event commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use flowmind_core::{EventKind, Task};
use std::path::Path;

use super::Session;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Capture a new raw task
    Add {
        /// Task text
        text: String,
        /// Context label (defaults to the current context)
        #[arg(long)]
        context: Option<String>,
    },
    /// Score a task text without storing it
    Analyze {
        /// Task text
        text: String,
        /// Context label
        #[arg(long)]
        context: Option<String>,
    },
    /// List raw tasks
    List {
        /// Only pending tasks
        #[arg(long)]
        pending: bool,
    },
    /// Record that work on a task started
    Start {
        /// Task ID
        id: String,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Skip a task
    Skip {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, state: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(state)?;

    match action {
        TaskAction::Add { text, context } => {
            let task = session
                .engine
                .add_task(&mut session.state, &text, context.as_deref(), Utc::now())?
                .clone();
            session.save()?;
            eprintln!("Task created: {}", task.id);
            session.print(&task)?;
        }
        TaskAction::Analyze { text, context } => {
            let mut task = Task::new("preview", text);
            task.context = context;
            let metadata = session.engine.analyze_task(&task);
            session.print(&metadata)?;
        }
        TaskAction::List { pending } => {
            let tasks: Vec<&Task> = session
                .state
                .raw_tasks
                .iter()
                .filter(|t| !pending || !t.is_completed())
                .collect();
            session.print(&tasks)?;
        }
        TaskAction::Start { id } => record(&mut session, EventKind::TaskStart, &id)?,
        TaskAction::Complete { id } => record(&mut session, EventKind::TaskComplete, &id)?,
        TaskAction::Skip { id } => record(&mut session, EventKind::TaskSkip, &id)?,
    }
    Ok(())
}

fn record(session: &mut Session, kind: EventKind, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    session
        .engine
        .record_task_event(&mut session.state, kind, id, Utc::now())?;
    session.save()?;
    if let Some(event) = session.state.execution_history.last() {
        session.print(event)?;
    }
    Ok(())
}
