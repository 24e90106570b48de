use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "flowmind", version, about = "FlowMind task heuristics CLI")]
pub struct Cli {
    /// Snapshot file to read and update (overrides storage.state_file)
    #[arg(long, global = true, value_name = "PATH")]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task capture and execution events
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Workflow generation and analysis
    Workflow {
        #[command(subcommand)]
        action: commands::workflow::WorkflowAction,
    },
    /// Behavior, workload and productivity analyses
    Analyze {
        #[command(subcommand)]
        action: commands::analyze::AnalyzeAction,
    },
    /// Daily calendar records
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowmind=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let state = cli.state.as_deref();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action, state),
        Commands::Workflow { action } => commands::workflow::run(action, state),
        Commands::Analyze { action } => commands::analyze::run(action, state),
        Commands::Day { action } => commands::day::run(action, state),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut app = Cli::command();
            let app_name = app.get_name().to_string();
            clap_complete::generate(shell, &mut app, app_name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
