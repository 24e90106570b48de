pub mod analyze;
pub mod config;
pub mod day;
pub mod task;
pub mod workflow;

use flowmind_core::storage::{load_snapshot, save_snapshot};
use flowmind_core::{AppState, Config, FlowMind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loaded config, engine and snapshot for one command invocation.
pub struct Session {
    pub config: Config,
    pub engine: FlowMind,
    pub state: AppState,
    path: PathBuf,
}

impl Session {
    /// Load config and the snapshot at `state_override` or the configured path.
    pub fn open(state_override: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let path = match state_override {
            Some(path) => path.to_path_buf(),
            None => config.state_path()?,
        };
        debug!(path = %path.display(), "opening snapshot");
        let state = load_snapshot(&path)?;
        Ok(Self {
            engine: FlowMind::from_config(&config),
            config,
            state,
            path,
        })
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        save_snapshot(&self.path, &self.state, self.config.output.pretty)?;
        Ok(())
    }

    /// Print a value as JSON, pretty unless `output.pretty` is off.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<(), Box<dyn std::error::Error>> {
        print_json(value, self.config.output.pretty)
    }
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
