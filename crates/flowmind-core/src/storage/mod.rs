//! On-disk storage: data directory resolution, `Config` and the JSON snapshot file.

mod config;

pub use config::{Config, EngineConfig, OutputConfig, StorageConfig, WorkflowConfig};

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, CoreError, Result};
use crate::state::AppState;

/// Returns `~/.config/flowmind[-dev]/` based on FLOWMIND_ENV.
///
/// Set FLOWMIND_ENV=dev to use development data directory. FLOWMIND_HOME,
/// when set, replaces the whole path.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("FLOWMIND_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FLOWMIND_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("flowmind-dev")
            } else {
                base_dir.join("flowmind")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

fn snapshot_error(path: &Path, message: impl ToString) -> CoreError {
    CoreError::Snapshot {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Read a snapshot file. A missing file yields an empty state.
pub fn load_snapshot(path: &Path) -> Result<AppState> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot yet, starting empty");
            return Ok(AppState::default());
        }
        Err(e) => return Err(snapshot_error(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(AppState::default());
    }
    serde_json::from_str(&content).map_err(|e| snapshot_error(path, e))
}

/// Write a snapshot file, creating parent directories as needed.
pub fn save_snapshot(path: &Path, state: &AppState, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| snapshot_error(path, e))?;
    }
    let content = if pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    std::fs::write(path, content).map_err(|e| snapshot_error(path, e))?;
    debug!(path = %path.display(), tasks = state.raw_tasks.len(), "snapshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    #[test]
    fn missing_snapshot_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_snapshot(&dir.path().join("state.json")).unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn snapshot_roundtrip_through_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let state = AppState {
            raw_tasks: vec![Task::new("1", "Write the changelog").with_context("work")],
            current_context: Some("work".into()),
            ..AppState::default()
        };
        save_snapshot(&path, &state, false).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), state);
    }

    #[test]
    fn malformed_snapshot_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        match load_snapshot(&path) {
            Err(CoreError::Snapshot { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }
}
