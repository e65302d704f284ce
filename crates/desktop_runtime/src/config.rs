//! Shell preferences and the build-time workspace catalog.

use std::time::Duration;

use leptos::logging;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::taskbar::WorkspaceGroup;

include!(concat!(env!("OUT_DIR"), "/workspace_catalog_generated.rs"));

pub const DEFAULT_KILL_SWITCH_HOLD_MS: u64 = 3_000;
pub const DEFAULT_PREVIEW_REFRESH_SECS: u64 = 30;
pub const DEFAULT_TASKBAR_HEIGHT_PX: f64 = 40.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("workspace catalog is malformed: {0}")]
    Catalog(String),
    #[error("unknown workspace `{0}`")]
    UnknownWorkspace(String),
}

/// Parses the generated workspace catalog.
///
/// # Errors
///
/// Returns [`ConfigError::Catalog`] when the generated JSON does not match [`WorkspaceGroup`].
pub fn workspace_catalog() -> Result<Vec<WorkspaceGroup>, ConfigError> {
    serde_json::from_str(WORKSPACE_CATALOG_JSON).map_err(|e| ConfigError::Catalog(e.to_string()))
}

/// Workspace catalog, or no groups at all when the catalog cannot be read.
pub fn default_workspaces() -> Vec<WorkspaceGroup> {
    match workspace_catalog() {
        Ok(groups) => groups,
        Err(err) => {
            logging::warn!("workspace catalog unavailable: {err}");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellPreferences {
    /// Press-and-hold duration before the kill switch asks for confirmation.
    pub kill_switch_hold_ms: u64,
    /// Interval between background preview refreshes of visible windows.
    pub preview_refresh_secs: u64,
    pub restore_on_boot: bool,
    pub max_restore_windows: usize,
    pub taskbar_height_px: f64,
    pub initial_workspace: Option<String>,
}

impl Default for ShellPreferences {
    fn default() -> Self {
        Self {
            kill_switch_hold_ms: DEFAULT_KILL_SWITCH_HOLD_MS,
            preview_refresh_secs: DEFAULT_PREVIEW_REFRESH_SECS,
            restore_on_boot: true,
            max_restore_windows: 12,
            taskbar_height_px: DEFAULT_TASKBAR_HEIGHT_PX,
            initial_workspace: None,
        }
    }
}

impl ShellPreferences {
    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.kill_switch_hold_ms)
    }

    pub fn preview_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.preview_refresh_secs.max(1))
    }

    /// Checks that `initial_workspace`, when set, names a known group.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownWorkspace`] for an unknown group name.
    pub fn validate(&self, workspaces: &[WorkspaceGroup]) -> Result<(), ConfigError> {
        match self.initial_workspace.as_deref() {
            Some(name) if !workspaces.iter().any(|group| group.name == name) => {
                Err(ConfigError::UnknownWorkspace(name.to_string()))
            }
            _ => Ok(()),
        }
    }
}
