//! Window manager runtime for the operator dashboard: window registry, taskbar, kill switch,
//! layout persistence, and the Leptos shell that renders them.

pub mod components;
pub mod config;
mod effect_executor;
pub mod host;
pub mod kill_switch;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod shell;
pub mod snapshot;
pub mod taskbar;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, ShellPreferences};
pub use host::DesktopHostContext;
pub use kill_switch::{
    ArmingTicket, HoldProgress, KillSwitchController, KillSwitchState, PressOutcome,
};
pub use model::*;
pub use persistence::{load_layout, save_layout, LayoutSnapshot, PersistedWindow, PersistenceError};
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use shell::{build_shell_frame, ShellFrame, WindowPlacement};
pub use taskbar::{TaskbarController, TaskbarEntry, WorkspaceGroup, WorkspaceIsolation};
pub use window_manager::WindowRegistry;
