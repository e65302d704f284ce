//! Pure render plan for one paint of the desktop shell.
//!
//! [`build_shell_frame`] turns runtime state into plain data the view layer iterates over, which
//! keeps every layout decision (stacking, maximized geometry, preview fallback, lockdown) testable
//! without a DOM.

use desktop_app_contract::ContentKind;
use platform_host::PreviewImage;

use crate::{
    kill_switch::{KillSwitchController, KillSwitchState},
    model::{DesktopState, RiskLevel, WindowId, WindowRect},
    taskbar::TaskbarEntry,
};

#[derive(Debug, Clone, PartialEq)]
/// What a taskbar chip or window thumbnail shows.
pub enum PreviewState {
    Ready(PreviewImage),
    Placeholder,
}

impl From<Option<PreviewImage>> for PreviewState {
    fn from(preview: Option<PreviewImage>) -> Self {
        preview.map_or(Self::Placeholder, Self::Ready)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One visible window, positioned for rendering.
pub struct WindowPlacement {
    pub id: WindowId,
    pub title: String,
    /// Effective geometry: the viewport for maximized windows, the stored rect otherwise.
    pub rect: WindowRect,
    pub z_index: u64,
    pub focused: bool,
    pub maximized: bool,
    pub risk_class: &'static str,
    pub content: ContentKind,
    /// `false` when a workspace is selected and this window's kind is outside it.
    pub in_workspace: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskbarChip {
    pub entry: TaskbarEntry,
    pub risk_class: &'static str,
    pub preview: PreviewState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinnedLauncher {
    pub kind: ContentKind,
    pub open_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceTab {
    pub name: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// Everything the shell paints in one frame.
pub struct ShellFrame {
    /// Visible windows, back to front.
    pub windows: Vec<WindowPlacement>,
    pub taskbar: Vec<TaskbarChip>,
    pub pinned: Vec<PinnedLauncher>,
    pub workspaces: Vec<WorkspaceTab>,
    pub kill_switch: KillSwitchState,
    /// When set the window layer is rendered inert.
    pub locked_down: bool,
}

/// CSS class for a window's risk tag.
pub fn risk_class(risk_level: Option<RiskLevel>) -> &'static str {
    match risk_level {
        None => "risk-none",
        Some(RiskLevel::Low) => "risk-low",
        Some(RiskLevel::Medium) => "risk-medium",
        Some(RiskLevel::High) => "risk-high",
    }
}

/// Derives the render plan for `state`.
pub fn build_shell_frame(
    state: &DesktopState,
    kill_switch: &KillSwitchController,
    viewport: WindowRect,
) -> ShellFrame {
    let registry = &state.registry;
    let workspace = state.taskbar.active_workspace();

    let windows = registry
        .windows_by_rank()
        .into_iter()
        .filter(|window| !window.minimized)
        .map(|window| WindowPlacement {
            id: window.id.clone(),
            title: window.title.clone(),
            rect: if window.maximized {
                viewport
            } else {
                window.rect
            },
            z_index: window.z_index,
            focused: registry.is_active(&window.id),
            maximized: window.maximized,
            risk_class: risk_class(window.risk_level),
            content: window.content.clone(),
            in_workspace: workspace.map_or(true, |group| group.contains(&window.content)),
        })
        .collect();

    let taskbar = state
        .taskbar
        .entries(registry)
        .into_iter()
        .map(|entry| TaskbarChip {
            risk_class: risk_class(entry.risk_level),
            preview: PreviewState::from(entry.preview.clone()),
            entry,
        })
        .collect();

    let pinned = state
        .taskbar
        .pinned()
        .iter()
        .map(|kind| PinnedLauncher {
            kind: kind.clone(),
            open_count: state.taskbar.open_count(registry, kind),
        })
        .collect();

    let workspaces = state
        .taskbar
        .workspaces()
        .iter()
        .map(|group| WorkspaceTab {
            name: group.name.clone(),
            label: group.label.clone(),
            active: workspace.is_some_and(|active| active.name == group.name),
        })
        .collect();

    ShellFrame {
        windows,
        taskbar,
        pinned,
        workspaces,
        kill_switch: kill_switch.state(),
        locked_down: state.locked_down || kill_switch.is_locked_down(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::OpenWindowRequest,
        taskbar::{TaskbarController, WorkspaceGroup},
    };

    const VIEWPORT: WindowRect = WindowRect {
        x: 0.0,
        y: 0.0,
        w: 1280.0,
        h: 760.0,
    };

    fn state() -> DesktopState {
        DesktopState::new(TaskbarController::new(vec![WorkspaceGroup {
            name: "markets".to_string(),
            label: "Markets".to_string(),
            kinds: vec![ContentKind::trusted("market.watchlist")],
        }]))
    }

    fn open(state: &mut DesktopState, id: &str, kind: &str) -> WindowId {
        state
            .registry
            .open(OpenWindowRequest::new(ContentKind::trusted(kind)).with_id(id))
    }

    #[test]
    fn visible_windows_are_stacked_back_to_front() {
        let mut state = state();
        let a = open(&mut state, "a", "market.watchlist");
        open(&mut state, "b", "market.watchlist");
        open(&mut state, "c", "admin.users");
        state.registry.focus(&a);
        state.registry.minimize(&WindowId::from("c"));

        let frame = build_shell_frame(&state, &KillSwitchController::default(), VIEWPORT);

        let ids: Vec<&str> = frame.windows.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(frame.windows[1].focused);
        assert!(!frame.windows[0].focused);
        assert_eq!(frame.taskbar.len(), 3);
    }

    #[test]
    fn maximized_window_fills_viewport_but_keeps_stored_rect() {
        let mut state = state();
        let a = open(&mut state, "a", "market.watchlist");
        let stored = state.registry.window(&a).expect("a").rect;
        state.registry.toggle_maximize(&a);

        let frame = build_shell_frame(&state, &KillSwitchController::default(), VIEWPORT);
        assert_eq!(frame.windows[0].rect, VIEWPORT);
        assert_eq!(state.registry.window(&a).expect("a").rect, stored);

        state.registry.toggle_maximize(&a);
        let frame = build_shell_frame(&state, &KillSwitchController::default(), VIEWPORT);
        assert_eq!(frame.windows[0].rect, stored);
    }

    #[test]
    fn missing_previews_render_as_placeholders() {
        let mut state = state();
        let a = open(&mut state, "a", "market.watchlist");
        open(&mut state, "b", "market.watchlist");
        let image = PreviewImage::new("data:image/png;base64,AA", 4, 3);
        state.registry.update_snapshot(&a, Some(image.clone()));

        let frame = build_shell_frame(&state, &KillSwitchController::default(), VIEWPORT);
        let previews: Vec<PreviewState> = frame.taskbar.iter().map(|c| c.preview.clone()).collect();
        assert_eq!(
            previews,
            vec![PreviewState::Ready(image), PreviewState::Placeholder]
        );
    }

    #[test]
    fn workspace_selection_marks_outside_windows() {
        let mut state = state();
        open(&mut state, "a", "market.watchlist");
        open(&mut state, "b", "admin.users");
        state.taskbar.set_workspace("markets");

        let frame = build_shell_frame(&state, &KillSwitchController::default(), VIEWPORT);
        let flags: Vec<(&str, bool)> = frame
            .windows
            .iter()
            .map(|w| (w.id.as_str(), w.in_workspace))
            .collect();
        assert_eq!(flags, vec![("a", true), ("b", false)]);
        assert_eq!(
            frame.workspaces,
            vec![WorkspaceTab {
                name: "markets".to_string(),
                label: "Markets".to_string(),
                active: true,
            }]
        );
    }

    #[test]
    fn pinned_launchers_report_zero_when_nothing_is_open() {
        let mut state = state();
        state.taskbar.pin(ContentKind::trusted("research.notebook"));

        let frame = build_shell_frame(&state, &KillSwitchController::default(), VIEWPORT);
        assert_eq!(
            frame.pinned,
            vec![PinnedLauncher {
                kind: ContentKind::trusted("research.notebook"),
                open_count: 0,
            }]
        );
    }

    #[test]
    fn confirmed_kill_switch_locks_the_frame() {
        let state = state();
        let mut kill_switch = KillSwitchController::default();
        let ticket = kill_switch.start_arming().expect("ticket");
        kill_switch.request_confirmation(ticket);
        kill_switch.confirm();

        let frame = build_shell_frame(&state, &kill_switch, VIEWPORT);
        assert!(frame.locked_down);
        assert_eq!(frame.kill_switch, KillSwitchState::Active);
    }

    #[test]
    fn risk_tags_map_to_classes() {
        assert_eq!(risk_class(None), "risk-none");
        assert_eq!(risk_class(Some(RiskLevel::High)), "risk-high");
    }
}
