//! Reducer actions, side-effect intents, and transition logic for the window manager.
//!
//! Every UI intent flows through [`reduce_desktop`], which calls exactly one registry or taskbar
//! operation and reports the side effects the runtime should run afterwards. Intents naming a
//! window that no longer exists fall through as no-ops and emit nothing.

use desktop_app_contract::ContentKind;
use platform_host::PreviewImage;

use crate::{
    model::{
        DesktopState, DragSession, GeometryUpdate, InteractionState, OpenWindowRequest,
        PointerPosition, RectPatch, WindowId,
    },
    persistence::LayoutSnapshot,
    snapshot,
    taskbar::{TaskbarActivation, WorkspaceIsolation},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window (ignored while the workspace is locked down).
    OpenWindow(OpenWindowRequest),
    CloseWindow {
        window_id: WindowId,
    },
    /// Focus and raise a window.
    FocusWindow {
        window_id: WindowId,
    },
    MinimizeWindow {
        window_id: WindowId,
    },
    /// Unhide a minimized window without raising it.
    RestoreWindow {
        window_id: WindowId,
    },
    ToggleMaximize {
        window_id: WindowId,
    },
    UpdateGeometry {
        window_id: WindowId,
        update: GeometryUpdate,
    },
    SetBadge {
        window_id: WindowId,
        count: u32,
    },
    /// Deliver a finished preview capture; dropped when the window has since closed.
    SetPreview {
        window_id: WindowId,
        preview: Option<PreviewImage>,
    },
    /// Taskbar chip click (restore, minimize, or focus).
    ActivateTaskbarEntry {
        window_id: WindowId,
    },
    /// Taskbar chip close button.
    CloseTaskbarEntry {
        window_id: WindowId,
    },
    PinContent {
        kind: ContentKind,
    },
    UnpinContent {
        kind: ContentKind,
    },
    SwitchWorkspace {
        name: String,
        isolation: WorkspaceIsolation,
    },
    ClearWorkspace,
    /// Begin dragging a window by its title bar.
    BeginMove {
        window_id: WindowId,
        pointer: PointerPosition,
    },
    UpdateMove {
        pointer: PointerPosition,
    },
    EndMove,
    /// Mirror the kill switch lockdown flag into desktop state.
    SetLockdown {
        engaged: bool,
    },
    /// Replace the window layout with a persisted snapshot.
    HydrateSnapshot {
        snapshot: LayoutSnapshot,
        max_windows: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current window layout snapshot.
    PersistLayout,
    /// Move keyboard focus into the newly focused window's content.
    FocusWindowInput(WindowId),
}

/// Applies a [`DesktopAction`] and collects the resulting side effects.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(request) => {
            if state.locked_down {
                return effects;
            }
            let window_id = state.registry.open(request);
            effects.push(RuntimeEffect::PersistLayout);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if state.registry.close(&window_id) {
                drop_drag_for(interaction, &window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if state.registry.focus(&window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if state.registry.minimize(&window_id) {
                drop_drag_for(interaction, &window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::RestoreWindow { window_id } => {
            if state.registry.restore(&window_id) {
                effects.push(RuntimeEffect::PersistLayout);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::ToggleMaximize { window_id } => {
            if state.registry.toggle_maximize(&window_id) {
                drop_drag_for(interaction, &window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::UpdateGeometry { window_id, update } => {
            if state.registry.update_geometry(&window_id, update) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::SetBadge { window_id, count } => {
            state.registry.update_badge(&window_id, count);
        }
        DesktopAction::SetPreview { window_id, preview } => {
            snapshot::apply_capture_result(&mut state.registry, &window_id, preview);
        }
        DesktopAction::ActivateTaskbarEntry { window_id } => {
            match state.taskbar.activate(&mut state.registry, &window_id) {
                TaskbarActivation::Restored | TaskbarActivation::Focused => {
                    effects.push(RuntimeEffect::PersistLayout);
                    effects.push(RuntimeEffect::FocusWindowInput(window_id));
                }
                TaskbarActivation::Minimized => {
                    drop_drag_for(interaction, &window_id);
                    effects.push(RuntimeEffect::PersistLayout);
                }
                TaskbarActivation::Ignored => {}
            }
        }
        DesktopAction::CloseTaskbarEntry { window_id } => {
            if state.taskbar.close(&mut state.registry, &window_id) {
                drop_drag_for(interaction, &window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::PinContent { kind } => {
            if state.taskbar.pin(kind) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::UnpinContent { kind } => {
            if state.taskbar.unpin(&kind) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::SwitchWorkspace { name, isolation } => {
            if state
                .taskbar
                .switch_workspace(&mut state.registry, &name, isolation)
            {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ClearWorkspace => {
            if state.taskbar.clear_workspace() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.registry.window(&window_id) else {
                return effects;
            };
            if window.minimized {
                return effects;
            }
            let maximized = window.maximized;
            let rect_start = window.rect;
            if state.registry.focus(&window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id.clone()));
            }
            if !maximized {
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let target = session.rect_start.offset(dx, dy);
                let window_id = session.window_id.clone();
                if !state.registry.contains(&window_id) {
                    interaction.dragging = None;
                    return effects;
                }
                state.registry.update_geometry(
                    &window_id,
                    GeometryUpdate::Patch(RectPatch::position(target.x, target.y)),
                );
            }
        }
        DesktopAction::EndMove => {
            if interaction.dragging.take().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::SetLockdown { engaged } => {
            state.locked_down = engaged;
            if engaged {
                interaction.dragging = None;
            }
        }
        DesktopAction::HydrateSnapshot {
            snapshot,
            max_windows,
        } => {
            let locked_down = state.locked_down;
            let workspaces = state.taskbar.workspaces().to_vec();
            *state = snapshot.into_state(workspaces, max_windows);
            state.locked_down = locked_down;
            interaction.dragging = None;
        }
    }

    effects
}

fn drop_drag_for(interaction: &mut InteractionState, window_id: &WindowId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == *window_id)
    {
        interaction.dragging = None;
    }
}
