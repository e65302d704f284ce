//! Taskbar projection over the window registry plus workspace grouping and icon pinning.

use desktop_app_contract::ContentKind;
use platform_host::PreviewImage;
use serde::{Deserialize, Serialize};

use crate::{
    model::{RiskLevel, WindowId},
    window_manager::WindowRegistry,
};

#[derive(Debug, Clone, PartialEq)]
/// Read-only projection of one open window.
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub content: ContentKind,
    pub risk_level: Option<RiskLevel>,
    pub minimized: bool,
    pub focused: bool,
    pub badge_count: u32,
    pub preview: Option<PreviewImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Registry operation chosen for a taskbar click.
pub enum TaskbarActivation {
    Restored,
    Minimized,
    Focused,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How a workspace switch treats windows outside the selected group.
pub enum WorkspaceIsolation {
    /// Grouping is a label/filter only.
    #[default]
    Advisory,
    /// Windows whose kind is outside the group are minimized.
    MinimizeOthers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Named, declarative set of content kinds.
pub struct WorkspaceGroup {
    pub name: String,
    pub label: String,
    pub kinds: Vec<ContentKind>,
}

impl WorkspaceGroup {
    pub fn contains(&self, kind: &ContentKind) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskbarController {
    workspaces: Vec<WorkspaceGroup>,
    active_workspace: Option<String>,
    pinned: Vec<ContentKind>,
}

impl TaskbarController {
    pub fn new(workspaces: Vec<WorkspaceGroup>) -> Self {
        Self {
            workspaces,
            active_workspace: None,
            pinned: Vec::new(),
        }
    }

    /// Entry identities in open order. Changes only when a window opens or closes.
    pub fn entry_ids(&self, registry: &WindowRegistry) -> Vec<WindowId> {
        registry.windows().iter().map(|w| w.id.clone()).collect()
    }

    /// Resolves the visual data for a single entry.
    pub fn entry(&self, registry: &WindowRegistry, window_id: &WindowId) -> Option<TaskbarEntry> {
        let window = registry.window(window_id)?;
        Some(TaskbarEntry {
            id: window.id.clone(),
            title: window.title.clone(),
            content: window.content.clone(),
            risk_level: window.risk_level,
            minimized: window.minimized,
            focused: registry.is_active(&window.id),
            badge_count: window.badge_count,
            preview: window.preview.clone(),
        })
    }

    pub fn entries(&self, registry: &WindowRegistry) -> Vec<TaskbarEntry> {
        self.entry_ids(registry)
            .iter()
            .filter_map(|id| self.entry(registry, id))
            .collect()
    }

    /// Click on an entry: restore when hidden, hide when already active, otherwise focus.
    pub fn activate(
        &self,
        registry: &mut WindowRegistry,
        window_id: &WindowId,
    ) -> TaskbarActivation {
        let Some(window) = registry.window(window_id) else {
            return TaskbarActivation::Ignored;
        };

        if window.minimized {
            registry.restore(window_id);
            TaskbarActivation::Restored
        } else if registry.is_active(window_id) {
            registry.minimize(window_id);
            TaskbarActivation::Minimized
        } else {
            registry.focus(window_id);
            TaskbarActivation::Focused
        }
    }

    /// Close button on an entry. Never focuses or restores anything else.
    pub fn close(&self, registry: &mut WindowRegistry, window_id: &WindowId) -> bool {
        registry.close(window_id)
    }

    pub fn workspaces(&self) -> &[WorkspaceGroup] {
        &self.workspaces
    }

    pub fn active_workspace(&self) -> Option<&WorkspaceGroup> {
        let name = self.active_workspace.as_deref()?;
        self.workspaces.iter().find(|group| group.name == name)
    }

    /// Selects a named group. Unknown names are ignored.
    pub fn set_workspace(&mut self, name: &str) -> bool {
        if !self.workspaces.iter().any(|group| group.name == name) {
            return false;
        }
        if self.active_workspace.as_deref() == Some(name) {
            return false;
        }
        self.active_workspace = Some(name.to_string());
        true
    }

    /// Selects a named group and applies `isolation` to windows outside it.
    ///
    /// Returns whether the selection or any window's visibility changed.
    pub fn switch_workspace(
        &mut self,
        registry: &mut WindowRegistry,
        name: &str,
        isolation: WorkspaceIsolation,
    ) -> bool {
        if !self.workspaces.iter().any(|group| group.name == name) {
            return false;
        }
        let mut changed = self.set_workspace(name);
        if isolation == WorkspaceIsolation::MinimizeOthers {
            let outside: Vec<WindowId> = registry
                .windows()
                .iter()
                .filter(|w| !self.active_workspace().is_some_and(|g| g.contains(&w.content)))
                .map(|w| w.id.clone())
                .collect();
            for window_id in &outside {
                changed |= registry.minimize(window_id);
            }
        }
        changed
    }

    /// Returns to the unfiltered view.
    pub fn clear_workspace(&mut self) -> bool {
        self.active_workspace.take().is_some()
    }

    /// Ids of windows whose kind belongs to the active workspace; all windows when none is active.
    pub fn active_workspace_windows(&self, registry: &WindowRegistry) -> Vec<WindowId> {
        let group = self.active_workspace();
        registry
            .windows()
            .iter()
            .filter(|w| group.map_or(true, |g| g.contains(&w.content)))
            .map(|w| w.id.clone())
            .collect()
    }

    pub fn pin(&mut self, kind: ContentKind) -> bool {
        if self.is_pinned(&kind) {
            return false;
        }
        self.pinned.push(kind);
        true
    }

    pub fn unpin(&mut self, kind: &ContentKind) -> bool {
        let before = self.pinned.len();
        self.pinned.retain(|k| k != kind);
        self.pinned.len() != before
    }

    pub fn pinned(&self) -> &[ContentKind] {
        &self.pinned
    }

    pub fn is_pinned(&self, kind: &ContentKind) -> bool {
        self.pinned.iter().any(|k| k == kind)
    }

    /// Number of open windows of `kind`; zero is valid for a pinned icon.
    pub fn open_count(&self, registry: &WindowRegistry, kind: &ContentKind) -> usize {
        registry
            .windows()
            .iter()
            .filter(|w| w.content == *kind)
            .count()
    }

    pub(crate) fn restore_selection(
        &mut self,
        pinned: Vec<ContentKind>,
        active_workspace: Option<String>,
    ) {
        self.pinned.clear();
        for kind in pinned {
            self.pin(kind);
        }
        self.active_workspace = None;
        if let Some(name) = active_workspace {
            self.set_workspace(&name);
        }
    }

    pub(crate) fn active_workspace_name(&self) -> Option<&str> {
        self.active_workspace.as_deref()
    }
}
