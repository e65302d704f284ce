//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! [`DesktopHostContext`] bundles the injected host services (layout storage, preview capture,
//! content registry) with the shell preferences so every side effect runs behind a typed boundary
//! that tests can swap for in-memory adapters.

mod boot;
mod host_ui;
mod persistence_effects;
mod preview_effects;

use std::rc::Rc;

use desktop_app_contract::ContentRegistry;
use leptos::Callback;
use platform_host::{LayoutStore, SnapshotProvider};

use crate::{
    config::ShellPreferences,
    model::{WindowId, WindowRect},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    layout_store: Rc<dyn LayoutStore>,
    snapshots: Rc<dyn SnapshotProvider>,
    content: Rc<ContentRegistry>,
    preferences: ShellPreferences,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self {
            layout_store: Rc::new(platform_host_web::layout_store()),
            snapshots: Rc::new(platform_host_web::snapshot_provider()),
            content: Rc::new(ContentRegistry::new()),
            preferences: ShellPreferences::default(),
        }
    }
}

impl DesktopHostContext {
    /// Builds a host bundle from explicit services.
    pub fn new(
        layout_store: Rc<dyn LayoutStore>,
        snapshots: Rc<dyn SnapshotProvider>,
        content: Rc<ContentRegistry>,
        preferences: ShellPreferences,
    ) -> Self {
        Self {
            layout_store,
            snapshots,
            content,
            preferences,
        }
    }

    /// Replaces the content registry used to mount window bodies.
    pub fn with_content(mut self, content: ContentRegistry) -> Self {
        self.content = Rc::new(content);
        self
    }

    /// Replaces the shell preferences.
    pub fn with_preferences(mut self, preferences: ShellPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn layout_store(&self) -> Rc<dyn LayoutStore> {
        self.layout_store.clone()
    }

    pub fn snapshot_provider(&self) -> Rc<dyn SnapshotProvider> {
        self.snapshots.clone()
    }

    pub fn content_registry(&self) -> Rc<ContentRegistry> {
        self.content.clone()
    }

    pub fn preferences(&self) -> &ShellPreferences {
        &self.preferences
    }

    /// Loads the persisted layout once and hydrates the reducer with it.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistLayout => {
                persistence_effects::persist_layout(self.clone(), runtime)
            }
            RuntimeEffect::FocusWindowInput(window_id) => self.focus_window_input(window_id),
        }
    }

    /// Captures a preview for `window_id` and delivers it through the reducer, then dispatches
    /// `then` (if any) once the capture has settled.
    pub fn capture_preview(
        &self,
        runtime: DesktopRuntimeContext,
        window_id: WindowId,
        then: Option<DesktopAction>,
    ) {
        preview_effects::capture_preview(self.clone(), runtime, window_id, then);
    }

    /// Moves keyboard focus into a window's body.
    pub fn focus_window_input(&self, window_id: WindowId) {
        host_ui::focus_window_input(window_id);
    }

    /// Returns the desktop area available to windows, above the taskbar.
    pub fn desktop_viewport_rect(&self) -> WindowRect {
        host_ui::desktop_viewport_rect(self.preferences.taskbar_height_px)
    }
}
