//! Window layout snapshots and their save/load path through the host layout store.

use desktop_app_contract::ContentKind;
use platform_host::{
    build_layout_envelope, decode_layout_payload, LayoutEnvelope, LayoutStore,
    WINDOW_LAYOUT_NAMESPACE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    model::{DesktopState, RiskLevel, WindowId, WindowRecord, WindowRect},
    taskbar::{TaskbarController, WorkspaceGroup},
    window_manager::WindowRegistry,
};

/// Current schema version for persisted window layouts.
pub const LAYOUT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize layout: {0}")]
    Serialize(String),
    #[error("layout store error: {0}")]
    Store(String),
    #[error("unsupported layout schema version {found} (expected at most {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
    #[error("failed to decode layout: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Durable subset of a [`WindowRecord`]. Previews and badge counts are session-only.
pub struct PersistedWindow {
    pub id: WindowId,
    pub title: String,
    pub rect: WindowRect,
    pub z_index: u64,
    #[serde(default)]
    pub minimized: bool,
    #[serde(default)]
    pub maximized: bool,
    pub content: ContentKind,
    #[serde(default)]
    pub props: Value,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
}

impl From<&WindowRecord> for PersistedWindow {
    fn from(window: &WindowRecord) -> Self {
        Self {
            id: window.id.clone(),
            title: window.title.clone(),
            rect: window.rect,
            z_index: window.z_index,
            minimized: window.minimized,
            maximized: window.maximized,
            content: window.content.clone(),
            props: window.props.clone(),
            risk_level: window.risk_level,
        }
    }
}

impl From<PersistedWindow> for WindowRecord {
    fn from(window: PersistedWindow) -> Self {
        Self {
            id: window.id,
            title: window.title,
            rect: window.rect,
            z_index: window.z_index,
            minimized: window.minimized,
            maximized: window.maximized,
            content: window.content,
            props: window.props,
            risk_level: window.risk_level,
            preview: None,
            badge_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Serializable window layout persisted under [`WINDOW_LAYOUT_NAMESPACE`].
pub struct LayoutSnapshot {
    pub schema_version: u32,
    pub next_window_seq: u64,
    pub z_counter: u64,
    pub active_window: Option<WindowId>,
    pub windows: Vec<PersistedWindow>,
    pub pinned: Vec<ContentKind>,
    pub active_workspace: Option<String>,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            schema_version: LAYOUT_SCHEMA_VERSION,
            next_window_seq: 0,
            z_counter: 0,
            active_window: None,
            windows: Vec::new(),
            pinned: Vec::new(),
            active_workspace: None,
        }
    }
}

impl LayoutSnapshot {
    /// Rebuilds desktop state, keeping at most `max_windows` of the top-ranked windows in their
    /// original open order.
    ///
    /// Registry invariants are re-established by [`WindowRegistry::hydrate`], so a hand-edited or
    /// partially corrupt snapshot still yields a consistent state.
    pub fn into_state(self, workspaces: Vec<WorkspaceGroup>, max_windows: usize) -> DesktopState {
        let mut windows: Vec<PersistedWindow> = Vec::with_capacity(self.windows.len());
        for window in self.windows {
            if windows.iter().all(|w| w.id != window.id) {
                windows.push(window);
            }
        }
        if windows.len() > max_windows {
            let mut ranked: Vec<(u64, WindowId)> =
                windows.iter().map(|w| (w.z_index, w.id.clone())).collect();
            ranked.sort_by(|a, b| b.0.cmp(&a.0));
            ranked.truncate(max_windows);
            windows.retain(|w| ranked.iter().any(|(_, id)| *id == w.id));
        }
        let records: Vec<WindowRecord> = windows.into_iter().map(WindowRecord::from).collect();

        let mut taskbar = TaskbarController::new(workspaces);
        taskbar.restore_selection(self.pinned, self.active_workspace);

        DesktopState {
            registry: WindowRegistry::hydrate(
                records,
                self.active_window,
                self.z_counter,
                self.next_window_seq,
            ),
            taskbar,
            locked_down: false,
        }
    }
}

impl DesktopState {
    /// Captures the durable part of the current layout.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            schema_version: LAYOUT_SCHEMA_VERSION,
            next_window_seq: self.registry.next_window_seq(),
            z_counter: self.registry.z_counter(),
            active_window: self.registry.active_id().cloned(),
            windows: self
                .registry
                .windows()
                .iter()
                .map(PersistedWindow::from)
                .collect(),
            pinned: self.taskbar.pinned().to_vec(),
            active_workspace: self
                .taskbar
                .active_workspace_name()
                .map(str::to_string),
        }
    }
}

fn migrate_layout_snapshot(envelope: &LayoutEnvelope) -> Result<LayoutSnapshot, PersistenceError> {
    match envelope.schema_version {
        0 | LAYOUT_SCHEMA_VERSION => {
            let mut snapshot: LayoutSnapshot =
                decode_layout_payload(envelope).map_err(PersistenceError::Decode)?;
            snapshot.schema_version = LAYOUT_SCHEMA_VERSION;
            Ok(snapshot)
        }
        found => Err(PersistenceError::UnsupportedSchema {
            found,
            supported: LAYOUT_SCHEMA_VERSION,
        }),
    }
}

/// Persists the current layout through `store`.
///
/// # Errors
///
/// Returns [`PersistenceError`] when the snapshot cannot be serialized or the store rejects it.
pub async fn save_layout(
    store: &dyn LayoutStore,
    state: &DesktopState,
) -> Result<(), PersistenceError> {
    let envelope = build_layout_envelope(
        WINDOW_LAYOUT_NAMESPACE,
        LAYOUT_SCHEMA_VERSION,
        &state.snapshot(),
    )
    .map_err(PersistenceError::Serialize)?;
    store
        .save_layout(&envelope)
        .await
        .map_err(PersistenceError::Store)
}

/// Loads and migrates the persisted layout, if any.
///
/// # Errors
///
/// Returns [`PersistenceError`] when the store fails, the payload is malformed, or the schema
/// version is newer than this build understands.
pub async fn load_layout(
    store: &dyn LayoutStore,
) -> Result<Option<LayoutSnapshot>, PersistenceError> {
    let Some(envelope) = store
        .load_layout(WINDOW_LAYOUT_NAMESPACE)
        .await
        .map_err(PersistenceError::Store)?
    else {
        return Ok(None);
    };
    migrate_layout_snapshot(&envelope).map(Some)
}

/// Loads the boot layout, logging and discarding any failure.
pub async fn load_boot_layout(store: &dyn LayoutStore) -> Option<LayoutSnapshot> {
    match load_layout(store).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            leptos::logging::warn!("window layout load failed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryLayoutStore, PreviewImage};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{GeometryUpdate, OpenWindowRequest, RectPatch};

    fn kind(raw: &str) -> ContentKind {
        ContentKind::trusted(raw)
    }

    fn workspaces() -> Vec<WorkspaceGroup> {
        vec![WorkspaceGroup {
            name: "markets".to_string(),
            label: "Markets".to_string(),
            kinds: vec![kind("market.watchlist")],
        }]
    }

    fn populated_state() -> DesktopState {
        let mut state = DesktopState::new(TaskbarController::new(workspaces()));
        let a = state
            .registry
            .open(OpenWindowRequest::new(kind("market.watchlist")).with_title("Watchlist"));
        let b = state.registry.open(
            OpenWindowRequest::new(kind("admin.users")).with_props(json!({ "tab": "roles" })),
        );
        let c = state.registry.open(OpenWindowRequest::new(kind("macro.charts")));
        state.registry.update_geometry(
            &a,
            GeometryUpdate::Patch(RectPatch::position(300.0, 200.0)),
        );
        state.registry.toggle_maximize(&b);
        state.registry.minimize(&c);
        state.registry.update_badge(&a, 5);
        state
            .registry
            .update_snapshot(&b, Some(PreviewImage::new("data:image/png;base64,AA", 8, 6)));
        state.taskbar.pin(kind("market.watchlist"));
        state.taskbar.set_workspace("markets");
        state
    }

    #[test]
    fn round_trip_restores_layout_and_resets_session_fields() {
        let state = populated_state();
        let store = MemoryLayoutStore::default();

        block_on(save_layout(&store, &state)).expect("save");
        let snapshot = block_on(load_layout(&store))
            .expect("load")
            .expect("snapshot present");
        let restored = snapshot.into_state(workspaces(), 12);

        assert_eq!(restored.registry.len(), state.registry.len());
        for original in state.registry.windows() {
            let window = restored.registry.window(&original.id).expect("window");
            assert_eq!(window.rect, original.rect);
            assert_eq!(window.z_index, original.z_index);
            assert_eq!(window.minimized, original.minimized);
            assert_eq!(window.maximized, original.maximized);
            assert_eq!(window.props, original.props);
            assert_eq!(window.preview, None);
            assert_eq!(window.badge_count, 0);
        }
        assert_eq!(restored.registry.active_id(), state.registry.active_id());
        assert_eq!(restored.registry.z_counter(), state.registry.z_counter());
        assert_eq!(restored.taskbar.pinned(), state.taskbar.pinned());
        assert_eq!(
            restored.taskbar.active_workspace().map(|g| g.name.as_str()),
            Some("markets")
        );
    }

    #[test]
    fn restored_registry_keeps_allocating_fresh_ids_and_ranks() {
        let state = populated_state();
        let mut restored = state.snapshot().into_state(workspaces(), 12);
        let top = restored.registry.z_counter();

        let id = restored
            .registry
            .open(OpenWindowRequest::new(kind("market.watchlist")));

        assert!(state.registry.window(&id).is_none());
        assert!(restored.registry.window(&id).expect("new").z_index > top);
    }

    #[test]
    fn empty_store_loads_nothing() {
        let store = MemoryLayoutStore::default();
        assert_eq!(block_on(load_layout(&store)).expect("load"), None);
    }

    #[test]
    fn schema_zero_payload_migrates_with_defaults() {
        let store = MemoryLayoutStore::default();
        let envelope = LayoutEnvelope::new(
            WINDOW_LAYOUT_NAMESPACE,
            0,
            json!({
                "windows": [{
                    "id": "legacy",
                    "title": "Legacy",
                    "rect": { "x": 1.0, "y": 2.0, "w": 300.0, "h": 200.0 },
                    "z_index": 4,
                    "content": "market.watchlist"
                }]
            }),
        );
        block_on(store.save_layout(&envelope)).expect("seed");

        let snapshot = block_on(load_layout(&store)).expect("load").expect("snapshot");
        assert_eq!(snapshot.schema_version, LAYOUT_SCHEMA_VERSION);
        let state = snapshot.into_state(Vec::new(), 12);
        let window = state.registry.window(&WindowId::from("legacy")).expect("legacy");
        assert!(!window.minimized);
        assert_eq!(state.registry.z_counter(), 4);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let store = MemoryLayoutStore::default();
        let envelope = LayoutEnvelope::new(WINDOW_LAYOUT_NAMESPACE, 9, json!({}));
        block_on(store.save_layout(&envelope)).expect("seed");

        let err = block_on(load_layout(&store)).expect_err("newer schema");
        assert!(matches!(
            err,
            PersistenceError::UnsupportedSchema { found: 9, .. }
        ));
        assert_eq!(block_on(load_boot_layout(&store)), None);
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let store = MemoryLayoutStore::default();
        let envelope = LayoutEnvelope::new(
            WINDOW_LAYOUT_NAMESPACE,
            LAYOUT_SCHEMA_VERSION,
            json!({ "windows": "nope" }),
        );
        block_on(store.save_layout(&envelope)).expect("seed");

        assert!(matches!(
            block_on(load_layout(&store)),
            Err(PersistenceError::Decode(_))
        ));
    }

    #[test]
    fn restore_limit_keeps_top_ranked_windows() {
        let state = populated_state();
        let mut snapshot = state.snapshot();
        let keep = snapshot
            .windows
            .iter()
            .max_by_key(|w| w.z_index)
            .map(|w| w.id.clone())
            .expect("top");
        snapshot.active_window = None;

        let restored = snapshot.into_state(workspaces(), 1);
        assert_eq!(restored.registry.len(), 1);
        assert!(restored.registry.contains(&keep));
    }

    #[test]
    fn restore_limit_keeps_open_order_of_survivors() {
        let mut state = DesktopState::new(TaskbarController::new(workspaces()));
        let mut ids = Vec::new();
        for title in ["a", "b", "c", "d"] {
            let request = OpenWindowRequest::new(kind("macro.charts")).with_title(title);
            ids.push(state.registry.open(request));
        }

        let restored = state.snapshot().into_state(workspaces(), 3);
        assert_eq!(restored.taskbar.entry_ids(&restored.registry), ids[1..].to_vec());
    }

    #[test]
    fn restore_limit_counts_unique_windows_only() {
        let mut state = DesktopState::new(TaskbarController::new(workspaces()));
        let ids: Vec<WindowId> = (0..3)
            .map(|_| state.registry.open(OpenWindowRequest::new(kind("macro.charts"))))
            .collect();
        let mut snapshot = state.snapshot();
        let duplicate = snapshot.windows[2].clone();
        snapshot.windows.push(duplicate);

        let restored = snapshot.into_state(workspaces(), 2);
        assert_eq!(
            restored.taskbar.entry_ids(&restored.registry),
            vec![ids[1].clone(), ids[2].clone()]
        );
    }

    #[test]
    fn corrupt_active_pointer_is_dropped_on_hydrate() {
        let mut snapshot = populated_state().snapshot();
        let minimized = snapshot
            .windows
            .iter()
            .find(|w| w.minimized)
            .map(|w| w.id.clone())
            .expect("minimized window");
        snapshot.active_window = Some(minimized);
        let duplicate = snapshot.windows[0].clone();
        snapshot.windows.push(duplicate);

        let restored = snapshot.into_state(workspaces(), 12);
        assert_eq!(restored.registry.active_id(), None);
        assert_eq!(restored.registry.len(), 3);
    }
}
