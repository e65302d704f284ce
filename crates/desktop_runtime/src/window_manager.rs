//! Authoritative window collection with monotonic z-order and focus bookkeeping.
//!
//! Every operation that names a window is a silent no-op when the id is unknown: UI intents can
//! race with a close that already happened, so an unknown id is an expected input, not an error.
//! Mutating operations return `true` when state changed.

use platform_host::PreviewImage;

use crate::model::{
    GeometryUpdate, OpenWindowRequest, WindowId, WindowRecord, WindowRect, DEFAULT_WINDOW_TITLE,
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    active: Option<WindowId>,
    /// Last z-order rank handed out. Never decremented.
    z_counter: u64,
    /// Sequence used for generated `win-<n>` identifiers.
    next_window_seq: u64,
    /// Number of windows opened without an explicit position, for cascading.
    cascade_count: usize,
}

impl WindowRegistry {
    /// Opens a window and makes it active, returning its id.
    ///
    /// A caller-supplied id that is already open does not create a second window: the existing
    /// window is restored and focused instead, and its id is returned.
    pub fn open(&mut self, request: OpenWindowRequest) -> WindowId {
        if let Some(existing) = request.id.as_ref().filter(|id| self.contains(id)) {
            let existing = existing.clone();
            if let Some(window) = self.window_mut(&existing) {
                window.minimized = false;
            }
            self.bring_to_front(&existing);
            return existing;
        }

        let id = match request.id {
            Some(id) => id,
            None => self.generate_id(),
        };
        let base = if request.rect.x.is_none() && request.rect.y.is_none() {
            let slot = self.cascade_count;
            self.cascade_count = self.cascade_count.wrapping_add(1);
            WindowRect::cascade(slot)
        } else {
            WindowRect::default()
        };
        let rect = request
            .rect
            .merge_onto(base)
            .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
        let z_index = self.next_rank();

        self.windows.push(WindowRecord {
            id: id.clone(),
            title: request
                .title
                .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string()),
            rect,
            z_index,
            minimized: false,
            maximized: false,
            content: request.content,
            props: request.props,
            risk_level: request.risk_level,
            preview: None,
            badge_count: 0,
        });
        self.active = Some(id.clone());
        id
    }

    /// Removes a window. Clears the active pointer when it was active; no replacement is chosen.
    pub fn close(&mut self, window_id: &WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != *window_id);
        if self.windows.len() == before {
            return false;
        }
        if self.active.as_ref() == Some(window_id) {
            self.active = None;
        }
        true
    }

    /// Raises a window to a fresh top rank and makes it active.
    ///
    /// No-op when the window is already active. A minimized window cannot become active, so
    /// focusing one is ignored; use [`Self::restore`] to unhide it first.
    pub fn focus(&mut self, window_id: &WindowId) -> bool {
        if self.active.as_ref() == Some(window_id) {
            return false;
        }
        match self.window(window_id) {
            Some(window) if !window.minimized => {}
            _ => return false,
        }
        self.bring_to_front(window_id);
        true
    }

    pub fn minimize(&mut self, window_id: &WindowId) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        let changed = !window.minimized;
        window.minimized = true;
        if self.active.as_ref() == Some(window_id) {
            self.active = None;
            return true;
        }
        changed
    }

    /// Unhides a window and makes it active without touching its rank.
    pub fn restore(&mut self, window_id: &WindowId) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        let changed = window.minimized;
        window.minimized = false;
        changed | self.set_active(window_id)
    }

    /// Flips the maximized flag and makes the window active. Stored geometry is kept.
    pub fn toggle_maximize(&mut self, window_id: &WindowId) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        window.maximized = !window.maximized;
        window.minimized = false;
        self.set_active(window_id);
        true
    }

    /// Merges a drag delta or absolute patch into the window's stored geometry.
    pub fn update_geometry(&mut self, window_id: &WindowId, update: GeometryUpdate) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        let next = window.rect.apply(update);
        if next == window.rect {
            return false;
        }
        window.rect = next;
        true
    }

    pub fn update_badge(&mut self, window_id: &WindowId, count: u32) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        let changed = window.badge_count != count;
        window.badge_count = count;
        changed
    }

    pub fn update_snapshot(&mut self, window_id: &WindowId, preview: Option<PreviewImage>) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        let changed = window.preview != preview;
        window.preview = preview;
        changed
    }

    /// Windows in insertion order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Windows sorted by ascending rank (bottom of the stack first).
    pub fn windows_by_rank(&self) -> Vec<&WindowRecord> {
        let mut windows: Vec<&WindowRecord> = self.windows.iter().collect();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == *window_id)
    }

    pub fn active_id(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, window_id: &WindowId) -> bool {
        self.active.as_ref() == Some(window_id)
    }

    pub fn contains(&self, window_id: &WindowId) -> bool {
        self.window(window_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Last rank handed out by the registry.
    pub fn z_counter(&self) -> u64 {
        self.z_counter
    }

    pub(crate) fn next_window_seq(&self) -> u64 {
        self.next_window_seq
    }

    /// Rebuilds a registry from persisted parts, re-establishing every invariant.
    ///
    /// Duplicate ids keep their first occurrence, the active pointer is dropped when it names a
    /// missing or minimized window, and the rank counter never falls below a persisted rank.
    pub(crate) fn hydrate(
        windows: Vec<WindowRecord>,
        active: Option<WindowId>,
        z_counter: u64,
        next_window_seq: u64,
    ) -> Self {
        let mut unique: Vec<WindowRecord> = Vec::with_capacity(windows.len());
        for window in windows {
            if unique.iter().all(|w| w.id != window.id) {
                unique.push(window);
            }
        }
        let max_rank = unique.iter().map(|w| w.z_index).max().unwrap_or(0);
        let active = active.filter(|id| unique.iter().any(|w| w.id == *id && !w.minimized));
        let cascade_count = unique.len();

        Self {
            windows: unique,
            active,
            z_counter: z_counter.max(max_rank),
            next_window_seq,
            cascade_count,
        }
    }

    fn window_mut(&mut self, window_id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == *window_id)
    }

    fn bring_to_front(&mut self, window_id: &WindowId) {
        let rank = self.next_rank();
        if let Some(window) = self.window_mut(window_id) {
            window.z_index = rank;
        }
        self.active = Some(window_id.clone());
    }

    fn set_active(&mut self, window_id: &WindowId) -> bool {
        if self.active.as_ref() == Some(window_id) {
            return false;
        }
        self.active = Some(window_id.clone());
        true
    }

    fn next_rank(&mut self) -> u64 {
        let highest = self.windows.iter().map(|w| w.z_index).max().unwrap_or(0);
        let next = highest.max(self.z_counter).saturating_add(1);
        self.z_counter = next;
        next
    }

    fn generate_id(&mut self) -> WindowId {
        loop {
            self.next_window_seq = self.next_window_seq.saturating_add(1);
            let candidate = WindowId::new(format!("win-{}", self.next_window_seq));
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ContentKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{RectPatch, RiskLevel};

    fn request(id: &str) -> OpenWindowRequest {
        OpenWindowRequest::new(ContentKind::trusted("market.watchlist"))
            .with_id(id)
            .with_title(id.to_uppercase())
    }

    fn rank(registry: &WindowRegistry, id: &str) -> u64 {
        registry.window(&WindowId::from(id)).expect("window").z_index
    }

    #[test]
    fn open_assigns_unique_ids_and_strictly_increasing_ranks() {
        let mut registry = WindowRegistry::default();
        let kind = ContentKind::trusted("research.notebook");
        let mut ids = Vec::new();
        let mut ranks = Vec::new();
        for _ in 0..5 {
            let id = registry.open(OpenWindowRequest::new(kind.clone()));
            ranks.push(registry.window(&id).expect("window").z_index);
            ids.push(id);
        }

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
        assert!(ranks.windows(2).all(|pair| pair[1] > pair[0]));
        assert_eq!(registry.active_id(), ids.last());
    }

    #[test]
    fn open_applies_defaults_and_partial_geometry() {
        let mut registry = WindowRegistry::default();
        let plain = registry.open(OpenWindowRequest::new(ContentKind::trusted("macro.charts")));
        let sized = registry.open(
            OpenWindowRequest::new(ContentKind::trusted("macro.charts"))
                .with_rect(RectPatch::size(100.0, 900.0))
                .with_risk(RiskLevel::High),
        );

        let plain = registry.window(&plain).expect("plain");
        assert_eq!(plain.title, DEFAULT_WINDOW_TITLE);
        assert_eq!(plain.rect, WindowRect::cascade(0));
        assert!(!plain.minimized && !plain.maximized);
        assert_eq!(plain.badge_count, 0);

        let sized = registry.window(&sized).expect("sized");
        assert_eq!(sized.rect.x, WindowRect::cascade(1).x);
        assert_eq!(sized.rect.w, MIN_WINDOW_WIDTH);
        assert_eq!(sized.rect.h, 900.0);
        assert_eq!(sized.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn generated_ids_skip_caller_supplied_collisions() {
        let mut registry = WindowRegistry::default();
        registry.open(request("win-1"));
        let generated = registry.open(OpenWindowRequest::new(ContentKind::trusted("admin.users")));
        assert_eq!(generated, WindowId::from("win-2"));
    }

    #[test]
    fn reopening_an_existing_id_focuses_instead_of_duplicating() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));
        registry.minimize(&WindowId::from("a"));

        let id = registry.open(request("a"));

        assert_eq!(id, WindowId::from("a"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_id(), Some(&id));
        assert!(!registry.window(&id).expect("a").minimized);
        assert!(rank(&registry, "a") > rank(&registry, "b"));
    }

    #[test]
    fn focus_on_active_window_keeps_rank() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        let before = rank(&registry, "a");
        let counter = registry.z_counter();

        assert!(!registry.focus(&WindowId::from("a")));
        assert_eq!(rank(&registry, "a"), before);
        assert_eq!(registry.z_counter(), counter);
    }

    #[test]
    fn minimize_or_close_of_active_window_clears_pointer() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));

        assert!(registry.minimize(&WindowId::from("b")));
        assert_eq!(registry.active_id(), None);

        registry.restore(&WindowId::from("b"));
        assert!(registry.close(&WindowId::from("b")));
        assert_eq!(registry.active_id(), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn closing_an_inactive_window_keeps_the_active_pointer() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));

        registry.close(&WindowId::from("a"));
        assert_eq!(registry.active_id(), Some(&WindowId::from("b")));
    }

    #[test]
    fn restore_unhides_and_activates_regardless_of_maximized() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));
        let a = WindowId::from("a");

        registry.toggle_maximize(&a);
        registry.minimize(&a);
        assert!(registry.restore(&a));

        let window = registry.window(&a).expect("a");
        assert!(!window.minimized);
        assert!(window.maximized);
        assert_eq!(registry.active_id(), Some(&a));
    }

    #[test]
    fn three_window_scenario_follows_documented_restore_policy() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));
        registry.open(request("c"));
        assert_eq!((rank(&registry, "a"), rank(&registry, "b"), rank(&registry, "c")), (1, 2, 3));
        assert_eq!(registry.active_id(), Some(&WindowId::from("c")));

        registry.focus(&WindowId::from("a"));
        assert!(rank(&registry, "a") > 3);
        assert_eq!(registry.active_id(), Some(&WindowId::from("a")));

        registry.minimize(&WindowId::from("a"));
        assert_eq!(registry.active_id(), None);

        registry.restore(&WindowId::from("b"));
        assert_eq!(registry.active_id(), Some(&WindowId::from("b")));
        assert_eq!(rank(&registry, "b"), 2);
    }

    #[test]
    fn focusing_a_minimized_window_is_ignored() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));
        registry.minimize(&WindowId::from("a"));

        assert!(!registry.focus(&WindowId::from("a")));
        assert_eq!(registry.active_id(), Some(&WindowId::from("b")));
    }

    #[test]
    fn ranks_stay_above_everything_after_close_and_open_churn() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));
        registry.open(request("c"));
        registry.focus(&WindowId::from("a"));
        let top = rank(&registry, "a");

        registry.close(&WindowId::from("a"));
        registry.open(request("d"));
        assert!(rank(&registry, "d") > top);

        let mut seen: Vec<u64> = registry.windows().iter().map(|w| w.z_index).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), registry.len());
    }

    #[test]
    fn rapid_focus_changes_produce_a_total_order() {
        let mut registry = WindowRegistry::default();
        for id in ["a", "b", "c", "d"] {
            registry.open(request(id));
        }
        for id in ["b", "d", "a", "c", "b", "a"] {
            registry.focus(&WindowId::from(id));
        }

        let stack: Vec<&str> = registry
            .windows_by_rank()
            .into_iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(stack, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn toggle_maximize_keeps_stored_geometry_and_activates() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));
        let a = WindowId::from("a");
        let rect = registry.window(&a).expect("a").rect;

        registry.toggle_maximize(&a);
        assert!(registry.window(&a).expect("a").maximized);
        assert_eq!(registry.active_id(), Some(&a));

        registry.toggle_maximize(&a);
        let window = registry.window(&a).expect("a");
        assert!(!window.maximized);
        assert_eq!(window.rect, rect);
    }

    #[test]
    fn geometry_updates_do_not_touch_rank_or_focus() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        registry.open(request("b"));
        let a = WindowId::from("a");
        let start = registry.window(&a).expect("a").rect;

        assert!(registry.update_geometry(&a, GeometryUpdate::Offset { dx: 15.0, dy: -5.0 }));
        assert!(registry.update_geometry(
            &a,
            GeometryUpdate::Patch(RectPatch {
                w: Some(500.0),
                ..RectPatch::default()
            })
        ));

        let window = registry.window(&a).expect("a");
        assert_eq!(window.rect.x, start.x + 15.0);
        assert_eq!(window.rect.y, start.y - 5.0);
        assert_eq!(window.rect.w, 500.0);
        assert_eq!(window.z_index, 1);
        assert_eq!(registry.active_id(), Some(&WindowId::from("b")));
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        let before = registry.clone();
        let ghost = WindowId::from("ghost");

        assert!(!registry.close(&ghost));
        assert!(!registry.focus(&ghost));
        assert!(!registry.minimize(&ghost));
        assert!(!registry.restore(&ghost));
        assert!(!registry.toggle_maximize(&ghost));
        assert!(!registry.update_geometry(&ghost, GeometryUpdate::Offset { dx: 1.0, dy: 1.0 }));
        assert!(!registry.update_badge(&ghost, 3));
        assert!(!registry.update_snapshot(&ghost, None));
        assert_eq!(registry, before);
    }

    #[test]
    fn badge_and_snapshot_setters_touch_only_their_field() {
        let mut registry = WindowRegistry::default();
        registry.open(request("a"));
        let a = WindowId::from("a");
        let before = registry.window(&a).expect("a").clone();

        registry.update_badge(&a, 7);
        registry.update_snapshot(&a, Some(PreviewImage::new("data:image/png;base64,AA", 8, 8)));

        let after = registry.window(&a).expect("a");
        assert_eq!(after.badge_count, 7);
        assert!(after.preview.is_some());
        assert_eq!(after.z_index, before.z_index);
        assert_eq!(after.rect, before.rect);
        assert_eq!(registry.active_id(), Some(&a));
    }

    #[test]
    fn hydrate_reestablishes_invariants() {
        let mut source = WindowRegistry::default();
        source.open(request("a"));
        source.open(request("b"));
        source.minimize(&WindowId::from("b"));
        let mut windows = source.windows().to_vec();
        windows.push(windows[0].clone());

        let registry = WindowRegistry::hydrate(
            windows,
            Some(WindowId::from("b")),
            0,
            source.next_window_seq(),
        );

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_id(), None);
        assert_eq!(registry.z_counter(), 2);
    }
}
