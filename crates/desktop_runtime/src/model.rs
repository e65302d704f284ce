//! Window, geometry, and desktop state types shared by the window manager runtime.

use desktop_app_contract::ContentKind;
use platform_host::PreviewImage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{taskbar::TaskbarController, window_manager::WindowRegistry};

pub const DEFAULT_WINDOW_WIDTH: f64 = 640.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 420.0;
pub const MIN_WINDOW_WIDTH: f64 = 240.0;
pub const MIN_WINDOW_HEIGHT: f64 = 160.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Untitled";
/// Number of cascade slots used when placing windows opened without a position.
pub const CASCADE_SLOTS: usize = 8;
/// Pixel step between cascade slots.
pub const CASCADE_STEP: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Presentation-only risk tag attached to a window.
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl WindowRect {
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: f64, min_h: f64) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Default placement for the `slot`-th window opened without an explicit position.
    pub fn cascade(slot: usize) -> Self {
        let step = (slot % CASCADE_SLOTS) as f64 * CASCADE_STEP;
        Self {
            x: 40.0 + step,
            y: 48.0 + step,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }

    /// Applies a drag delta or an absolute patch, keeping the minimum window size.
    pub fn apply(self, update: GeometryUpdate) -> Self {
        let next = match update {
            GeometryUpdate::Offset { dx, dy } => self.offset(dx, dy),
            GeometryUpdate::Patch(patch) => patch.merge_onto(self),
        };
        next.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self::cascade(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// Partial geometry where every field is optional.
pub struct RectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl RectPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(w: f64, h: f64) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn merge_onto(self, base: WindowRect) -> WindowRect {
        WindowRect {
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            w: self.w.unwrap_or(base.w),
            h: self.h.unwrap_or(base.h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Geometry change accepted by [`WindowRegistry::update_geometry`].
pub enum GeometryUpdate {
    /// Relative move, used for drag deltas.
    Offset { dx: f64, dy: f64 },
    /// Absolute replacement of the supplied fields.
    Patch(RectPatch),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub rect: WindowRect,
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    pub content: ContentKind,
    pub props: Value,
    pub risk_level: Option<RiskLevel>,
    pub preview: Option<PreviewImage>,
    pub badge_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub id: Option<WindowId>,
    pub title: Option<String>,
    pub rect: RectPatch,
    pub content: ContentKind,
    pub props: Value,
    pub risk_level: Option<RiskLevel>,
}

impl OpenWindowRequest {
    pub fn new(content: ContentKind) -> Self {
        Self {
            id: None,
            title: None,
            rect: RectPatch::default(),
            content,
            props: Value::Null,
            risk_level: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<WindowId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_rect(mut self, rect: RectPatch) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Composition-root state container: one registry and one taskbar per shell.
pub struct DesktopState {
    pub registry: WindowRegistry,
    pub taskbar: TaskbarController,
    /// Mirror of the kill switch lockdown flag consumed by the reducer and shell.
    pub locked_down: bool,
}

impl DesktopState {
    pub fn new(taskbar: TaskbarController) -> Self {
        Self {
            registry: WindowRegistry::default(),
            taskbar,
            locked_down: false,
        }
    }
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(TaskbarController::new(crate::config::default_workspaces()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
}
