//! Deferred preview capture for taskbar thumbnails.
//!
//! Capture is asynchronous; by the time a result arrives the window may have been closed. Results
//! are therefore applied through [`apply_capture_result`], which re-checks existence first.

use platform_host::{CaptureRegion, PreviewImage, SnapshotProvider};

use crate::{model::WindowId, window_manager::WindowRegistry};

/// DOM id of the element that renders a window's body.
pub fn window_body_dom_id(window_id: &WindowId) -> String {
    format!("window-body-{}", window_id.as_str())
}

/// Capture region covering a window's body.
pub fn window_capture_region(window_id: &WindowId) -> CaptureRegion {
    CaptureRegion::new(window_body_dom_id(window_id))
}

/// Captures a preview for `window_id`, treating provider failures as "no preview".
pub async fn capture_preview(
    provider: &dyn SnapshotProvider,
    window_id: &WindowId,
) -> Option<PreviewImage> {
    let region = window_capture_region(window_id);
    match provider.capture(window_id.as_str(), &region).await {
        Ok(preview) => preview,
        Err(err) => {
            leptos::logging::warn!("preview capture failed for `{window_id}`: {err}");
            None
        }
    }
}

/// Stores a finished capture on its window.
///
/// Returns `false` without touching anything when the window closed while the capture was in
/// flight, or when the capture produced nothing (an earlier preview is kept).
pub fn apply_capture_result(
    registry: &mut WindowRegistry,
    window_id: &WindowId,
    preview: Option<PreviewImage>,
) -> bool {
    if !registry.contains(window_id) {
        return false;
    }
    match preview {
        Some(preview) => registry.update_snapshot(window_id, Some(preview)),
        None => false,
    }
}
