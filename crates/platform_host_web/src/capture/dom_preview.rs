//! DOM-serialization preview capture.
//!
//! The window body element is serialized with `XMLSerializer` and embedded in an SVG
//! `foreignObject`, giving a scalable `data:image/svg+xml` thumbnail without a canvas round trip.

use platform_host::{CaptureRegion, PreviewImage, SnapshotFuture, SnapshotProvider};

/// Widest thumbnail produced, in pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 240;

/// Scales a `width`×`height` region down to at most [`PREVIEW_MAX_WIDTH`], keeping aspect ratio.
///
/// Returns `None` for an empty region (detached or `display: none`).
pub fn thumbnail_size(width: f64, height: f64) -> Option<(u32, u32)> {
    if !(width >= 1.0 && height >= 1.0) {
        return None;
    }
    let scale = (f64::from(PREVIEW_MAX_WIDTH) / width).min(1.0);
    let w = (width * scale).round().max(1.0) as u32;
    let h = (height * scale).round().max(1.0) as u32;
    Some((w, h))
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser preview capture backend.
pub struct WebSnapshotProvider;

impl SnapshotProvider for WebSnapshotProvider {
    fn capture<'a>(
        &'a self,
        window_id: &'a str,
        region: &'a CaptureRegion,
    ) -> SnapshotFuture<'a, Result<Option<PreviewImage>, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let _ = window_id;
                capture_element(region.element_id())
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (window_id, region);
                Ok(None)
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn capture_element(element_id: &str) -> Result<Option<PreviewImage>, String> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Err("document unavailable".to_string());
    };
    let Some(element) = document.get_element_by_id(element_id) else {
        return Ok(None);
    };
    let width = f64::from(element.client_width());
    let height = f64::from(element.client_height());
    let Some((thumb_w, thumb_h)) = thumbnail_size(width, height) else {
        return Ok(None);
    };

    let serializer = web_sys::XmlSerializer::new()
        .map_err(|e| format!("XMLSerializer unavailable: {e:?}"))?;
    let markup = serializer
        .serialize_to_string(&element)
        .map_err(|e| format!("window body serialization failed: {e:?}"))?;
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{thumb_w}\" height=\"{thumb_h}\" \
         viewBox=\"0 0 {width} {height}\"><foreignObject width=\"100%\" height=\"100%\">{markup}\
         </foreignObject></svg>"
    );
    let encoded: String = js_sys::encode_uri_component(&svg).into();

    Ok(Some(PreviewImage::new(
        format!("data:image/svg+xml;charset=utf-8,{encoded}"),
        thumb_w,
        thumb_h,
    )))
}
