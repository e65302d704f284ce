//! Snapshot provider contracts for rasterizing a window region into a compact preview.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`SnapshotProvider`] async methods.
pub type SnapshotFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Compact preview image produced by a capture backend.
pub struct PreviewImage {
    /// Encoded image payload (typically a `data:image/...` URL).
    pub data_url: String,
    /// Pixel width of the encoded preview.
    pub width: u32,
    /// Pixel height of the encoded preview.
    pub height: u32,
}

impl PreviewImage {
    /// Creates a preview from an encoded payload and its dimensions.
    pub fn new(data_url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            data_url: data_url.into(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Opaque handle naming the renderable region a backend should rasterize.
pub struct CaptureRegion {
    element_id: String,
}

impl CaptureRegion {
    /// Creates a region handle from a DOM element id.
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    /// Returns the DOM element id backing this region.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

/// Host service that captures a preview image for one window.
///
/// Implementations may fail or produce nothing; callers treat both as "no preview".
pub trait SnapshotProvider {
    /// Captures `region` for `window_id`.
    fn capture<'a>(
        &'a self,
        window_id: &'a str,
        region: &'a CaptureRegion,
    ) -> SnapshotFuture<'a, Result<Option<PreviewImage>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Provider that never produces a preview, for unsupported targets and baseline tests.
pub struct NoopSnapshotProvider;

impl SnapshotProvider for NoopSnapshotProvider {
    fn capture<'a>(
        &'a self,
        _window_id: &'a str,
        _region: &'a CaptureRegion,
    ) -> SnapshotFuture<'a, Result<Option<PreviewImage>, String>> {
        Box::pin(async { Ok(None) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory provider returning scripted results keyed by window id.
///
/// Windows without a scripted result capture as `Ok(None)`. Every call is recorded.
pub struct MemorySnapshotProvider {
    results: Rc<RefCell<HashMap<String, Result<Option<PreviewImage>, String>>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl MemorySnapshotProvider {
    /// Scripts the result returned for subsequent captures of `window_id`.
    pub fn set_result(
        &self,
        window_id: impl Into<String>,
        result: Result<Option<PreviewImage>, String>,
    ) {
        self.results.borrow_mut().insert(window_id.into(), result);
    }

    /// Returns the window ids captured so far, in call order.
    pub fn captured_window_ids(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SnapshotProvider for MemorySnapshotProvider {
    fn capture<'a>(
        &'a self,
        window_id: &'a str,
        _region: &'a CaptureRegion,
    ) -> SnapshotFuture<'a, Result<Option<PreviewImage>, String>> {
        Box::pin(async move {
            self.calls.borrow_mut().push(window_id.to_string());
            self.results
                .borrow()
                .get(window_id)
                .cloned()
                .unwrap_or(Ok(None))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_provider_returns_scripted_results_and_records_calls() {
        let provider = MemorySnapshotProvider::default();
        let provider_obj: &dyn SnapshotProvider = &provider;
        let region = CaptureRegion::new("window-body-a");
        provider.set_result("a", Ok(Some(PreviewImage::new("data:image/png;base64,AA", 96, 64))));
        provider.set_result("b", Err("canvas tainted".to_string()));

        let a = block_on(provider_obj.capture("a", &region)).expect("capture a");
        assert_eq!(a.map(|img| img.width), Some(96));

        let b = block_on(provider_obj.capture("b", &region));
        assert_eq!(b, Err("canvas tainted".to_string()));

        let c = block_on(provider_obj.capture("c", &region)).expect("capture c");
        assert_eq!(c, None);

        assert_eq!(
            provider.captured_window_ids(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn noop_provider_never_produces_a_preview() {
        let provider = NoopSnapshotProvider;
        let region = CaptureRegion::new("window-body-x");
        assert_eq!(block_on(provider.capture("x", &region)), Ok(None));
        assert_eq!(region.element_id(), "window-body-x");
    }
}
