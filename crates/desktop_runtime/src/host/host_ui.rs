#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::model::{WindowId, WindowRect};

const FALLBACK_VIEWPORT_WIDTH: f64 = 1024.0;
const FALLBACK_VIEWPORT_HEIGHT: f64 = 768.0;

pub(super) fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(element) =
            document.get_element_by_id(&crate::snapshot::window_body_dom_id(&window_id))
        else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

pub(super) fn desktop_viewport_rect(taskbar_height_px: f64) -> WindowRect {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(FALLBACK_VIEWPORT_WIDTH);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);

            return WindowRect {
                x: 0.0,
                y: 0.0,
                w: width.max(320.0),
                h: (height - taskbar_height_px).max(220.0),
            };
        }
    }

    WindowRect {
        x: 0.0,
        y: 0.0,
        w: FALLBACK_VIEWPORT_WIDTH,
        h: FALLBACK_VIEWPORT_HEIGHT - taskbar_height_px,
    }
}
