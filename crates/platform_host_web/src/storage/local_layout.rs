//! `localStorage`-backed layout store.
//!
//! Each namespace is stored as one serialized [`LayoutEnvelope`] under [`storage_key`]. The
//! browser API is synchronous; the async trait surface simply wraps it.

use platform_host::{LayoutEnvelope, LayoutStore, LayoutStoreFuture};

const KEY_PREFIX: &str = "dashboard.layout";

/// Returns the `localStorage` key holding `namespace`.
pub fn storage_key(namespace: &str) -> String {
    format!("{KEY_PREFIX}.{namespace}")
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser layout store backed by `window.localStorage`.
pub struct WebLayoutStore;

impl WebLayoutStore {
    fn load_raw(self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn save_raw(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    fn delete_raw(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl LayoutStore for WebLayoutStore {
    fn load_layout<'a>(
        &'a self,
        namespace: &'a str,
    ) -> LayoutStoreFuture<'a, Result<Option<LayoutEnvelope>, String>> {
        let store = *self;
        Box::pin(async move {
            let Some(raw) = store.load_raw(&storage_key(namespace))? else {
                return Ok(None);
            };
            serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| format!("stored layout envelope is malformed: {e}"))
        })
    }

    fn save_layout<'a>(
        &'a self,
        envelope: &'a LayoutEnvelope,
    ) -> LayoutStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move {
            let raw = serde_json::to_string(envelope).map_err(|e| e.to_string())?;
            store.save_raw(&storage_key(&envelope.namespace), &raw)
        })
    }

    fn delete_layout<'a>(
        &'a self,
        namespace: &'a str,
    ) -> LayoutStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.delete_raw(&storage_key(namespace)) })
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::WINDOW_LAYOUT_NAMESPACE;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keys_are_prefixed_by_namespace() {
        assert_eq!(
            storage_key(WINDOW_LAYOUT_NAMESPACE),
            "dashboard.layout.system.window-layout"
        );
    }

    #[test]
    fn native_fallback_is_empty_and_accepts_writes() {
        let store = WebLayoutStore;
        let envelope = LayoutEnvelope::new(WINDOW_LAYOUT_NAMESPACE, 1, serde_json::json!({}));

        block_on(store.save_layout(&envelope)).expect("save");
        assert_eq!(
            block_on(store.load_layout(WINDOW_LAYOUT_NAMESPACE)).expect("load"),
            None
        );
        block_on(store.delete_layout(WINDOW_LAYOUT_NAMESPACE)).expect("delete");
    }
}
