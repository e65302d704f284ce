//! Versioned envelope storage for persisted window layouts.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Version for [`LayoutEnvelope`] metadata serialization.
pub const LAYOUT_ENVELOPE_VERSION: u32 = 1;
/// Namespace used by the window manager's persisted layout.
pub const WINDOW_LAYOUT_NAMESPACE: &str = "system.window-layout";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Versioned envelope wrapping a persisted layout payload.
pub struct LayoutEnvelope {
    /// Envelope schema version.
    pub envelope_version: u32,
    /// Namespace identifying the owning layout.
    pub namespace: String,
    /// Owner-defined schema version for the payload.
    pub schema_version: u32,
    /// Last update time in unix milliseconds.
    pub updated_at_unix_ms: u64,
    /// Serialized layout payload.
    pub payload: Value,
}

impl LayoutEnvelope {
    /// Creates an envelope stamped with a monotonic timestamp.
    pub fn new(namespace: impl Into<String>, schema_version: u32, payload: Value) -> Self {
        Self {
            envelope_version: LAYOUT_ENVELOPE_VERSION,
            namespace: namespace.into(),
            schema_version,
            updated_at_unix_ms: crate::time::next_monotonic_timestamp_ms(),
            payload,
        }
    }
}

/// Object-safe boxed future used by [`LayoutStore`] async methods.
pub type LayoutStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Storage service for loading and saving layout envelopes by namespace.
pub trait LayoutStore {
    /// Loads a persisted envelope by namespace.
    fn load_layout<'a>(
        &'a self,
        namespace: &'a str,
    ) -> LayoutStoreFuture<'a, Result<Option<LayoutEnvelope>, String>>;

    /// Saves a full envelope, replacing any previous one in the same namespace.
    fn save_layout<'a>(
        &'a self,
        envelope: &'a LayoutEnvelope,
    ) -> LayoutStoreFuture<'a, Result<(), String>>;

    /// Deletes the persisted envelope for a namespace.
    fn delete_layout<'a>(&'a self, namespace: &'a str)
        -> LayoutStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op store for unsupported targets and baseline tests.
pub struct NoopLayoutStore;

impl LayoutStore for NoopLayoutStore {
    fn load_layout<'a>(
        &'a self,
        _namespace: &'a str,
    ) -> LayoutStoreFuture<'a, Result<Option<LayoutEnvelope>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_layout<'a>(
        &'a self,
        _envelope: &'a LayoutEnvelope,
    ) -> LayoutStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_layout<'a>(
        &'a self,
        _namespace: &'a str,
    ) -> LayoutStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by namespace. Clones share the same backing map.
pub struct MemoryLayoutStore {
    inner: Rc<RefCell<HashMap<String, LayoutEnvelope>>>,
}

impl LayoutStore for MemoryLayoutStore {
    fn load_layout<'a>(
        &'a self,
        namespace: &'a str,
    ) -> LayoutStoreFuture<'a, Result<Option<LayoutEnvelope>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(namespace).cloned()) })
    }

    fn save_layout<'a>(
        &'a self,
        envelope: &'a LayoutEnvelope,
    ) -> LayoutStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(envelope.namespace.clone(), envelope.clone());
            Ok(())
        })
    }

    fn delete_layout<'a>(
        &'a self,
        namespace: &'a str,
    ) -> LayoutStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(namespace);
            Ok(())
        })
    }
}

/// Builds a versioned [`LayoutEnvelope`] from a serializable payload.
///
/// # Errors
///
/// Returns an error when `payload` cannot be converted to JSON.
pub fn build_layout_envelope<T: Serialize>(
    namespace: &str,
    schema_version: u32,
    payload: &T,
) -> Result<LayoutEnvelope, String> {
    let payload = serde_json::to_value(payload).map_err(|e| e.to_string())?;
    Ok(LayoutEnvelope::new(namespace, schema_version, payload))
}

/// Deserializes an envelope payload into a target type.
///
/// # Errors
///
/// Returns an error when the payload does not match `T`.
pub fn decode_layout_payload<T: DeserializeOwned>(envelope: &LayoutEnvelope) -> Result<T, String> {
    serde_json::from_value(envelope.payload.clone()).map_err(|e| e.to_string())
}
