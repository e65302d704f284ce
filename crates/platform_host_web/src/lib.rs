//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Layout envelopes are kept in `window.localStorage`; window previews are produced by
//! serializing the window body into an SVG `foreignObject` data URL. On native targets both
//! adapters degrade to empty/no-op behavior so the runtime can be exercised in tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod capture;
pub mod storage;

pub use adapters::{layout_store, snapshot_provider};
pub use capture::dom_preview::{thumbnail_size, WebSnapshotProvider, PREVIEW_MAX_WIDTH};
pub use storage::local_layout::{storage_key, WebLayoutStore};
