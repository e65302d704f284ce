//! Typed host-boundary contracts used by the window manager runtime.
//!
//! This crate exposes the preview-capture and layout-storage service traits together with
//! in-memory and no-op adapters. Browser-specific adapters are assembled by the entry layer and
//! injected into `desktop_runtime` as trait objects.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod capture;
pub mod storage;
pub mod time;

pub use capture::{
    CaptureRegion, MemorySnapshotProvider, NoopSnapshotProvider, PreviewImage, SnapshotFuture,
    SnapshotProvider,
};
pub use storage::{
    build_layout_envelope, decode_layout_payload, LayoutEnvelope, LayoutStore, LayoutStoreFuture,
    MemoryLayoutStore, NoopLayoutStore, LAYOUT_ENVELOPE_VERSION, WINDOW_LAYOUT_NAMESPACE,
};
pub use time::{elapsed_since, next_monotonic_timestamp_ms, unix_time_ms_now};
