//! Preview-capture contracts and lightweight test adapters.

mod snapshot_provider;

pub use snapshot_provider::{
    CaptureRegion, MemorySnapshotProvider, NoopSnapshotProvider, PreviewImage, SnapshotFuture,
    SnapshotProvider,
};
