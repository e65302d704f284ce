use platform_host::{LayoutStore, SnapshotProvider};

use crate::{WebLayoutStore, WebSnapshotProvider};

/// Returns the browser layout store used by the desktop runtime.
pub fn layout_store() -> impl LayoutStore + Clone {
    WebLayoutStore::default()
}

/// Returns the browser preview capture backend used by the desktop runtime.
pub fn snapshot_provider() -> impl SnapshotProvider + Clone {
    WebSnapshotProvider
}
