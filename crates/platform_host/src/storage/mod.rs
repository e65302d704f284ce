//! Layout persistence contracts and lightweight test adapters.

mod layout_store;

pub use layout_store::{
    build_layout_envelope, decode_layout_payload, LayoutEnvelope, LayoutStore, LayoutStoreFuture,
    MemoryLayoutStore, NoopLayoutStore, LAYOUT_ENVELOPE_VERSION, WINDOW_LAYOUT_NAMESPACE,
};
