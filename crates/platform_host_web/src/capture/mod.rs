//! Browser preview capture adapters.

pub mod dom_preview;
