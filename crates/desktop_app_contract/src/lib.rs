//! Content capability contract between the window manager and the panels it hosts.
//!
//! A window only stores an opaque [`ContentKind`] plus a JSON props bag. Rendering is resolved
//! through a [`ContentRegistry`] owned by the entry layer: anything registered under a kind key can
//! be mounted into a managed window, and the window manager never inspects the key itself.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;

use leptos::View;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a kind of window content (`market.watchlist`, `research.notebook`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentKind(String);

impl ContentKind {
    /// Returns a content kind when `raw` conforms to the `segment.segment...` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_content_kind(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid content kind `{raw}`; expected namespaced dotted segments"
            ))
        }
    }

    /// Creates a kind without validation for trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the kind.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the leading namespace segment (`market` for `market.watchlist`).
    pub fn namespace(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns whether `raw` is a lowercase dotted identifier with at least two segments.
pub fn is_valid_content_kind(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    let mut count = 0usize;
    for part in raw.split('.') {
        count += 1;
        let Some(first) = part.bytes().next() else {
            return false;
        };
        if part.len() > 32 || !first.is_ascii_lowercase() || part.ends_with('-') {
            return false;
        }
        if !part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return false;
        }
    }

    count >= 2
}

#[derive(Debug, Clone)]
/// Context handed to a content module when it is mounted into a window.
pub struct ContentMountContext {
    /// Identifier of the hosting window.
    pub window_id: String,
    /// Kind the window was opened with.
    pub content: ContentKind,
    /// Opaque props passed through from the open request.
    pub props: Value,
}

/// Static mount function used by the content registry.
pub type ContentMountFn = fn(ContentMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Renderable unit registered under a content kind.
pub struct ContentModule {
    mount_fn: ContentMountFn,
}

impl ContentModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: ContentMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the content view for one window.
    pub fn mount(self, context: ContentMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[derive(Debug, Clone)]
/// Registry entry pairing a kind with its display metadata and module.
pub struct ContentRegistration {
    /// Kind key.
    pub kind: ContentKind,
    /// Human-readable name used for pinned taskbar icons and default titles.
    pub display_name: String,
    /// Module that renders the content.
    pub module: ContentModule,
}

#[derive(Debug, Clone, Default)]
/// Lookup table from [`ContentKind`] to a renderable module.
pub struct ContentRegistry {
    entries: HashMap<ContentKind, ContentRegistration>,
    order: Vec<ContentKind>,
}

impl ContentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module, returning the registration it replaced, if any.
    pub fn register(&mut self, registration: ContentRegistration) -> Option<ContentRegistration> {
        let kind = registration.kind.clone();
        let previous = self.entries.insert(kind.clone(), registration);
        if previous.is_none() {
            self.order.push(kind);
        }
        previous
    }

    /// Resolves the registration for `kind`.
    pub fn resolve(&self, kind: &ContentKind) -> Option<&ContentRegistration> {
        self.entries.get(kind)
    }

    /// Mounts the module registered under the context's kind, or `None` when unregistered.
    pub fn mount(&self, context: ContentMountContext) -> Option<View> {
        let module = self.resolve(&context.content)?.module;
        Some(module.mount(context))
    }

    /// Returns registered kinds in registration order.
    pub fn kinds(&self) -> &[ContentKind] {
        &self.order
    }

    /// Returns the display name for `kind`, falling back to the raw kind string.
    pub fn display_name<'a>(&'a self, kind: &'a ContentKind) -> &'a str {
        self.resolve(kind)
            .map(|entry| entry.display_name.as_str())
            .unwrap_or(kind.as_str())
    }
}
