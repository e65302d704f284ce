//! Demo panels registered with the window manager.

use desktop_app_contract::{
    ContentKind, ContentModule, ContentMountContext, ContentRegistration, ContentRegistry,
};
use leptos::*;
use serde_json::Value;

const DEFAULT_SYMBOLS: [&str; 4] = ["AAPL", "MSFT", "NVDA", "TLT"];

/// Registry of every panel the dashboard can open.
pub fn content_registry() -> ContentRegistry {
    let mut registry = ContentRegistry::new();
    for (kind, display_name, mount) in [
        ("market.watchlist", "Watchlist", mount_watchlist as fn(ContentMountContext) -> View),
        ("research.notebook", "Notebook", mount_notebook),
        ("admin.audit-log", "Audit log", mount_audit_log),
        ("macro.charts", "Macro charts", mount_placeholder),
    ] {
        registry.register(ContentRegistration {
            kind: ContentKind::trusted(kind),
            display_name: display_name.to_string(),
            module: ContentModule::new(mount),
        });
    }
    registry
}

/// Symbols listed in `props.symbols`, or a default set.
fn watchlist_symbols(props: &Value) -> Vec<String> {
    let symbols: Vec<String> = props
        .get("symbols")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_ascii_uppercase())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if symbols.is_empty() {
        DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
    } else {
        symbols
    }
}

fn mount_watchlist(context: ContentMountContext) -> View {
    let symbols = watchlist_symbols(&context.props);
    view! {
        <table class="panel-watchlist">
            <thead>
                <tr><th>"Symbol"</th><th>"Last"</th><th>"Chg"</th></tr>
            </thead>
            <tbody>
                {symbols
                    .into_iter()
                    .map(|symbol| view! { <tr><td>{symbol}</td><td>"-"</td><td>"-"</td></tr> })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

fn mount_notebook(context: ContentMountContext) -> View {
    let draft = context
        .props
        .get("draft")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let text = create_rw_signal(draft);
    view! {
        <div class="panel-notebook">
            <textarea
                aria-label="Notebook"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            />
            <p class="panel-status">{move || format!("{} characters", text.with(String::len))}</p>
        </div>
    }
    .into_view()
}

fn mount_audit_log(context: ContentMountContext) -> View {
    view! {
        <div class="panel-audit-log">
            <p>{format!("Audit trail for window {}", context.window_id)}</p>
            <ul>
                <li>"No events recorded in this session."</li>
            </ul>
        </div>
    }
    .into_view()
}

fn mount_placeholder(context: ContentMountContext) -> View {
    view! {
        <div class="panel-placeholder">
            <p><strong>{context.content.to_string()}</strong></p>
            <p>"Chart data source not connected."</p>
        </div>
    }
    .into_view()
}
