use desktop_app_contract::ContentKind;
use desktop_runtime::{
    use_desktop_runtime, DesktopHostContext, DesktopProvider, DesktopShell, OpenWindowRequest,
};
use leptos::*;
use leptos_meta::*;

use crate::panels::content_registry;

#[component]
pub fn DashboardApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Operator Dashboard" />
        <Meta name="description" content="Multi-panel operator dashboard." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let host = DesktopHostContext::default().with_content(content_registry());

    view! {
        <DesktopProvider host=host>
            <PanelLauncher />
            <DesktopShell />
        </DesktopProvider>
    }
}

/// Menu of every registered panel kind.
#[component]
fn PanelLauncher() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let registry = runtime.host.get_value().content_registry();
    let entries: Vec<(ContentKind, String)> = registry
        .kinds()
        .iter()
        .map(|kind| (kind.clone(), registry.display_name(kind).to_string()))
        .collect();

    view! {
        <nav class="panel-launcher" aria-label="Open panel">
            {entries
                .into_iter()
                .map(|(kind, label)| {
                    let title = label.clone();
                    view! {
                        <button
                            class="panel-launcher-item"
                            on:click=move |_| {
                                let request =
                                    OpenWindowRequest::new(kind.clone()).with_title(title.clone());
                                runtime.open_window(request);
                            }
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
