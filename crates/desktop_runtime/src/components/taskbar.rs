use desktop_app_contract::ContentKind;

use super::*;
use crate::{
    model::OpenWindowRequest,
    shell::{PinnedLauncher, PreviewState, ShellFrame, TaskbarChip, WorkspaceTab},
    taskbar::WorkspaceIsolation,
};

fn chip_class(chip: &TaskbarChip) -> String {
    let mut class = format!("taskbar-chip {}", chip.risk_class);
    if chip.entry.focused {
        class.push_str(" focused");
    }
    if chip.entry.minimized {
        class.push_str(" minimized");
    }
    class
}

fn badge_label(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

#[component]
pub(super) fn Taskbar(frame: Memo<ShellFrame>, children: Children) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let height = runtime.host.get_value().preferences().taskbar_height_px;

    view! {
        <footer class="taskbar" style=format!("height:{height}px;") role="toolbar">
            <nav class="taskbar-workspaces" aria-label="Workspaces">
                <button
                    class="workspace-tab"
                    class:active=move || frame.with(|f| f.workspaces.iter().all(|tab| !tab.active))
                    on:click=move |_| runtime.dispatch_action(DesktopAction::ClearWorkspace)
                >
                    "All"
                </button>
                <For
                    each=move || frame.with(|f| f.workspaces.clone())
                    key=|tab| (tab.name.clone(), tab.active)
                    let:tab
                >
                    <WorkspaceButton tab=tab />
                </For>
            </nav>
            <div class="taskbar-pins">
                <For
                    each=move || frame.with(|f| f.pinned.clone())
                    key=|pin| (pin.kind.clone(), pin.open_count)
                    let:pin
                >
                    <PinnedLauncherButton launcher=pin />
                </For>
            </div>
            <div class="taskbar-running" role="list">
                <For
                    each=move || frame.with(|f| f.taskbar.clone())
                    key=|chip| chip.entry.id.clone()
                    let:chip
                >
                    <TaskbarChipButton window_id=chip.entry.id frame=frame />
                </For>
            </div>
            <div class="taskbar-tray">{children()}</div>
        </footer>
    }
}

#[component]
fn WorkspaceButton(tab: WorkspaceTab) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let name = tab.name.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        let isolation = if ev.shift_key() {
            WorkspaceIsolation::MinimizeOthers
        } else {
            WorkspaceIsolation::Advisory
        };
        runtime.dispatch_action(DesktopAction::SwitchWorkspace {
            name: name.clone(),
            isolation,
        });
    };

    view! {
        <button
            class="workspace-tab"
            class:active=tab.active
            title="Shift-click to minimize windows outside this workspace"
            on:click=on_click
        >
            {tab.label}
        </button>
    }
}

#[component]
fn PinnedLauncherButton(launcher: PinnedLauncher) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let registry = runtime.host.get_value().content_registry();
    let label = registry.display_name(&launcher.kind).to_string();
    let kind = launcher.kind.clone();
    let title = label.clone();
    let open = move |_| {
        runtime.open_window(OpenWindowRequest::new(kind.clone()).with_title(title.clone()));
    };
    let unpin_kind = launcher.kind.clone();
    let unpin = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::UnpinContent {
            kind: unpin_kind.clone(),
        });
    };

    view! {
        <button
            class="taskbar-pin"
            class:running={launcher.open_count > 0}
            aria-label=format!("Open {label}")
            on:click=open
            on:contextmenu=unpin
        >
            <span>{label.clone()}</span>
            {badge_label(launcher.open_count as u32)
                .map(|count| view! { <span class="pin-count">{count}</span> })}
        </button>
    }
}

#[component]
fn TaskbarChipButton(window_id: crate::model::WindowId, frame: Memo<ShellFrame>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let chip = {
        let window_id = window_id.clone();
        create_memo(move |_| {
            frame.with(|f| f.taskbar.iter().find(|c| c.entry.id == window_id).cloned())
        })
    };

    let activate = {
        let window_id = window_id.clone();
        move |_| runtime.activate_taskbar_entry(window_id.clone())
    };
    let close = {
        let window_id = window_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(DesktopAction::CloseTaskbarEntry {
                window_id: window_id.clone(),
            });
        }
    };
    let toggle_pin = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let Some(kind) = chip.with_untracked(|c| c.as_ref().map(|c| c.entry.content.clone()))
        else {
            return;
        };
        let pinned = runtime
            .state
            .with_untracked(|desktop| desktop.taskbar.is_pinned(&kind));
        runtime.dispatch_action(pin_action(kind, pinned));
    };

    let title = move || {
        chip.with(|c| c.as_ref().map(|c| c.entry.title.clone()).unwrap_or_default())
    };

    view! {
        <div
            class=move || chip.with(|c| c.as_ref().map(chip_class).unwrap_or_default())
            role="listitem"
            on:contextmenu=toggle_pin
        >
            <button class="taskbar-chip-main" on:click=activate aria-label=title>
                {move || {
                    chip.with(|c| match c.as_ref().map(|c| &c.preview) {
                        Some(PreviewState::Ready(image)) => view! {
                            <img
                                class="taskbar-preview"
                                src=image.data_url.clone()
                                width=image.width
                                height=image.height
                                alt=""
                            />
                        }
                        .into_view(),
                        _ => view! {
                            <span class="taskbar-preview placeholder" aria-hidden="true"></span>
                        }
                        .into_view(),
                    })
                }}
                <span class="taskbar-title">{title}</span>
                {move || {
                    chip.with(|c| {
                        c.as_ref()
                            .and_then(|c| badge_label(c.entry.badge_count))
                            .map(|count| view! { <span class="taskbar-badge">{count}</span> })
                    })
                }}
            </button>
            <button class="taskbar-chip-close" aria-label="Close window" on:click=close>
                "×"
            </button>
        </div>
    }
}

fn pin_action(kind: ContentKind, pinned: bool) -> DesktopAction {
    if pinned {
        DesktopAction::UnpinContent { kind }
    } else {
        DesktopAction::PinContent { kind }
    }
}
