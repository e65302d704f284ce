use desktop_app_contract::ContentMountContext;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::*;
use crate::{model::WindowId, shell::ShellFrame, snapshot::window_body_dom_id};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId, frame: Memo<ShellFrame>) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let placement = {
        let window_id = window_id.clone();
        create_memo(move |_| {
            frame.with(|frame| frame.windows.iter().find(|w| w.id == window_id).cloned())
        })
    };

    let focus = {
        let window_id = window_id.clone();
        move |_| {
            let should_focus =
                placement.with_untracked(|p| p.as_ref().is_some_and(|p| !p.focused));
            if should_focus {
                runtime.dispatch_action(DesktopAction::FocusWindow {
                    window_id: window_id.clone(),
                });
            }
        }
    };
    let minimize = {
        let window_id = window_id.clone();
        move |_| runtime.minimize_window(window_id.clone())
    };
    let close = {
        let window_id = window_id.clone();
        move |_| {
            runtime.dispatch_action(DesktopAction::CloseWindow {
                window_id: window_id.clone(),
            })
        }
    };
    let toggle_maximize = {
        let window_id = window_id.clone();
        move || {
            runtime.dispatch_action(DesktopAction::ToggleMaximize {
                window_id: window_id.clone(),
            })
        }
    };
    let begin_move = {
        let window_id = window_id.clone();
        move |ev: web_sys::PointerEvent| {
            if ev.pointer_type() == "mouse" && ev.button() != 0 {
                return;
            }
            if ev.pointer_type() != "mouse" && !ev.is_primary() {
                return;
            }
            try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::BeginMove {
                window_id: window_id.clone(),
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    };
    let titlebar_double_click = {
        let toggle_maximize = toggle_maximize.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            toggle_maximize();
        }
    };

    let title = move || placement.with(|p| p.as_ref().map(|p| p.title.clone()).unwrap_or_default());
    let maximized = move || placement.with(|p| p.as_ref().is_some_and(|p| p.maximized));

    view! {
        <section
            class=move || placement.with(|p| window_class(p.as_ref()))
            style=move || {
                placement.with(|p| {
                    p.as_ref()
                        .map_or_else(|| "display:none;".to_string(), placement_style)
                })
            }
            on:pointerdown=focus
            role="dialog"
            aria-label=title
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <span class="titlebar-title">{title}</span>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            minimize(ev);
                        }
                    >
                        "_"
                    </button>
                    <button
                        aria-label=move || {
                            if maximized() { "Restore window" } else { "Maximize window" }
                        }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        {move || if maximized() { "❐" } else { "□" }}
                    </button>
                    <button
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            close(ev);
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div id=window_body_dom_id(&window_id) class="window-body" tabindex="-1">
                <WindowBody window_id=window_id.clone() />
            </div>
        </section>
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let registry = runtime.host.get_value().content_registry();
    let contents = runtime
        .state
        .with_untracked(|desktop| {
            desktop.registry.window(&window_id).map(|w| ContentMountContext {
                window_id: w.id.to_string(),
                content: w.content.clone(),
                props: w.props.clone(),
            })
        })
        .map(|context| {
            let kind = context.content.clone();
            registry.mount(context).unwrap_or_else(|| {
                view! {
                    <p class="content-placeholder">{format!("No panel registered for `{kind}`")}</p>
                }
                .into_view()
            })
        })
        .unwrap_or_else(|| view! { <p>"Closed"</p> }.into_view());

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}
