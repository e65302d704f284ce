//! Desktop shell UI composition and interaction surfaces.

mod kill_switch;
mod taskbar;
mod window;

use leptos::*;

use self::{
    kill_switch::{KillSwitchButton, KillSwitchPrompt},
    taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    model::{PointerPosition, WindowRect},
    reducer::DesktopAction,
    shell::{build_shell_frame, WindowPlacement},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell UI: window layer, taskbar, and kill switch.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let kill_switch = runtime.kill_switch;

    let viewport = create_rw_signal(runtime.host.get_value().desktop_viewport_rect());
    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(runtime.host.get_value().desktop_viewport_rect());
    });
    on_cleanup(move || resize_listener.remove());

    let frame = create_memo(move |_| {
        kill_switch.with(|controller| {
            state.with(|desktop| build_shell_frame(desktop, controller, viewport.get()))
        })
    });
    let locked_down = Signal::derive(move || frame.with(|frame| frame.locked_down));
    let window_ids = Signal::derive(move || {
        state.with(|desktop| desktop.taskbar.entry_ids(&desktop.registry))
    });

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if runtime.interaction.with_untracked(|ui| ui.dragging.is_some()) {
            runtime.dispatch_action(DesktopAction::UpdateMove {
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-locked-down=move || locked_down.get().to_string()
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div
                class="desktop-window-layer"
                class:locked-down=move || locked_down.get()
                inert=move || locked_down.get()
                aria-hidden=move || locked_down.get().then_some("true")
            >
                <For each=move || window_ids.get() key=|id| id.clone() let:window_id>
                    <DesktopWindow window_id=window_id frame=frame />
                </For>
            </div>

            <KillSwitchPrompt />

            <Taskbar frame=frame>
                <KillSwitchButton />
            </Taskbar>
        </div>
    }
}

/// Inline style positioning a window placement.
fn placement_style(placement: &WindowPlacement) -> String {
    rect_style(placement.rect, placement.z_index)
}

fn rect_style(rect: WindowRect, z_index: u64) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        rect.x, rect.y, rect.w, rect.h, z_index
    )
}

/// Class list for a window frame.
fn window_class(placement: Option<&WindowPlacement>) -> String {
    let Some(placement) = placement else {
        return "desktop-window minimized".to_string();
    };
    let mut class = format!("desktop-window {}", placement.risk_class);
    if placement.focused {
        class.push_str(" focused");
    }
    if placement.maximized {
        class.push_str(" maximized");
    }
    if !placement.in_workspace {
        class.push_str(" outside-workspace");
    }
    class
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: f64::from(ev.client_x()),
        y: f64::from(ev.client_y()),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    if runtime.interaction.with_untracked(|ui| ui.dragging.is_some()) {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
}
