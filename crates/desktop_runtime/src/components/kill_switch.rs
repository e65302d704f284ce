use std::time::Duration;

use leptos::leptos_dom::helpers::IntervalHandle;
use platform_host::{elapsed_since, unix_time_ms_now};

use super::*;
use crate::kill_switch::{HoldProgress, KillSwitchState, PressOutcome};

const HOLD_TICK: Duration = Duration::from_millis(50);

fn button_label(state: KillSwitchState) -> &'static str {
    match state {
        KillSwitchState::Inactive => "Kill switch",
        KillSwitchState::Arming => "Hold to arm",
        KillSwitchState::AwaitingConfirmation => "Awaiting confirmation",
        KillSwitchState::Active => "Locked down: press to reset",
    }
}

/// Conic-gradient ring drawn around the button while a hold is in progress.
fn progress_style(fraction: f64) -> String {
    let degrees = (fraction.clamp(0.0, 1.0) * 360.0).round();
    format!("--hold-progress:{degrees}deg;")
}

#[component]
pub(super) fn KillSwitchButton() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let kill_switch = runtime.kill_switch;
    let meter = HoldProgress::new(kill_switch.with_untracked(|k| k.hold_threshold()));
    let progress = create_rw_signal(0.0_f64);
    let hold_timer = store_value(None::<IntervalHandle>);

    let stop_timer = move || {
        hold_timer.update_value(|timer| {
            if let Some(handle) = timer.take() {
                handle.clear();
            }
        });
        progress.set(0.0);
    };

    create_effect(move |_| {
        if kill_switch.with(|k| k.state()) != KillSwitchState::Arming {
            stop_timer();
        }
    });
    on_cleanup(stop_timer);

    let on_press = move |ev: web_sys::PointerEvent| {
        if ev.pointer_type() == "mouse" && ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        let PressOutcome::StartedArming(ticket) = runtime.press_kill_switch() else {
            return;
        };
        stop_timer();
        let started = unix_time_ms_now();
        let tick = move || {
            let elapsed = elapsed_since(started);
            progress.set(meter.fraction(elapsed));
            if meter.is_complete(elapsed) {
                stop_timer();
                runtime.kill_switch_threshold_reached(ticket);
            }
        };
        match set_interval_with_handle(tick, HOLD_TICK) {
            Ok(handle) => hold_timer.set_value(Some(handle)),
            Err(err) => {
                logging::warn!("kill switch hold timer unavailable: {err:?}");
                runtime.release_kill_switch();
            }
        }
    };
    let on_release = move |_| {
        runtime.release_kill_switch();
        stop_timer();
    };

    view! {
        <button
            class="kill-switch"
            data-state=move || kill_switch.with(|k| k.state().token())
            style=move || progress_style(progress.get())
            aria-pressed=move || kill_switch.with(|k| k.is_locked_down()).to_string()
            on:pointerdown=on_press
            on:pointerup=on_release
            on:pointerleave=on_release
            on:pointercancel=on_release
        >
            {move || button_label(kill_switch.with(|k| k.state()))}
        </button>
    }
}

/// Built-in confirmation gate, shown only when the entry layer supplied none.
#[component]
pub(super) fn KillSwitchPrompt() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let awaiting = move || {
        runtime.confirmation_gate.is_none()
            && runtime
                .kill_switch
                .with(|k| k.state() == KillSwitchState::AwaitingConfirmation)
    };

    view! {
        <Show when=awaiting fallback=|| ()>
            <div class="kill-switch-prompt" role="alertdialog" aria-label="Confirm lockdown">
                <p>"Lock down the workspace?"</p>
                <button on:click=move |_| {
                    runtime.confirm_kill_switch();
                }>"Lock down"</button>
                <button on:click=move |_| {
                    runtime.dismiss_kill_switch();
                }>"Cancel"</button>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn labels_follow_the_state_machine() {
        assert_eq!(button_label(KillSwitchState::Inactive), "Kill switch");
        assert_eq!(
            button_label(KillSwitchState::Active),
            "Locked down: press to reset"
        );
    }

    #[test]
    fn progress_ring_is_clamped() {
        assert_eq!(progress_style(0.5), "--hold-progress:180deg;");
        assert_eq!(progress_style(2.0), "--hold-progress:360deg;");
    }
}
