//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the kill switch controller, the runtime
//! effect queue, and host bootstrap wiring. UI composition stays in [`crate::components`].

use leptos::*;

use crate::{
    effect_executor,
    host::DesktopHostContext,
    kill_switch::{ArmingTicket, KillSwitchController, PressOutcome},
    model::{DesktopState, InteractionState, OpenWindowRequest, WindowId},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    taskbar::TaskbarController,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Shell-wide kill switch.
    pub kill_switch: RwSignal<KillSwitchController>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
    /// Invoked when the kill switch reaches its hold threshold. The gate answers through
    /// [`DesktopRuntimeContext::confirm_kill_switch`] or
    /// [`DesktopRuntimeContext::dismiss_kill_switch`].
    pub confirmation_gate: Option<Callback<()>>,
}

impl DesktopRuntimeContext {
    /// Creates the reactive containers and reducer dispatch without installing side effects.
    pub(crate) fn new(host: DesktopHostContext, confirmation_gate: Option<Callback<()>>) -> Self {
        let preferences = host.preferences().clone();
        let mut desktop = DesktopState::new(TaskbarController::new(
            crate::config::default_workspaces(),
        ));
        if let Some(name) = preferences.initial_workspace.as_deref() {
            match preferences.validate(desktop.taskbar.workspaces()) {
                Ok(()) => {
                    desktop.taskbar.set_workspace(name);
                }
                Err(err) => logging::warn!("shell preferences rejected: {err}"),
            }
        }

        let state = create_rw_signal(desktop);
        let interaction = create_rw_signal(InteractionState::default());
        let kill_switch = create_rw_signal(KillSwitchController::new(preferences.hold_threshold()));
        let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

        let dispatch = Callback::new(move |action: DesktopAction| {
            let mut desktop = state.get_untracked();
            let mut ui = interaction.get_untracked();
            let previous_desktop = desktop.clone();
            let previous_ui = ui.clone();

            let new_effects = reduce_desktop(&mut desktop, &mut ui, action);
            if desktop != previous_desktop {
                state.set(desktop);
            }
            if ui != previous_ui {
                interaction.set(ui);
            }
            if !new_effects.is_empty() {
                let mut queue = effects.get_untracked();
                queue.extend(new_effects);
                effects.set(queue);
            }
        });

        Self {
            host: store_value(host),
            state,
            interaction,
            kill_switch,
            effects,
            dispatch,
            confirmation_gate,
        }
    }

    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    pub fn open_window(&self, request: OpenWindowRequest) {
        self.dispatch_action(DesktopAction::OpenWindow(request));
    }

    /// Minimizes a visible window, capturing its preview while it is still rendered.
    pub fn minimize_window(&self, window_id: WindowId) {
        let visible = self.state.with_untracked(|desktop| {
            desktop
                .registry
                .window(&window_id)
                .is_some_and(|window| !window.minimized)
        });
        if !visible {
            return;
        }
        self.host.get_value().capture_preview(
            *self,
            window_id.clone(),
            Some(DesktopAction::MinimizeWindow { window_id }),
        );
    }

    /// Taskbar chip click. Hiding the active window goes through [`Self::minimize_window`].
    pub fn activate_taskbar_entry(&self, window_id: WindowId) {
        let hides_active = self.state.with_untracked(|desktop| {
            desktop.registry.is_active(&window_id)
                && desktop
                    .registry
                    .window(&window_id)
                    .is_some_and(|window| !window.minimized)
        });
        if hides_active {
            self.minimize_window(window_id);
        } else {
            self.dispatch_action(DesktopAction::ActivateTaskbarEntry { window_id });
        }
    }

    /// Refreshes the preview of the focused window.
    pub fn refresh_active_preview(&self) {
        let active = self
            .state
            .with_untracked(|desktop| desktop.registry.active_id().cloned());
        if let Some(window_id) = active {
            self.host.get_value().capture_preview(*self, window_id, None);
        }
    }

    /// Raw press on the kill switch control.
    pub fn press_kill_switch(&self) -> PressOutcome {
        let outcome = self
            .kill_switch
            .try_update(|controller| controller.press())
            .unwrap_or(PressOutcome::Ignored);
        self.sync_lockdown();
        outcome
    }

    /// Release before the hold threshold.
    pub fn release_kill_switch(&self) -> bool {
        self.kill_switch
            .try_update(|controller| controller.cancel_arming())
            .unwrap_or(false)
    }

    /// Hold threshold reached for `ticket`; opens the confirmation gate on success.
    pub fn kill_switch_threshold_reached(&self, ticket: ArmingTicket) -> bool {
        let requested = self
            .kill_switch
            .try_update(|controller| controller.request_confirmation(ticket))
            .unwrap_or(false);
        if requested {
            if let Some(gate) = self.confirmation_gate {
                gate.call(());
            }
        }
        requested
    }

    pub fn confirm_kill_switch(&self) -> bool {
        let confirmed = self
            .kill_switch
            .try_update(|controller| controller.confirm())
            .unwrap_or(false);
        self.sync_lockdown();
        confirmed
    }

    pub fn dismiss_kill_switch(&self) -> bool {
        self.kill_switch
            .try_update(|controller| controller.dismiss())
            .unwrap_or(false)
    }

    pub fn reset_kill_switch(&self) -> bool {
        let reset = self
            .kill_switch
            .try_update(|controller| controller.reset())
            .unwrap_or(false);
        self.sync_lockdown();
        reset
    }

    fn sync_lockdown(&self) {
        let engaged = self
            .kill_switch
            .with_untracked(KillSwitchController::is_locked_down);
        if self.state.with_untracked(|desktop| desktop.locked_down) != engaged {
            self.dispatch_action(DesktopAction::SetLockdown { engaged });
        }
    }
}

fn install_runtime_orchestration(runtime: DesktopRuntimeContext) {
    let host = runtime.host.get_value();
    host.install_boot_hydration(runtime.dispatch);
    effect_executor::install(runtime);

    if let Ok(interval) = set_interval_with_handle(
        move || runtime.refresh_active_preview(),
        host.preferences().preview_refresh_interval(),
    ) {
        on_cleanup(move || interval.clear());
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Host bundle assembled by the entry layer. Defaults to the browser adapters.
    #[prop(optional)]
    host: Option<DesktopHostContext>,
    /// Confirmation gate opened when the kill switch hold completes.
    #[prop(optional, into)]
    on_confirmation_requested: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let runtime =
        DesktopRuntimeContext::new(host.unwrap_or_default(), on_confirmation_requested);

    provide_context(runtime);

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use desktop_app_contract::{ContentKind, ContentRegistry};
    use platform_host::{MemoryLayoutStore, NoopSnapshotProvider};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::ShellPreferences, kill_switch::KillSwitchState};

    fn host() -> DesktopHostContext {
        DesktopHostContext::new(
            Rc::new(MemoryLayoutStore::default()),
            Rc::new(NoopSnapshotProvider),
            Rc::new(ContentRegistry::new()),
            ShellPreferences::default(),
        )
    }

    fn armed(runtime: &DesktopRuntimeContext) -> ArmingTicket {
        match runtime.press_kill_switch() {
            PressOutcome::StartedArming(ticket) => ticket,
            other => panic!("expected arming, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_updates_state_and_queues_effects() {
        let _ = create_runtime();
        let runtime = DesktopRuntimeContext::new(host(), None);

        runtime.open_window(
            OpenWindowRequest::new(ContentKind::trusted("market.watchlist")).with_id("a"),
        );

        assert_eq!(runtime.state.get_untracked().registry.len(), 1);
        assert_eq!(
            runtime.effects.get_untracked(),
            vec![
                RuntimeEffect::PersistLayout,
                RuntimeEffect::FocusWindowInput(WindowId::from("a")),
            ]
        );
    }

    #[test]
    fn threshold_opens_the_confirmation_gate_once() {
        let _ = create_runtime();
        let opened = Rc::new(Cell::new(0));
        let counter = opened.clone();
        let gate = Callback::new(move |()| counter.set(counter.get() + 1));
        let runtime = DesktopRuntimeContext::new(host(), Some(gate));

        let ticket = armed(&runtime);
        assert_eq!(runtime.press_kill_switch(), PressOutcome::AlreadyArming);
        assert!(runtime.kill_switch_threshold_reached(ticket));
        assert!(!runtime.kill_switch_threshold_reached(ticket));

        assert_eq!(opened.get(), 1);
        assert_eq!(
            runtime.kill_switch.get_untracked().state(),
            KillSwitchState::AwaitingConfirmation
        );
        assert!(!runtime.state.get_untracked().locked_down);
    }

    #[test]
    fn confirmed_lockdown_blocks_opening_until_reset() {
        let _ = create_runtime();
        let runtime = DesktopRuntimeContext::new(host(), None);
        let ticket = armed(&runtime);
        runtime.kill_switch_threshold_reached(ticket);

        assert!(runtime.confirm_kill_switch());
        assert!(runtime.state.get_untracked().locked_down);
        runtime.open_window(OpenWindowRequest::new(ContentKind::trusted("admin.users")));
        assert!(runtime.state.get_untracked().registry.is_empty());

        assert_eq!(runtime.press_kill_switch(), PressOutcome::Reset);
        assert!(!runtime.state.get_untracked().locked_down);
        runtime.open_window(OpenWindowRequest::new(ContentKind::trusted("admin.users")));
        assert_eq!(runtime.state.get_untracked().registry.len(), 1);
    }

    #[test]
    fn released_hold_leaves_a_stale_ticket() {
        let _ = create_runtime();
        let runtime = DesktopRuntimeContext::new(host(), None);
        let ticket = armed(&runtime);

        assert!(runtime.release_kill_switch());
        assert!(!runtime.kill_switch_threshold_reached(ticket));
        assert_eq!(
            runtime.kill_switch.get_untracked().state(),
            KillSwitchState::Inactive
        );
    }

    #[test]
    fn dismissal_never_engages_lockdown() {
        let _ = create_runtime();
        let runtime = DesktopRuntimeContext::new(host(), None);
        let ticket = armed(&runtime);
        runtime.kill_switch_threshold_reached(ticket);

        assert!(runtime.dismiss_kill_switch());
        assert!(!runtime.confirm_kill_switch());
        assert!(!runtime.state.get_untracked().locked_down);
    }

    #[test]
    fn unknown_initial_workspace_is_ignored() {
        let _ = create_runtime();
        let preferences = ShellPreferences {
            initial_workspace: Some("nowhere".to_string()),
            ..ShellPreferences::default()
        };
        let runtime = DesktopRuntimeContext::new(host().with_preferences(preferences), None);

        assert_eq!(
            runtime.state.get_untracked().taskbar.active_workspace(),
            None
        );
    }
}
