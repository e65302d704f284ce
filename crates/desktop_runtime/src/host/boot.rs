use leptos::{spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    if !host.preferences().restore_on_boot {
        return;
    }
    spawn_local(async move {
        let store = host.layout_store();
        if let Some(snapshot) = persistence::load_boot_layout(store.as_ref()).await {
            dispatch.call(DesktopAction::HydrateSnapshot {
                snapshot,
                max_windows: host.preferences().max_restore_windows,
            });
        }
    });
}
