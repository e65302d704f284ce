use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_layout(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let state = runtime.state.get_untracked();
    spawn_local(async move {
        let store = host.layout_store();
        if let Err(err) = persistence::save_layout(store.as_ref(), &state).await {
            logging::warn!("persist layout failed: {err}");
        }
    });
}
