use leptos::spawn_local;

use crate::{
    host::DesktopHostContext, model::WindowId, reducer::DesktopAction,
    runtime_context::DesktopRuntimeContext, snapshot,
};

pub(super) fn capture_preview(
    host: DesktopHostContext,
    runtime: DesktopRuntimeContext,
    window_id: WindowId,
    then: Option<DesktopAction>,
) {
    spawn_local(async move {
        let provider = host.snapshot_provider();
        let preview = snapshot::capture_preview(provider.as_ref(), &window_id).await;
        runtime.dispatch_action(DesktopAction::SetPreview { window_id, preview });
        if let Some(action) = then {
            runtime.dispatch_action(action);
        }
    });
}
