//! Queue drain for store-emitted runtime effects.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the effect executor that runs queued runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Take the queue before running anything so effects queued by a host callback land in a fresh
    // batch instead of being dropped by this drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in queued {
            host.run_runtime_effect(effect);
        }
    });
}
