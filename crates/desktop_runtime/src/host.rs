//! Host-side execution of store-emitted runtime effects and environment queries.
//!
//! The window-manager core never touches browser APIs. Everything environment-specific arrives as
//! a [`HostServices`] bundle assembled by the entry layer and is reached through this wrapper.

use leptos::logging;
use platform_host::{HostServices, ViewportSize};

use crate::store::RuntimeEffect;

#[derive(Clone, Debug)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(HostServices::headless())
    }
}

impl DesktopHostContext {
    /// Wraps an injected host bundle.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Current viewport size used for initial layout and maximize geometry.
    pub fn viewport_size(&self) -> ViewportSize {
        self.services.viewport.viewport_size()
    }

    /// Path the session started at.
    pub fn current_path(&self) -> String {
        self.services.routes.current_path()
    }

    /// Executes a single [`RuntimeEffect`]. Host failures are logged, never propagated.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        let result = match &effect {
            RuntimeEffect::PlaySound(cue) => self.services.audio.play_cue(*cue),
            RuntimeEffect::SyncRoute(path) => self.services.routes.push_path(path),
        };
        if let Err(err) = result {
            logging::warn!("runtime effect {effect:?} failed: {err}");
        }
    }
}
