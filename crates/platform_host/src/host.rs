//! Shared host-bundle model for browser and headless runtime composition.

use std::rc::Rc;

use crate::{
    AudioCueService, FixedViewportService, NoopAudioCueService, NoopRouteService, RouteService,
    ViewportService,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// Headless composition with no-op or in-memory adapters.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle injected into the desktop runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `desktop_runtime`, which keeps the window-manager core decoupled from browser APIs.
#[derive(Clone)]
pub struct HostServices {
    /// Feedback sound playback.
    pub audio: Rc<dyn AudioCueService>,
    /// Address-bar route sync.
    pub routes: Rc<dyn RouteService>,
    /// Viewport size queries used for maximize geometry.
    pub viewport: Rc<dyn ViewportService>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a headless bundle with silent audio, a fixed `/` route and the default viewport.
    pub fn headless() -> Self {
        Self {
            audio: Rc::new(NoopAudioCueService),
            routes: Rc::new(NoopRouteService),
            viewport: Rc::new(FixedViewportService::default()),
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
