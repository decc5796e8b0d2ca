use std::rc::Rc;

use platform_host::{
    FixedViewportService, HostServices, HostStrategy, NoopAudioCueService, NoopRouteService,
};

use crate::{WebAudioCueService, WebRouteService, WebViewportService};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Builds the [`HostServices`] bundle for the selected strategy.
pub fn build_host_services() -> HostServices {
    match selected_host_strategy() {
        HostStrategy::Browser => HostServices {
            audio: Rc::new(WebAudioCueService),
            routes: Rc::new(WebRouteService),
            viewport: Rc::new(WebViewportService),
            host_strategy: HostStrategy::Browser,
        },
        HostStrategy::Headless => HostServices {
            audio: Rc::new(NoopAudioCueService),
            routes: Rc::new(NoopRouteService),
            viewport: Rc::new(FixedViewportService::default()),
            host_strategy: HostStrategy::Headless,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn host_bundle_matches_selected_strategy() {
        let services = build_host_services();
        assert_eq!(services.host_strategy, selected_host_strategy());
        assert_eq!(host_strategy_name(), services.host_strategy.as_str());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_adapters_fall_back_to_defaults() {
        let services = build_host_services();
        assert_eq!(services.routes.current_path(), "/");
        assert_eq!(
            services.viewport.viewport_size(),
            platform_host::ViewportSize::default()
        );
        assert!(services.audio.play_cue(platform_host::SoundCue::Tap).is_ok());
        assert!(services.routes.push_path("/about").is_ok());
    }
}
