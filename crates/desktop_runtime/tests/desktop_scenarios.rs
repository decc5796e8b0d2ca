use std::rc::Rc;

use desktop_runtime::{
    DesktopConfig, DesktopHostContext, DesktopStore, PanelManifest, RuntimeEffect, ViewportSize,
    WindowId,
};
use platform_host::{
    FixedViewportService, HostServices, HostStrategy, MemoryAudioCueService, MemoryRouteService,
    RouteService, SoundCue,
};

struct Harness {
    store: DesktopStore,
    host: DesktopHostContext,
    audio: MemoryAudioCueService,
    routes: MemoryRouteService,
}

impl Harness {
    fn start_at(path: &str) -> Self {
        let audio = MemoryAudioCueService::default();
        let routes = MemoryRouteService::starting_at(path);
        let host = DesktopHostContext::new(HostServices {
            audio: Rc::new(audio.clone()),
            routes: Rc::new(routes.clone()),
            viewport: Rc::new(FixedViewportService(ViewportSize {
                width: 1440,
                height: 900,
            })),
            host_strategy: HostStrategy::Headless,
        });
        let store = DesktopStore::new(
            DesktopConfig::default(),
            PanelManifest::default(),
            host.viewport_size(),
        );
        Self {
            store,
            host,
            audio,
            routes,
        }
    }

    fn execute(&self, effects: Vec<RuntimeEffect>) {
        for effect in effects {
            self.host.run_runtime_effect(effect);
        }
    }

    fn active(&self) -> Option<&str> {
        self.store
            .state()
            .active_window_id
            .as_ref()
            .map(WindowId::as_str)
    }
}

#[test]
fn home_boot_opens_the_boot_panel_and_syncs_the_route() {
    let mut harness = Harness::start_at("/");
    let path = harness.host.current_path();

    let effects = harness.store.boot(&path);
    harness.execute(effects);

    assert_eq!(harness.active(), Some("about"));
    assert_eq!(harness.audio.played(), vec![SoundCue::WindowOpen]);
    assert_eq!(harness.routes.history(), vec!["/", "/about"]);
}

#[test]
fn deep_link_boot_opens_the_linked_document() {
    let mut harness = Harness::start_at("/projects/overview.mdx");
    let path = harness.host.current_path();

    let effects = harness.store.boot(&path);
    harness.execute(effects);

    assert_eq!(harness.active(), Some("projects/overview.mdx"));
    assert_eq!(harness.routes.history(), vec!["/projects/overview.mdx"]);
    let about = harness.store.state().window(&WindowId::from("about"));
    assert!(about.is_some_and(|w| !w.is_open));
}

#[test]
fn browsing_session_keeps_route_and_stack_consistent() {
    let mut harness = Harness::start_at("/");
    let viewport = harness.host.viewport_size();

    let mut effects = harness.store.activate_icon("about");
    effects.extend(harness.store.activate_icon("projects"));
    effects.extend(harness.store.open_document("projects/overview.mdx", "overview.mdx"));
    effects.extend(harness.store.focus_window("about"));
    effects.extend(harness.store.toggle_maximize("about", viewport));
    effects.extend(harness.store.escape());
    effects.extend(harness.store.escape());
    harness.execute(effects);

    assert_eq!(harness.active(), Some("projects"));
    assert_eq!(
        harness.routes.history(),
        vec![
            "/",
            "/about",
            "/projects",
            "/projects/overview.mdx",
            "/about",
            "/projects/overview.mdx",
            "/projects",
        ]
    );
    assert_eq!(
        harness.audio.played(),
        vec![
            SoundCue::Tap,
            SoundCue::WindowOpen,
            SoundCue::Tap,
            SoundCue::WindowOpen,
            SoundCue::WindowOpen,
            SoundCue::WindowClose,
            SoundCue::WindowClose,
        ]
    );
    assert!(harness
        .store
        .state()
        .window(&WindowId::from("projects/overview.mdx"))
        .is_none());
    assert_eq!(harness.store.state().check_invariants(), Ok(()));
}

#[test]
fn home_route_closes_windows_but_keeps_the_selection() {
    let mut harness = Harness::start_at("/");
    let effects = harness.store.open_window("contact");
    harness.execute(effects);
    let effects = harness.store.select_icon("about");
    harness.execute(effects);

    let effects = harness.store.apply_route("/");
    harness.execute(effects);

    assert_eq!(harness.active(), None);
    assert_eq!(
        harness.store.state().selected_icon_id,
        Some(WindowId::from("about"))
    );
    assert_eq!(harness.routes.current_path(), "/");
    assert_eq!(
        harness.audio.played(),
        vec![SoundCue::WindowOpen, SoundCue::Select, SoundCue::WindowClose]
    );
}

#[test]
fn headless_web_bundle_drives_the_store() {
    let host = DesktopHostContext::new(platform_host_web::build_host_services());
    let mut store = DesktopStore::with_defaults(host.viewport_size());

    for effect in store.boot(&host.current_path()) {
        host.run_runtime_effect(effect);
    }

    assert_eq!(host.host_strategy_name(), "headless");
    assert_eq!(store.state().open_windows().count(), 1);
}
