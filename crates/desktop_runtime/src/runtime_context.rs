//! Runtime provider and context wiring for the desktop.
//!
//! This module owns the long-lived [`DesktopStore`], mirrors its state into a signal, queues its
//! runtime effects for [`crate::effect_executor`], and runs the boot sequence.

use std::time::Duration;

use leptos::*;
use platform_host::HostServices;

use crate::{
    config::DesktopConfig,
    deep_link::is_home_route,
    effect_executor,
    host::DesktopHostContext,
    manifest::PanelManifest,
    model::{DesktopState, ResizeEdge, WindowId, WindowRect},
    store::{DesktopStore, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and issuing store commands.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Owned command store; the only writer of desktop state.
    pub store: StoredValue<DesktopStore>,
    /// Reactive mirror of the store state.
    pub state: RwSignal<DesktopState>,
    /// Queue of runtime effects emitted by the store and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
}

impl DesktopRuntimeContext {
    /// Runs a store command, then publishes the new state and queues its effects.
    pub fn run(&self, command: impl FnOnce(&mut DesktopStore) -> Vec<RuntimeEffect>) {
        let Some((desktop, new_effects)) = self.store.try_update_value(|store| {
            let effects = command(store);
            (store.state().clone(), effects)
        }) else {
            logging::warn!("desktop store used after its provider was disposed");
            return;
        };

        if desktop != self.state.get_untracked() {
            self.state.set(desktop);
        }
        if !new_effects.is_empty() {
            let mut queue = self.effects.get_untracked();
            queue.extend(new_effects);
            self.effects.set(queue);
        }
    }

    pub fn open_window(&self, window_id: impl Into<WindowId>) {
        let window_id = window_id.into();
        self.run(|store| store.open_window(window_id));
    }

    pub fn open_document(&self, window_id: impl Into<WindowId>, title: impl Into<String>) {
        let (window_id, title) = (window_id.into(), title.into());
        self.run(|store| store.open_document(window_id, title));
    }

    pub fn focus_window(&self, window_id: impl Into<WindowId>) {
        let window_id = window_id.into();
        self.run(|store| store.focus_window(window_id));
    }

    pub fn close_window(&self, window_id: impl Into<WindowId>) {
        let window_id = window_id.into();
        self.run(|store| store.close_window(window_id));
    }

    pub fn move_window(&self, window_id: impl Into<WindowId>, x: i32, y: i32) {
        let window_id = window_id.into();
        self.run(|store| store.move_window(window_id, x, y));
    }

    pub fn resize_window(&self, window_id: impl Into<WindowId>, width: i32, height: i32) {
        let window_id = window_id.into();
        self.run(|store| store.resize_window(window_id, width, height));
    }

    /// Toggles maximize using the host's current viewport size.
    pub fn toggle_maximize(&self, window_id: impl Into<WindowId>) {
        let window_id = window_id.into();
        let viewport = self.host.with_value(DesktopHostContext::viewport_size);
        self.run(|store| store.toggle_maximize(window_id, viewport));
    }

    pub fn select_icon(&self, icon_id: impl Into<WindowId>) {
        let icon_id = icon_id.into();
        self.run(|store| store.select_icon(icon_id));
    }

    pub fn deselect_icon(&self) {
        self.run(DesktopStore::deselect_icon);
    }

    pub fn move_icon(&self, icon_id: impl Into<WindowId>, x: i32, y: i32) {
        let icon_id = icon_id.into();
        self.run(|store| store.move_icon(icon_id, x, y));
    }

    pub fn show_context_menu(&self, x: i32, y: i32) {
        self.run(|store| store.show_context_menu(x, y));
    }

    pub fn hide_context_menu(&self) {
        self.run(DesktopStore::hide_context_menu);
    }

    pub fn reorganize_icons(&self) {
        self.run(DesktopStore::reorganize_icons);
    }

    pub fn drag_window_by(&self, window_id: impl Into<WindowId>, dx: i32, dy: i32) {
        let window_id = window_id.into();
        self.run(|store| store.drag_window_by(window_id, dx, dy));
    }

    pub fn drag_icon_by(&self, icon_id: impl Into<WindowId>, dx: i32, dy: i32) {
        let icon_id = icon_id.into();
        self.run(|store| store.drag_icon_by(icon_id, dx, dy));
    }

    pub fn resize_window_from_edge(
        &self,
        window_id: impl Into<WindowId>,
        start: WindowRect,
        edge: ResizeEdge,
        dx: i32,
        dy: i32,
    ) {
        let window_id = window_id.into();
        self.run(|store| store.resize_window_from_edge(window_id, start, edge, dx, dy));
    }

    pub fn activate_icon(&self, icon_id: impl Into<WindowId>) {
        let icon_id = icon_id.into();
        self.run(|store| store.activate_icon(icon_id));
    }

    pub fn click_desktop(&self) {
        self.run(DesktopStore::click_desktop);
    }

    pub fn escape(&self) {
        self.run(DesktopStore::escape);
    }

    pub fn apply_route(&self, path: &str) {
        self.run(|store| store.apply_route(path));
    }
}

fn install_boot(runtime: DesktopRuntimeContext, boot_delay: Duration) {
    let host = runtime.host.get_value();
    let initial_path = host.current_path();
    logging::log!(
        "desktop boot: host={} path={initial_path}",
        host.host_strategy_name()
    );

    if is_home_route(&initial_path) && !boot_delay.is_zero() {
        set_timeout(
            move || runtime.run(|store| store.boot(&initial_path)),
            boot_delay,
        );
    } else {
        runtime.run(|store| store.boot(&initial_path));
    }
}

fn install_route_listener(runtime: DesktopRuntimeContext) {
    let handle = window_event_listener(ev::popstate, move |_| {
        let path = runtime.host.with_value(DesktopHostContext::current_path);
        runtime.apply_route(&path);
    });
    on_cleanup(move || handle.remove());
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots the desktop.
pub fn DesktopProvider(
    /// Injected browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Layout and behavior configuration; defaults to the embedded `desktop.toml`.
    #[prop(optional)]
    config: Option<DesktopConfig>,
    /// Panel list; defaults to the embedded `panels.toml`.
    #[prop(optional)]
    manifest: Option<PanelManifest>,
    children: Children,
) -> impl IntoView {
    let host_context = DesktopHostContext::new(host_services);
    let config = config.unwrap_or_default();
    let boot_delay = Duration::from_millis(config.boot_delay_ms);
    let store = DesktopStore::new(
        config,
        manifest.unwrap_or_default(),
        host_context.viewport_size(),
    );

    let runtime = DesktopRuntimeContext {
        host: store_value(host_context),
        state: create_rw_signal(store.state().clone()),
        store: store_value(store),
        effects: create_rw_signal(Vec::<RuntimeEffect>::new()),
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    install_route_listener(runtime);
    install_boot(runtime, boot_delay);

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
