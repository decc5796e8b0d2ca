//! Command layer that owns the live desktop state.
//!
//! [`DesktopStore`] wraps the pure reducer with named commands, subscriber notification and side
//! effect derivation. Every transition goes through one private dispatch path:
//! reduce, publish the new state, then derive [`RuntimeEffect`] values from the before/after pair
//! and hand them to effect observers.

use leptos::logging;
use platform_host::SoundCue;

use crate::{
    config::DesktopConfig,
    deep_link::{is_home_route, route_for, DeepLinkTarget},
    manifest::{initial_state, PanelManifest},
    model::{DesktopState, ResizeEdge, ViewportSize, WindowId, WindowRect},
    reducer::{reduce_desktop, DesktopAction},
    window_manager::{resize_from_edge, LayoutPolicy},
};

/// Side effect requested by a transition and executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEffect {
    /// Play a feedback cue.
    PlaySound(SoundCue),
    /// Replace the address-bar path.
    SyncRoute(String),
}

/// Handle returned by [`DesktopStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&DesktopState)>;
type EffectObserver = Box<dyn FnMut(&RuntimeEffect)>;

/// Owner of the single authoritative [`DesktopState`].
pub struct DesktopStore {
    config: DesktopConfig,
    manifest: PanelManifest,
    policy: LayoutPolicy,
    state: DesktopState,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    effect_observers: Vec<EffectObserver>,
}

impl std::fmt::Debug for DesktopStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .field("effect_observers", &self.effect_observers.len())
            .finish_non_exhaustive()
    }
}

impl DesktopStore {
    /// Builds a store whose initial layout is derived from `manifest` for `viewport`.
    ///
    /// A config or manifest that fails validation is logged and replaced by the embedded default.
    pub fn new(config: DesktopConfig, manifest: PanelManifest, viewport: ViewportSize) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                logging::warn!("desktop config rejected, using defaults: {err}");
                DesktopConfig::default()
            }
        };
        let manifest = match manifest.validate() {
            Ok(()) => manifest,
            Err(err) => {
                logging::warn!("panel manifest rejected, using defaults: {err}");
                PanelManifest::default()
            }
        };
        let state = initial_state(&manifest, &config, viewport);
        Self {
            policy: config.layout_policy(),
            config,
            manifest,
            state,
            next_subscription: 0,
            subscribers: Vec::new(),
            effect_observers: Vec::new(),
        }
    }

    /// Store over the embedded default configuration and manifest.
    pub fn with_defaults(viewport: ViewportSize) -> Self {
        Self::new(DesktopConfig::default(), PanelManifest::default(), viewport)
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn manifest(&self) -> &PanelManifest {
        &self.manifest
    }

    pub fn policy(&self) -> &LayoutPolicy {
        &self.policy
    }

    /// Registers a callback invoked with the new state after every dispatch.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&DesktopState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Registers a callback invoked with every derived effect, in order.
    pub fn observe_effects(&mut self, observer: impl FnMut(&RuntimeEffect) + 'static) {
        self.effect_observers.push(Box::new(observer));
    }

    pub(crate) fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        self.dispatch_all(std::iter::once(action))
    }

    /// Applies `actions` in order, publishing after each, and derives effects once from the
    /// state before the first and after the last.
    fn dispatch_all(
        &mut self,
        actions: impl IntoIterator<Item = DesktopAction>,
    ) -> Vec<RuntimeEffect> {
        let before = self.state.clone();
        for action in actions {
            if action.targets_unknown_id(&self.state) {
                logging::warn!("ignoring {action:?}: no such window or icon");
            }

            self.state = reduce_desktop(&self.state, &action, &self.policy);

            for (_, subscriber) in &mut self.subscribers {
                subscriber(&self.state);
            }
        }

        let effects = derive_effects(&before, &self.state, self.config.audio_enabled);
        self.notify_effects(&effects);
        effects
    }

    fn notify_effects(&mut self, effects: &[RuntimeEffect]) {
        for effect in effects {
            for observer in &mut self.effect_observers {
                observer(effect);
            }
        }
    }

    fn cue(&mut self, cue: SoundCue) -> Vec<RuntimeEffect> {
        if !self.config.audio_enabled {
            return Vec::new();
        }
        let effects = vec![RuntimeEffect::PlaySound(cue)];
        self.notify_effects(&effects);
        effects
    }

    pub fn open_window(&mut self, window_id: impl Into<WindowId>) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::OpenWindow {
            window_id: window_id.into(),
        })
    }

    /// Opens an ad hoc document window, creating it on first open.
    pub fn open_document(
        &mut self,
        window_id: impl Into<WindowId>,
        title: impl Into<String>,
    ) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::OpenDocument {
            window_id: window_id.into(),
            title: title.into(),
        })
    }

    pub fn focus_window(&mut self, window_id: impl Into<WindowId>) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::FocusWindow {
            window_id: window_id.into(),
        })
    }

    pub fn close_window(&mut self, window_id: impl Into<WindowId>) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::CloseWindow {
            window_id: window_id.into(),
        })
    }

    pub fn move_window(
        &mut self,
        window_id: impl Into<WindowId>,
        x: i32,
        y: i32,
    ) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::MoveWindow {
            window_id: window_id.into(),
            x,
            y,
        })
    }

    pub fn resize_window(
        &mut self,
        window_id: impl Into<WindowId>,
        width: i32,
        height: i32,
    ) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::ResizeWindow {
            window_id: window_id.into(),
            width,
            height,
        })
    }

    pub fn toggle_maximize(
        &mut self,
        window_id: impl Into<WindowId>,
        viewport: ViewportSize,
    ) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::ToggleMaximize {
            window_id: window_id.into(),
            viewport,
        })
    }

    pub fn select_icon(&mut self, icon_id: impl Into<WindowId>) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::SelectIcon {
            icon_id: icon_id.into(),
        })
    }

    pub fn deselect_icon(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::DeselectIcon)
    }

    pub fn move_icon(
        &mut self,
        icon_id: impl Into<WindowId>,
        x: i32,
        y: i32,
    ) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::MoveIcon {
            icon_id: icon_id.into(),
            x,
            y,
        })
    }

    pub fn show_context_menu(&mut self, x: i32, y: i32) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::ShowContextMenu { x, y })
    }

    pub fn hide_context_menu(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::HideContextMenu)
    }

    pub fn reorganize_icons(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::ReorganizeIcons)
    }

    /// Moves a window by a pointer delta relative to its current position.
    pub fn drag_window_by(
        &mut self,
        window_id: impl Into<WindowId>,
        dx: i32,
        dy: i32,
    ) -> Vec<RuntimeEffect> {
        let window_id = window_id.into();
        let Some(rect) = self.state.window(&window_id).map(|w| w.rect.offset(dx, dy)) else {
            logging::warn!("ignoring drag of unknown window `{window_id}`");
            return Vec::new();
        };
        self.move_window(window_id, rect.x, rect.y)
    }

    /// Moves an icon by a pointer delta relative to its current position.
    pub fn drag_icon_by(
        &mut self,
        icon_id: impl Into<WindowId>,
        dx: i32,
        dy: i32,
    ) -> Vec<RuntimeEffect> {
        let icon_id = icon_id.into();
        let Some((x, y)) = self.state.icon(&icon_id).map(|icon| icon.offset(dx, dy)) else {
            logging::warn!("ignoring drag of unknown icon `{icon_id}`");
            return Vec::new();
        };
        self.move_icon(icon_id, x, y)
    }

    /// Commits a pointer resize that started at `start` with the given edge grabbed.
    pub fn resize_window_from_edge(
        &mut self,
        window_id: impl Into<WindowId>,
        start: WindowRect,
        edge: ResizeEdge,
        dx: i32,
        dy: i32,
    ) -> Vec<RuntimeEffect> {
        let window_id = window_id.into();
        let rect = resize_from_edge(start, edge, dx, dy, &self.policy);
        let mut effects = self.move_window(window_id.clone(), rect.x, rect.y);
        effects.extend(self.resize_window(window_id, rect.w, rect.h));
        effects
    }

    /// Double-click on a desktop icon: tap cue, open its window, clear the selection.
    pub fn activate_icon(&mut self, icon_id: impl Into<WindowId>) -> Vec<RuntimeEffect> {
        let icon_id = icon_id.into();
        if self.state.icon(&icon_id).is_none() {
            logging::warn!("ignoring activation of unknown icon `{icon_id}`");
            return Vec::new();
        }
        let mut effects = self.cue(SoundCue::Tap);
        effects.extend(self.open_window(icon_id));
        effects.extend(self.deselect_icon());
        effects
    }

    /// Click on empty desktop: clear the icon selection and hide the context menu.
    pub fn click_desktop(&mut self) -> Vec<RuntimeEffect> {
        let mut effects = self.deselect_icon();
        effects.extend(self.hide_context_menu());
        effects
    }

    /// Escape key: hide the context menu if shown, otherwise close the active window.
    pub fn escape(&mut self) -> Vec<RuntimeEffect> {
        if self.state.context_menu.is_some() {
            return self.hide_context_menu();
        }
        match self.state.active_window_id.clone() {
            Some(active) => self.close_window(active),
            None => Vec::new(),
        }
    }

    /// Brings the desktop in line with an address-bar path.
    ///
    /// `/` closes every open window. A panel or document path opens its window, or focuses it if it
    /// is already open. Unrecognized paths are logged and ignored.
    pub fn apply_route(&mut self, path: &str) -> Vec<RuntimeEffect> {
        let Some(target) = DeepLinkTarget::parse(path, &self.manifest) else {
            logging::warn!("ignoring unrecognized route `{path}`");
            return Vec::new();
        };

        match target {
            DeepLinkTarget::Home => {
                let closes: Vec<DesktopAction> = self
                    .state
                    .open_windows()
                    .map(|w| DesktopAction::CloseWindow {
                        window_id: w.id.clone(),
                    })
                    .collect();
                self.dispatch_all(closes)
            }
            DeepLinkTarget::Panel(window_id) => self.reveal(window_id, None),
            DeepLinkTarget::Document { window_id, title } => self.reveal(window_id, Some(title)),
        }
    }

    fn reveal(
        &mut self,
        window_id: WindowId,
        document_title: Option<String>,
    ) -> Vec<RuntimeEffect> {
        let is_open = self.state.window(&window_id).is_some_and(|w| w.is_open);
        match (is_open, document_title) {
            (true, _) => self.focus_window(window_id),
            (false, Some(title)) => self.open_document(window_id, title),
            (false, None) => self.open_window(window_id),
        }
    }

    /// Session start: follow a deep link if `initial_path` names one, otherwise open the
    /// configured boot panel.
    pub fn boot(&mut self, initial_path: &str) -> Vec<RuntimeEffect> {
        if !is_home_route(initial_path) {
            return self.apply_route(initial_path);
        }

        let boot_panel = self
            .config
            .boot_panel
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        match boot_panel {
            Some(panel) if self.manifest.contains(&panel) => self.open_window(panel),
            Some(panel) => {
                logging::warn!("boot panel `{panel}` is not in the manifest");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

/// Effects implied by moving from `previous` to `current`.
///
/// Sound cues fire only for real transitions: a window becoming open or closed, or the icon
/// selection moving to a different icon.
pub fn derive_effects(
    previous: &DesktopState,
    current: &DesktopState,
    audio_enabled: bool,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();

    if audio_enabled {
        let was_open = |state: &DesktopState, id: &WindowId| {
            state.window(id).is_some_and(|w| w.is_open)
        };
        let opened = current
            .open_windows()
            .any(|w| !was_open(previous, &w.id));
        let closed = previous
            .open_windows()
            .any(|w| !was_open(current, &w.id));
        if opened {
            effects.push(RuntimeEffect::PlaySound(SoundCue::WindowOpen));
        }
        if closed {
            effects.push(RuntimeEffect::PlaySound(SoundCue::WindowClose));
        }
        let selection = current.selected_icon_id.as_ref();
        if selection.is_some() && selection != previous.selected_icon_id.as_ref() {
            effects.push(RuntimeEffect::PlaySound(SoundCue::Select));
        }
    }

    let route = route_for(current);
    if route != route_for(previous) {
        effects.push(RuntimeEffect::SyncRoute(route));
    }

    effects
}
