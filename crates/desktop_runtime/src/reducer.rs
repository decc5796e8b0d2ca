//! Reducer actions and the pure transition function for the desktop state machine.

use serde::{Deserialize, Serialize};

use crate::{
    model::{
        ContextMenuAnchor, DesktopState, ViewportSize, WindowId, WindowKind, WindowRecord,
    },
    window_manager::{self, is_topmost, raise_to_top, topmost_open_window, LayoutPolicy},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Actions accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Open a window (idempotent) and make it active. Always raises it.
    OpenWindow {
        /// Window to open.
        window_id: WindowId,
    },
    /// Create an ad hoc document window if absent, then open it.
    OpenDocument {
        /// Document window id (`<folder>/<file>`).
        window_id: WindowId,
        /// Title shown in the window chrome.
        title: String,
    },
    /// Make an open window active, raising it unless it is already topmost.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Close a window (idempotent). Document windows are removed.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Set a window's top-left position.
    MoveWindow {
        /// Window to move.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Set a window's size, floored at the minimum size.
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// Maximize into the viewport, or restore the captured geometry.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
        /// Viewport size at dispatch time.
        viewport: ViewportSize,
    },
    /// Select a desktop icon.
    SelectIcon {
        /// Icon to select.
        icon_id: WindowId,
    },
    /// Clear the icon selection.
    DeselectIcon,
    /// Set a desktop icon's position.
    MoveIcon {
        /// Icon to move.
        icon_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Show the desktop context menu anchored at a point.
    ShowContextMenu {
        /// Anchor x.
        x: i32,
        /// Anchor y.
        y: i32,
    },
    /// Hide the desktop context menu.
    HideContextMenu,
    /// Lay every icon out in one column and hide the context menu.
    ReorganizeIcons,
}

impl DesktopAction {
    /// Window or icon id the action addresses, if any.
    pub fn target_id(&self) -> Option<&WindowId> {
        match self {
            Self::OpenWindow { window_id }
            | Self::OpenDocument { window_id, .. }
            | Self::FocusWindow { window_id }
            | Self::CloseWindow { window_id }
            | Self::MoveWindow { window_id, .. }
            | Self::ResizeWindow { window_id, .. }
            | Self::ToggleMaximize { window_id, .. } => Some(window_id),
            Self::SelectIcon { icon_id } | Self::MoveIcon { icon_id, .. } => Some(icon_id),
            Self::DeselectIcon
            | Self::ShowContextMenu { .. }
            | Self::HideContextMenu
            | Self::ReorganizeIcons => None,
        }
    }

    /// Whether the action is a no-op because it names a window or icon `state` does not have.
    pub fn targets_unknown_id(&self, state: &DesktopState) -> bool {
        match self {
            Self::OpenDocument { .. } => false,
            Self::SelectIcon { icon_id } | Self::MoveIcon { icon_id, .. } => {
                state.icon(icon_id).is_none()
            }
            action => action
                .target_id()
                .is_some_and(|window_id| state.window(window_id).is_none()),
        }
    }
}

/// Applies a [`DesktopAction`] and returns the resulting state.
///
/// The input is never modified. Actions naming an unknown window or icon return an unchanged
/// copy; there is no failure path.
pub fn reduce_desktop(
    state: &DesktopState,
    action: &DesktopAction,
    policy: &LayoutPolicy,
) -> DesktopState {
    let mut next = state.clone();
    apply(&mut next, action, policy);
    next
}

fn apply(state: &mut DesktopState, action: &DesktopAction, policy: &LayoutPolicy) {
    match action {
        DesktopAction::OpenWindow { window_id } => {
            if let Some(index) = state.window_index(window_id) {
                open_at(state, index);
            }
        }
        DesktopAction::OpenDocument { window_id, title } => {
            let index = match state.window_index(window_id) {
                Some(index) => index,
                None => {
                    state.windows.push(WindowRecord {
                        id: window_id.clone(),
                        title: title.clone(),
                        kind: WindowKind::Document,
                        is_open: false,
                        rect: policy.document_rect,
                        z: 0,
                        maximized: false,
                        restore_rect: None,
                    });
                    state.windows.len() - 1
                }
            };
            open_at(state, index);
        }
        DesktopAction::FocusWindow { window_id } => {
            let Some(index) = state.window_index(window_id) else {
                return;
            };
            let window = &state.windows[index];
            if !window.is_open {
                return;
            }
            if !is_topmost(window, state.top_z) {
                raise_to_top(state, index);
            }
            state.active_window_id = Some(window_id.clone());
        }
        DesktopAction::CloseWindow { window_id } => {
            let Some(index) = state.window_index(window_id) else {
                return;
            };
            if !state.windows[index].is_open {
                return;
            }
            if state.windows[index].kind == WindowKind::Document {
                state.windows.remove(index);
            } else {
                state.windows[index].is_open = false;
            }
            if state.is_active(window_id) {
                state.active_window_id = topmost_open_window(&state.windows).map(|w| w.id.clone());
            }
        }
        DesktopAction::MoveWindow { window_id, x, y } => {
            if let Some(window) = window_mut(state, window_id) {
                window.rect.x = *x;
                window.rect.y = *y;
            }
        }
        DesktopAction::ResizeWindow {
            window_id,
            width,
            height,
        } => {
            let (w, h) = policy.clamp_size(*width, *height);
            if let Some(window) = window_mut(state, window_id) {
                window.rect.w = w;
                window.rect.h = h;
            }
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            if let Some(window) = window_mut(state, window_id) {
                window_manager::toggle_maximize(window, *viewport, policy);
            }
        }
        DesktopAction::SelectIcon { icon_id } => {
            if state.icon(icon_id).is_some() {
                state.selected_icon_id = Some(icon_id.clone());
            }
        }
        DesktopAction::DeselectIcon => {
            state.selected_icon_id = None;
        }
        DesktopAction::MoveIcon { icon_id, x, y } => {
            if let Some(icon) = state.icons.iter_mut().find(|icon| &icon.id == icon_id) {
                icon.x = *x;
                icon.y = *y;
            }
        }
        DesktopAction::ShowContextMenu { x, y } => {
            state.context_menu = Some(ContextMenuAnchor { x: *x, y: *y });
        }
        DesktopAction::HideContextMenu => {
            state.context_menu = None;
        }
        DesktopAction::ReorganizeIcons => {
            for (index, icon) in state.icons.iter_mut().enumerate() {
                let (x, y) = policy.icon_column.slot(index);
                icon.x = x;
                icon.y = y;
            }
            state.context_menu = None;
        }
    }
}

fn open_at(state: &mut DesktopState, index: usize) {
    raise_to_top(state, index);
    let window = &mut state.windows[index];
    window.is_open = true;
    state.active_window_id = Some(window.id.clone());
}

fn window_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowId,
) -> Option<&'a mut WindowRecord> {
    state.windows.iter_mut().find(|w| &w.id == window_id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::DesktopConfig,
        manifest::{initial_state, PanelManifest},
        model::WindowRect,
        window_manager::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH},
    };

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1280,
        height: 800,
    };

    fn fresh() -> DesktopState {
        initial_state(&PanelManifest::default(), &DesktopConfig::default(), VIEWPORT)
    }

    fn id(raw: &str) -> WindowId {
        WindowId::from(raw)
    }

    fn run(state: &DesktopState, actions: &[DesktopAction]) -> DesktopState {
        let policy = LayoutPolicy::default();
        actions.iter().fold(state.clone(), |current, action| {
            let next = reduce_desktop(&current, action, &policy);
            assert_eq!(next.check_invariants(), Ok(()), "after {action:?}");
            next
        })
    }

    fn open(raw: &str) -> DesktopAction {
        DesktopAction::OpenWindow { window_id: id(raw) }
    }

    fn focus(raw: &str) -> DesktopAction {
        DesktopAction::FocusWindow { window_id: id(raw) }
    }

    fn close(raw: &str) -> DesktopAction {
        DesktopAction::CloseWindow { window_id: id(raw) }
    }

    #[test]
    fn reduce_never_modifies_its_input() {
        let before = fresh();
        let snapshot = before.clone();
        let after = reduce_desktop(&before, &open("about"), &LayoutPolicy::default());

        assert_eq!(before, snapshot);
        assert_ne!(after, before);
    }

    #[test]
    fn open_then_focus_scenario_puts_focused_window_on_top() {
        let state = run(&fresh(), &[open("about"), open("projects"), focus("about")]);

        assert_eq!(state.active_window_id, Some(id("about")));
        let about = state.window(&id("about")).unwrap();
        let projects = state.window(&id("projects")).unwrap();
        assert!(about.is_open && projects.is_open);
        assert!(about.z > projects.z);
    }

    #[test]
    fn reopening_an_open_window_still_bumps_z() {
        let once = run(&fresh(), &[open("about")]);
        let twice = run(&once, &[open("about")]);

        let about = twice.window(&id("about")).unwrap();
        assert!(about.is_open);
        assert_eq!(twice.active_window_id, Some(id("about")));
        assert_eq!(twice.top_z, once.top_z + 1);
        assert_eq!(about.z, twice.top_z);
    }

    #[test]
    fn focusing_the_topmost_window_keeps_the_counter() {
        let state = run(&fresh(), &[open("about"), open("projects")]);
        let refocused = run(&state, &[focus("projects")]);

        assert_eq!(refocused, state);
    }

    #[test]
    fn focusing_a_closed_or_unknown_window_is_a_noop() {
        let state = run(&fresh(), &[open("about")]);

        assert_eq!(run(&state, &[focus("contact")]), state);
        assert_eq!(run(&state, &[focus("missing")]), state);
        assert_eq!(run(&state, &[open("missing"), close("missing")]), state);

        let geometry = [
            DesktopAction::MoveWindow {
                window_id: id("missing"),
                x: 5,
                y: 5,
            },
            DesktopAction::ResizeWindow {
                window_id: id("missing"),
                width: 900,
                height: 700,
            },
            DesktopAction::ToggleMaximize {
                window_id: id("missing"),
                viewport: VIEWPORT,
            },
        ];
        assert_eq!(run(&state, &geometry), state);
    }

    #[test]
    fn z_counter_is_monotonic_and_active_holds_the_max() {
        let sequence = [
            open("about"),
            open("projects"),
            focus("about"),
            open("contact"),
            focus("projects"),
            focus("projects"),
            open("about"),
        ];
        let policy = LayoutPolicy::default();
        let mut state = fresh();
        for action in &sequence {
            let next = reduce_desktop(&state, action, &policy);
            assert!(next.top_z >= state.top_z);
            let active = next.active_window_id.clone().expect("active window");
            let max_z = next.open_windows().map(|w| w.z).max();
            assert_eq!(next.window(&active).map(|w| w.z), max_z);
            state = next;
        }
    }

    #[test]
    fn closing_the_active_window_activates_the_next_highest() {
        let mut state = fresh();
        for (raw, z) in [("about", 5), ("projects", 7), ("contact", 6)] {
            let index = state.window_index(&id(raw)).unwrap();
            state.windows[index].is_open = true;
            state.windows[index].z = z;
        }
        state.top_z = 7;
        state.active_window_id = Some(id("projects"));

        let closed = run(&state, &[close("projects")]);
        assert_eq!(closed.active_window_id, Some(id("contact")));
        assert!(!closed.window(&id("projects")).unwrap().is_open);
    }

    #[test]
    fn closing_an_inactive_window_keeps_focus() {
        let state = run(&fresh(), &[open("about"), open("projects"), close("about")]);
        assert_eq!(state.active_window_id, Some(id("projects")));
    }

    #[test]
    fn closing_the_last_window_clears_focus_but_not_overlays() {
        let state = run(
            &fresh(),
            &[
                open("about"),
                DesktopAction::SelectIcon { icon_id: id("contact") },
                DesktopAction::ShowContextMenu { x: 300, y: 200 },
                close("about"),
            ],
        );

        assert_eq!(state.active_window_id, None);
        assert_eq!(state.selected_icon_id, Some(id("contact")));
        assert_eq!(state.context_menu, Some(ContextMenuAnchor { x: 300, y: 200 }));

        assert_eq!(run(&state, &[close("about")]), state);
    }

    #[test]
    fn maximize_round_trip_restores_the_exact_geometry() {
        let start = run(
            &fresh(),
            &[
                open("about"),
                DesktopAction::MoveWindow {
                    window_id: id("about"),
                    x: 50,
                    y: 80,
                },
                DesktopAction::ResizeWindow {
                    window_id: id("about"),
                    width: 640,
                    height: 360,
                },
            ],
        );
        let toggle = DesktopAction::ToggleMaximize {
            window_id: id("about"),
            viewport: VIEWPORT,
        };

        let maximized = run(&start, &[toggle.clone()]);
        let about = maximized.window(&id("about")).unwrap();
        assert!(about.maximized);
        assert_eq!(
            about.rect,
            WindowRect {
                x: 20,
                y: 60,
                w: 1240,
                h: 720,
            }
        );

        let restored = run(&maximized, &[toggle]);
        let about = restored.window(&id("about")).unwrap();
        assert!(!about.maximized);
        assert_eq!(about.restore_rect, None);
        assert_eq!(
            about.rect,
            WindowRect {
                x: 50,
                y: 80,
                w: 640,
                h: 360,
            }
        );
    }

    #[test]
    fn resize_is_floored_and_move_is_not_clamped() {
        let state = run(
            &fresh(),
            &[
                DesktopAction::ResizeWindow {
                    window_id: id("contact"),
                    width: 10,
                    height: 10,
                },
                DesktopAction::MoveWindow {
                    window_id: id("contact"),
                    x: -400,
                    y: -30,
                },
            ],
        );
        let rect = state.window(&id("contact")).unwrap().rect;
        assert_eq!((rect.w, rect.h), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
        assert_eq!((rect.x, rect.y), (-400, -30));
    }

    #[test]
    fn reorganize_is_deterministic_and_hides_the_menu() {
        let scattered = run(
            &fresh(),
            &[
                DesktopAction::MoveIcon {
                    icon_id: id("about"),
                    x: 900,
                    y: 15,
                },
                DesktopAction::MoveIcon {
                    icon_id: id("contact"),
                    x: -20,
                    y: 640,
                },
                DesktopAction::ShowContextMenu { x: 10, y: 10 },
            ],
        );
        let once = run(&scattered, &[DesktopAction::ReorganizeIcons]);
        let twice = run(&once, &[DesktopAction::ReorganizeIcons]);

        assert_eq!(once, twice);
        assert_eq!(once.context_menu, None);
        let ys: Vec<i32> = once.icons.iter().map(|icon| icon.y).collect();
        assert_eq!(ys, vec![60, 150, 240]);
        assert!(once.icons.iter().all(|icon| icon.x == 20));
    }

    #[test]
    fn icon_selection_ignores_unknown_icons() {
        let state = run(&fresh(), &[DesktopAction::SelectIcon { icon_id: id("about") }]);
        assert_eq!(state.selected_icon_id, Some(id("about")));

        let unchanged = run(&state, &[DesktopAction::SelectIcon { icon_id: id("nope") }]);
        assert_eq!(unchanged.selected_icon_id, Some(id("about")));

        let cleared = run(&state, &[DesktopAction::DeselectIcon]);
        assert_eq!(cleared.selected_icon_id, None);
    }

    #[test]
    fn document_windows_are_created_on_open_and_removed_on_close() {
        let doc = id("projects/overview.mdx");
        let open_doc = DesktopAction::OpenDocument {
            window_id: doc.clone(),
            title: "overview.mdx".to_string(),
        };
        let state = run(&fresh(), &[open("projects"), open_doc.clone()]);

        let record = state.window(&doc).expect("document record");
        assert_eq!(record.kind, WindowKind::Document);
        assert_eq!(record.rect, LayoutPolicy::default().document_rect);
        assert_eq!(state.active_window_id, Some(doc.clone()));

        let reopened = run(&state, &[open_doc]);
        assert_eq!(reopened.windows.len(), state.windows.len());

        let closed = run(&reopened, &[close(doc.as_str())]);
        assert!(closed.window(&doc).is_none());
        assert_eq!(closed.active_window_id, Some(id("projects")));
    }

    #[test]
    fn unknown_ids_are_reported_by_the_action() {
        let state = fresh();
        assert!(open("missing").targets_unknown_id(&state));
        assert!(!open("about").targets_unknown_id(&state));
        assert!(DesktopAction::MoveIcon {
            icon_id: id("projects/overview.mdx"),
            x: 0,
            y: 0,
        }
        .targets_unknown_id(&state));
        assert!(!DesktopAction::OpenDocument {
            window_id: id("projects/new.mdx"),
            title: "new.mdx".to_string(),
        }
        .targets_unknown_id(&state));
        assert!(!DesktopAction::ReorganizeIcons.targets_unknown_id(&state));
    }
}
