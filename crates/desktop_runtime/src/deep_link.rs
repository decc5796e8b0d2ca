//! Address-bar paths mapped to desktop windows and back.

use crate::{
    manifest::{PanelKind, PanelManifest},
    model::{DesktopState, WindowId},
};

/// Path of the bare desktop.
pub const HOME_ROUTE: &str = "/";

/// Window addressed by a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkTarget {
    /// `/`: no window focused.
    Home,
    /// `/<panel>`: a manifest panel.
    Panel(WindowId),
    /// `/<folder>/<file>`: a document inside a folder panel.
    Document {
        /// Full document id (`<folder>/<file>`).
        window_id: WindowId,
        /// File name shown as the window title.
        title: String,
    },
}

impl DeepLinkTarget {
    /// Resolves `path` against the manifest.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Returns `None` for paths that
    /// name no panel, or a document under a panel that is not a folder.
    pub fn parse(path: &str, manifest: &PanelManifest) -> Option<Self> {
        let path = route_path(path);
        if path.is_empty() {
            return Some(Self::Home);
        }

        let mut segments = path.split('/');
        let panel_id = segments.next()?;
        let panel = manifest.panel(panel_id)?;
        match (segments.next(), segments.next()) {
            (None, _) => Some(Self::Panel(WindowId::new(panel_id))),
            (Some(file), None) if !file.is_empty() && panel.kind == PanelKind::Folder => {
                Some(Self::Document {
                    window_id: WindowId::new(format!("{panel_id}/{file}")),
                    title: file.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// Route reflecting the active window, or [`HOME_ROUTE`] when nothing is focused.
pub fn route_for(state: &DesktopState) -> String {
    state
        .active_window_id
        .as_ref()
        .map_or_else(|| HOME_ROUTE.to_string(), route_for_window)
}

pub fn route_for_window(window_id: &WindowId) -> String {
    format!("/{window_id}")
}

pub fn is_home_route(path: &str) -> bool {
    route_path(path).is_empty()
}

/// Path without query, fragment, or surrounding slashes.
fn route_path(path: &str) -> &str {
    path.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_matches('/')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(path: &str) -> Option<DeepLinkTarget> {
        DeepLinkTarget::parse(path, &PanelManifest::default())
    }

    #[test]
    fn root_variants_resolve_home() {
        for path in ["/", "", "/?utm=1", "/#top", "//"] {
            assert_eq!(parse(path), Some(DeepLinkTarget::Home), "{path}");
            assert!(is_home_route(path));
        }
        assert!(!is_home_route("/about"));
    }

    #[test]
    fn panel_routes_resolve_manifest_ids() {
        assert_eq!(
            parse("/about"),
            Some(DeepLinkTarget::Panel(WindowId::from("about")))
        );
        assert_eq!(
            parse("/contact/?ref=mail"),
            Some(DeepLinkTarget::Panel(WindowId::from("contact")))
        );
        assert_eq!(parse("/blog"), None);
    }

    #[test]
    fn document_routes_require_a_folder_panel() {
        assert_eq!(
            parse("/projects/overview.mdx"),
            Some(DeepLinkTarget::Document {
                window_id: WindowId::from("projects/overview.mdx"),
                title: "overview.mdx".to_string(),
            })
        );
        assert_eq!(parse("/about/overview.mdx"), None);
        assert_eq!(parse("/projects/a/b.mdx"), None);
    }

    #[test]
    fn route_tracks_the_active_window() {
        let mut state = crate::manifest::initial_state(
            &PanelManifest::default(),
            &crate::config::DesktopConfig::default(),
            Default::default(),
        );
        assert_eq!(route_for(&state), "/");

        state.active_window_id = Some(WindowId::from("projects/overview.mdx"));
        assert_eq!(route_for(&state), "/projects/overview.mdx");
    }
}
