//! Static panel manifest and the initial desktop layout derived from it.
//!
//! Icons and panel windows share one id space. Both are built once from the manifest so opening a
//! window never needs a separate icon-creation step.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::DesktopConfig,
    model::{DesktopState, IconRecord, ViewportSize, WindowId, WindowKind, WindowRecord},
    window_manager::{cascade_rect, centered_rect},
};

/// Embedded default manifest.
pub const DEFAULT_MANIFEST_TOML: &str = include_str!("../config/panels.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    /// Single document rendered directly in the panel.
    #[default]
    Document,
    /// Folder whose files open as ad hoc document windows (`<panel>/<file>`).
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: PanelKind,
}

/// Ordered list of panels available on the desktop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelManifest {
    pub panels: Vec<PanelEntry>,
}

impl Default for PanelManifest {
    fn default() -> Self {
        let entry = |id: &str, title: &str, kind| PanelEntry {
            id: id.to_string(),
            title: title.to_string(),
            kind,
        };
        Self {
            panels: vec![
                entry("about", "about.mdx", PanelKind::Document),
                entry("projects", "projects", PanelKind::Folder),
                entry("contact", "contact.mdx", PanelKind::Document),
            ],
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid panel manifest TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("panel manifest lists no panels")]
    Empty,
    #[error("panel id `{0}` is listed more than once")]
    DuplicateId(String),
    #[error("panel id `{0}` must be non-empty and must not contain `/`")]
    InvalidId(String),
}

impl PanelManifest {
    /// Parses and validates a TOML manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] for malformed TOML, an empty list, or bad/duplicate ids.
    pub fn from_toml_str(raw: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// # Errors
    ///
    /// Returns the first structural problem found.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.panels.is_empty() {
            return Err(ManifestError::Empty);
        }
        let mut seen = HashSet::new();
        for panel in &self.panels {
            let id = panel.id.trim();
            if id.is_empty() || id != panel.id || id.contains('/') {
                return Err(ManifestError::InvalidId(panel.id.clone()));
            }
            if !seen.insert(id) {
                return Err(ManifestError::DuplicateId(panel.id.clone()));
            }
        }
        Ok(())
    }

    pub fn panel(&self, id: &str) -> Option<&PanelEntry> {
        self.panels.iter().find(|panel| panel.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panel(id).is_some()
    }
}

/// Builds the session-start state: every panel closed, the first panel centered in `viewport`,
/// later panels cascaded, z seeded just below the counter, icons in one column.
pub fn initial_state(
    manifest: &PanelManifest,
    config: &DesktopConfig,
    viewport: ViewportSize,
) -> DesktopState {
    let policy = config.layout_policy();
    let window = &config.window;
    let (w, h) = (window.default_width, window.default_height);

    let windows = manifest
        .panels
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            let rect = if index == 0 {
                centered_rect(w, h, viewport, &policy)
            } else {
                cascade_rect(
                    index,
                    (window.cascade_x, window.cascade_y),
                    window.cascade_step,
                    w,
                    h,
                )
            };
            let below = u32::try_from(index).unwrap_or(u32::MAX);
            WindowRecord {
                id: WindowId::new(panel.id.clone()),
                title: panel.title.clone(),
                kind: WindowKind::Panel,
                is_open: false,
                rect,
                z: window.base_z.saturating_sub(below),
                maximized: false,
                restore_rect: None,
            }
        })
        .collect();

    let icons = manifest
        .panels
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            let (x, y) = policy.icon_column.slot(index);
            IconRecord {
                id: WindowId::new(panel.id.clone()),
                title: panel.title.clone(),
                x,
                y,
            }
        })
        .collect();

    DesktopState {
        top_z: window.base_z,
        windows,
        icons,
        active_window_id: None,
        selected_icon_id: None,
        context_menu: None,
    }
}
