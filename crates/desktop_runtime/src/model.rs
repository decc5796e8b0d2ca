use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use platform_host::ViewportSize;

/// Open-ended window identifier shared by desktop icons and their windows.
///
/// Manifest panels use bare ids (`about`); ad hoc document windows use `<folder>/<file>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            w: 640,
            h: 360,
        }
    }
}

/// Lifetime class of a window record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    /// Manifest panel: the record always exists and is only toggled open/closed.
    Panel,
    /// Ad hoc document: the record is created on first open and removed on close.
    Document,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub kind: WindowKind,
    pub is_open: bool,
    pub rect: WindowRect,
    pub z: u32,
    pub maximized: bool,
    /// Pre-maximize geometry; present only while `maximized`.
    pub restore_rect: Option<WindowRect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub id: WindowId,
    pub title: String,
    pub x: i32,
    pub y: i32,
}

impl IconRecord {
    /// Position after applying a drag delta.
    pub fn offset(&self, dx: i32, dy: i32) -> (i32, i32) {
        (self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuAnchor {
    pub x: i32,
    pub y: i32,
}

/// Edge or corner grabbed during a pointer resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    /// Horizontal direction of the grabbed edge: `-1` west, `1` east, `0` none.
    pub fn horizontal(self) -> i8 {
        if self.moves_west() {
            -1
        } else if self.moves_east() {
            1
        } else {
            0
        }
    }

    /// Vertical direction of the grabbed edge: `-1` north, `1` south, `0` none.
    pub fn vertical(self) -> i8 {
        if self.moves_north() {
            -1
        } else if self.moves_south() {
            1
        } else {
            0
        }
    }
}

/// The single authoritative desktop value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Highest stacking value handed out so far. Never decreases.
    pub top_z: u32,
    /// Manifest panels in manifest order, followed by open documents in open order.
    pub windows: Vec<WindowRecord>,
    /// One icon per manifest panel, in manifest order.
    pub icons: Vec<IconRecord>,
    pub active_window_id: Option<WindowId>,
    pub selected_icon_id: Option<WindowId>,
    pub context_menu: Option<ContextMenuAnchor>,
}

impl DesktopState {
    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn window_index(&self, window_id: &WindowId) -> Option<usize> {
        self.windows.iter().position(|w| &w.id == window_id)
    }

    pub fn icon(&self, icon_id: &WindowId) -> Option<&IconRecord> {
        self.icons.iter().find(|icon| &icon.id == icon_id)
    }

    pub fn open_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| w.is_open)
    }

    pub fn is_active(&self, window_id: &WindowId) -> bool {
        self.active_window_id.as_ref() == Some(window_id)
    }

    /// Checks the structural invariants every transition must preserve.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for window in &self.windows {
            if window.maximized != window.restore_rect.is_some() {
                return Err(InvariantViolation::RestoreRectMismatch(window.id.clone()));
            }
            if window.z > self.top_z {
                return Err(InvariantViolation::ZAboveCounter {
                    window_id: window.id.clone(),
                    z: window.z,
                    top_z: self.top_z,
                });
            }
            if window.kind == WindowKind::Document && !window.is_open {
                return Err(InvariantViolation::ClosedDocumentRetained(window.id.clone()));
            }
        }

        let max_z = self.open_windows().map(|w| w.z).max();
        let Some(max_z) = max_z else {
            return match &self.active_window_id {
                Some(active) => Err(InvariantViolation::ActiveWithoutOpenWindows(active.clone())),
                None => Ok(()),
            };
        };

        let holders = self.open_windows().filter(|w| w.z == max_z).count();
        if holders != 1 {
            return Err(InvariantViolation::SharedTopZ(max_z));
        }
        let active_z = self
            .active_window_id
            .as_ref()
            .and_then(|id| self.window(id))
            .filter(|w| w.is_open)
            .map(|w| w.z);
        if active_z != Some(max_z) {
            return Err(InvariantViolation::ActiveNotTopmost);
        }
        Ok(())
    }
}

/// Structural inconsistency detected by [`DesktopState::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("window `{0}` has a maximized flag that disagrees with its restore geometry")]
    RestoreRectMismatch(WindowId),
    #[error("window `{window_id}` has z {z} above the stacking counter {top_z}")]
    ZAboveCounter {
        window_id: WindowId,
        z: u32,
        top_z: u32,
    },
    #[error("document window `{0}` is closed but still present")]
    ClosedDocumentRetained(WindowId),
    #[error("active window `{0}` is set while no window is open")]
    ActiveWithoutOpenWindows(WindowId),
    #[error("more than one open window holds the top z {0}")]
    SharedTopZ(u32),
    #[error("the active window is not the topmost open window")]
    ActiveNotTopmost,
}
