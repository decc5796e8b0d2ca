//! Geometry and stacking-order policy shared by the desktop reducer and the store.
//!
//! Everything here is a pure function of its inputs. Stacking uses a single monotonically
//! increasing counter: raising a window stamps it with a fresh maximum, so "is topmost" is a
//! comparison against the counter and "who is on top after a close" is a scan over open windows.

use crate::model::{DesktopState, ResizeEdge, ViewportSize, WindowRecord, WindowRect};

/// Minimum allowed window width.
pub const MIN_WINDOW_WIDTH: i32 = 320;
/// Minimum allowed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Gap kept between a maximized window and the viewport edges.
pub const MAXIMIZE_PADDING: i32 = 20;
/// Height of the status bar band reserved above maximized windows.
pub const STATUS_BAR_HEIGHT: i32 = 40;
/// Column x position of desktop icons.
pub const ICON_COLUMN_X: i32 = 20;
/// Y position of the first desktop icon.
pub const ICON_COLUMN_TOP: i32 = 60;
/// Vertical distance between consecutive desktop icons.
pub const ICON_ROW_HEIGHT: i32 = 90;

/// Single-column icon layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconColumn {
    pub x: i32,
    pub top: i32,
    pub row_height: i32,
}

impl IconColumn {
    /// Position of the icon at `index` in the column.
    pub fn slot(self, index: usize) -> (i32, i32) {
        let row = i32::try_from(index).unwrap_or(i32::MAX);
        (self.x, self.top.saturating_add(self.row_height.saturating_mul(row)))
    }
}

impl Default for IconColumn {
    fn default() -> Self {
        Self {
            x: ICON_COLUMN_X,
            top: ICON_COLUMN_TOP,
            row_height: ICON_ROW_HEIGHT,
        }
    }
}

/// Geometry limits applied by every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    pub min_width: i32,
    pub min_height: i32,
    pub maximize_padding: i32,
    pub status_bar_height: i32,
    /// Geometry given to a document window when it is first opened.
    pub document_rect: WindowRect,
    pub icon_column: IconColumn,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
            maximize_padding: MAXIMIZE_PADDING,
            status_bar_height: STATUS_BAR_HEIGHT,
            document_rect: WindowRect {
                x: 100,
                y: 100,
                w: 640,
                h: 480,
            },
            icon_column: IconColumn::default(),
        }
    }
}

impl LayoutPolicy {
    /// Floors a requested size at the minimum window size.
    pub fn clamp_size(&self, width: i32, height: i32) -> (i32, i32) {
        (width.max(self.min_width), height.max(self.min_height))
    }
}

/// Rect of size `w`×`h` centered in `viewport`, kept clear of the padding and status bar band.
pub fn centered_rect(w: i32, h: i32, viewport: ViewportSize, policy: &LayoutPolicy) -> WindowRect {
    WindowRect {
        x: ((viewport.width - w) / 2).max(policy.maximize_padding),
        y: ((viewport.height - h) / 2).max(policy.maximize_padding + policy.status_bar_height),
        w,
        h,
    }
}

/// Cascaded placement for the `index`-th panel; index 0 and 1 both sit at `origin`.
pub fn cascade_rect(index: usize, origin: (i32, i32), step: i32, w: i32, h: i32) -> WindowRect {
    let steps = i32::try_from(index.saturating_sub(1)).unwrap_or(i32::MAX);
    let offset = step.saturating_mul(steps);
    WindowRect {
        x: origin.0.saturating_add(offset),
        y: origin.1.saturating_add(offset),
        w,
        h,
    }
}

/// Viewport-filling geometry below the status bar band.
pub fn maximized_rect(viewport: ViewportSize, policy: &LayoutPolicy) -> WindowRect {
    let padding = policy.maximize_padding;
    WindowRect {
        x: padding,
        y: padding + policy.status_bar_height,
        w: viewport.width - padding * 2,
        h: viewport.height - padding * 2 - policy.status_bar_height,
    }
    .clamped_min(policy.min_width, policy.min_height)
}

/// Maximizes a restored window or restores a maximized one.
pub fn toggle_maximize(window: &mut WindowRecord, viewport: ViewportSize, policy: &LayoutPolicy) {
    if window.maximized {
        if let Some(restore_rect) = window.restore_rect.take() {
            window.rect = restore_rect;
        }
        window.maximized = false;
    } else {
        window.restore_rect = Some(window.rect);
        window.rect = maximized_rect(viewport, policy);
        window.maximized = true;
    }
}

/// Applies a pointer resize delta for a grabbed edge or corner.
///
/// East/south edges grow the size. West/north edges move the origin with the pointer; once the
/// floor is hit the opposite edge stays anchored.
pub fn resize_from_edge(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    policy: &LayoutPolicy,
) -> WindowRect {
    let (x, w) = resize_axis(start.x, start.w, dx, edge.horizontal(), policy.min_width);
    let (y, h) = resize_axis(start.y, start.h, dy, edge.vertical(), policy.min_height);
    WindowRect { x, y, w, h }
}

fn resize_axis(origin: i32, size: i32, delta: i32, direction: i8, min: i32) -> (i32, i32) {
    match direction {
        1 => (origin, (size + delta).max(min)),
        -1 => {
            let proposed = size - delta;
            if proposed >= min {
                (origin + delta, proposed)
            } else {
                (origin + (size - min), min)
            }
        }
        _ => (origin, size),
    }
}

/// Whether `window` holds the current stacking maximum.
pub fn is_topmost(window: &WindowRecord, top_z: u32) -> bool {
    window.z == top_z
}

/// Stamps the window at `index` with a fresh stacking maximum.
pub fn raise_to_top(state: &mut DesktopState, index: usize) {
    let Some(window) = state.windows.get_mut(index) else {
        return;
    };
    state.top_z = state.top_z.saturating_add(1);
    window.z = state.top_z;
}

/// Open window with the highest z; ties go to the lowest id.
pub fn topmost_open_window(windows: &[WindowRecord]) -> Option<&WindowRecord> {
    windows
        .iter()
        .filter(|w| w.is_open)
        .max_by(|a, b| a.z.cmp(&b.z).then_with(|| b.id.cmp(&a.id)))
}
