//! Viewport size queries.

use serde::{Deserialize, Serialize};

/// Inner size of the host viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width.
    pub width: i32,
    /// Viewport height.
    pub height: i32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Host service reporting the current viewport size.
pub trait ViewportService {
    /// Returns the current inner viewport size.
    fn viewport_size(&self) -> ViewportSize;
}

#[derive(Debug, Clone, Copy, Default)]
/// Viewport service reporting a fixed size.
pub struct FixedViewportService(pub ViewportSize);

impl ViewportService for FixedViewportService {
    fn viewport_size(&self) -> ViewportSize {
        self.0
    }
}
