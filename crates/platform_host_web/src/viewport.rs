//! `window.innerWidth`/`innerHeight` viewport queries.

use platform_host::{ViewportService, ViewportSize};

#[derive(Debug, Clone, Copy, Default)]
/// Browser viewport adapter.
pub struct WebViewportService;

impl ViewportService for WebViewportService {
    fn viewport_size(&self) -> ViewportSize {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let fallback = ViewportSize::default();
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback.width);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback.height);
                return ViewportSize { width, height };
            }
        }

        ViewportSize::default()
    }
}
