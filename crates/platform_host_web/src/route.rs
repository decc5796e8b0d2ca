//! `window.history`-backed route sync.

use platform_host::RouteService;

#[derive(Debug, Clone, Copy, Default)]
/// Browser route adapter reading `location.pathname` and pushing via `history.pushState`.
pub struct WebRouteService;

impl RouteService for WebRouteService {
    fn current_path(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.location().pathname().ok())
                .filter(|path| !path.is_empty())
                .unwrap_or_else(|| "/".to_string())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            "/".to_string()
        }
    }

    fn push_path(&self, path: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            if self.current_path() == path {
                return Ok(());
            }
            let history = web_sys::window()
                .ok_or_else(|| "window unavailable".to_string())?
                .history()
                .map_err(|err| format!("history unavailable: {err:?}"))?;
            history
                .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
                .map_err(|err| format!("history.pushState failed for `{path}`: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = path;
            Ok(())
        }
    }
}
