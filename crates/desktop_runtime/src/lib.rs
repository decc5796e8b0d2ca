//! Window-manager state core for a single-page desktop portfolio.
//!
//! [`reduce_desktop`] is the pure transition function, [`DesktopStore`] the command layer that owns
//! the live state, and [`DesktopProvider`] the Leptos provider that wires both to host services.

pub mod config;
pub mod deep_link;
pub mod effect_executor;
pub mod host;
pub mod manifest;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod store;
pub mod window_manager;

pub use config::{ConfigError, DesktopConfig};
pub use deep_link::{route_for, DeepLinkTarget};
pub use host::DesktopHostContext;
pub use manifest::{initial_state, ManifestError, PanelEntry, PanelKind, PanelManifest};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use store::{derive_effects, DesktopStore, RuntimeEffect, SubscriptionId};
pub use window_manager::{topmost_open_window, LayoutPolicy};
