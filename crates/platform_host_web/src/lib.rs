//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Each adapter compiles on every target; outside `wasm32` it degrades to the same behavior as
//! the headless adapters so native tests can exercise the wiring.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the concrete bundle factory for runtime wiring.
pub mod adapters;
/// Web Audio playback of feedback cues.
pub mod audio;
/// `location`/`history` route sync.
pub mod route;
/// Window inner-size queries.
pub mod viewport;

pub use adapters::{build_host_services, host_strategy_name, selected_host_strategy};
pub use audio::WebAudioCueService;
pub use route::WebRouteService;
pub use viewport::WebViewportService;
