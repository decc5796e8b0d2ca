//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for the side effects the window manager triggers but does
//! not own: feedback sounds, route sync, and viewport queries. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod host;
pub mod route;
pub mod viewport;

pub use audio::{
    AudioCueService, MemoryAudioCueService, NoopAudioCueService, SoundCue, ToneSpec,
    RELEASE_FLOOR_GAIN,
};
pub use host::{HostServices, HostStrategy};
pub use route::{MemoryRouteService, NoopRouteService, RouteService};
pub use viewport::{FixedViewportService, ViewportService, ViewportSize};
