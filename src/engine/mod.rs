//! Engine module housing the playback core.
//!
//! `backend` holds the trait-based playback strategies and the closed id
//! vocabulary; `core` holds the [PlaybackEngine] orchestration layer the
//! host drives through the exported C surface.
//!
//! [PlaybackEngine]: core::PlaybackEngine

pub mod backend;
pub mod core;

pub use backend::{
    BackendKind, BackendSelector, JucePlaceholderBackend, PlaybackBackend, WinMmBackend,
};
pub use core::PlaybackEngine;
