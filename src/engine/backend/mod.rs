//! Backend abstractions for the playback engine core.
//!
//! Each backend is a self-contained playback strategy behind the
//! [PlaybackBackend] trait. The id vocabulary is closed: adding a variant
//! means extending [BackendKind], and every match on it is exhaustive.

use std::path::Path;

use crate::config::EngineConfig;
use crate::error::AudioError;

mod juce;
mod winmm;

pub use juce::JucePlaceholderBackend;
pub use winmm::WinMmBackend;

/// Trait implemented by concrete playback strategies.
///
/// `id`/`name`/`is_available` are pure; `play_file` issues an asynchronous,
/// fire-and-forget request and never blocks for the duration of playback.
pub trait PlaybackBackend: Send {
    /// Fixed lowercase backend id token.
    fn id(&self) -> &'static str;

    /// Human-readable backend name.
    fn name(&self) -> &'static str;

    /// Whether this backend can actually play on the running platform.
    fn is_available(&self) -> bool;

    /// Bring the backend into a running state for the given config.
    fn start(&mut self, config: &EngineConfig) -> Result<(), AudioError>;

    /// Stop any active playback and clear running state. Idempotent.
    fn stop(&mut self);

    /// Begin asynchronous playback of the file at `path`.
    ///
    /// Implicitly starts the backend with a default config if it is not
    /// running yet. Returns false on an empty path, an unavailable backend,
    /// or a failed OS call.
    fn play_file(&mut self, path: &Path) -> bool;

    /// Stop any in-flight playback. Must not error when nothing is playing.
    fn stop_playback(&mut self) -> bool;
}

/// The closed set of concrete backend variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Native OS sound-playback service (Windows PlaySound)
    WinMm,
    /// Placeholder for the not-yet-integrated full engine
    Juce,
}

impl BackendKind {
    pub fn id(self) -> &'static str {
        match self {
            BackendKind::WinMm => "winmm",
            BackendKind::Juce => "juce",
        }
    }

    /// The platform-preferred variant tried first by `auto` resolution.
    pub fn preferred() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(windows)] {
                BackendKind::WinMm
            } else {
                BackendKind::Juce
            }
        }
    }

    /// Construct a fresh instance of this variant.
    pub fn create(self) -> Box<dyn PlaybackBackend> {
        match self {
            BackendKind::WinMm => Box::new(WinMmBackend::new()),
            BackendKind::Juce => Box::new(JucePlaceholderBackend::new()),
        }
    }
}

/// Backend selector: `auto` or one concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendSelector {
    #[default]
    Auto,
    Concrete(BackendKind),
}

impl BackendSelector {
    /// Parse a selector token, case-insensitively.
    ///
    /// Anything outside `{auto, winmm, juce}` is rejected with `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(BackendSelector::Auto),
            "winmm" => Some(BackendSelector::Concrete(BackendKind::WinMm)),
            "juce" => Some(BackendSelector::Concrete(BackendKind::Juce)),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BackendSelector::Auto => "auto",
            BackendSelector::Concrete(kind) => kind.id(),
        }
    }

    /// The concrete kind this selector maps to, before availability checks.
    pub fn effective_kind(self) -> BackendKind {
        match self {
            BackendSelector::Auto => BackendKind::preferred(),
            BackendSelector::Concrete(kind) => kind,
        }
    }
}
