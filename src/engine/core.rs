//! PlaybackEngine: backend selection, lazy resolution and lifecycle.
//!
//! This is the orchestrator the host drives, directly or through the
//! exported C surface in `api`. It owns the backend instance exclusively,
//! holds no internal locks, and expects single-writer discipline from the
//! caller; the FFI bridge serializes on its own.

use std::path::Path;

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::engine::backend::{BackendKind, BackendSelector, PlaybackBackend};
use crate::error::{log_audio_error, AudioError};

/// Identity-name sentinel after a selection change, before re-resolution.
const NAME_UNINITIALIZED: &str = "uninitialized";
/// Identity-name sentinel when resolution yields no backend.
const NAME_UNAVAILABLE: &str = "unavailable";

/// The playback engine core.
///
/// State machine: Stopped -> `start` -> Running -> `stop` -> Stopped.
/// A backend instance is resolved lazily the first time any operation needs
/// one, and discarded whenever the selector changes.
pub struct PlaybackEngine {
    selector: BackendSelector,
    running: bool,
    current_config: Option<EngineConfig>,
    backend: Option<Box<dyn PlaybackBackend>>,
    backend_id_cache: String,
    backend_name_cache: String,
}

impl PlaybackEngine {
    /// Create a stopped engine with the `auto` selector.
    pub fn new() -> Self {
        Self {
            selector: BackendSelector::Auto,
            running: false,
            current_config: None,
            backend: None,
            backend_id_cache: BackendSelector::Auto.as_str().to_string(),
            backend_name_cache: NAME_UNAVAILABLE.to_string(),
        }
    }

    /// Start the engine with the given config.
    ///
    /// Fails with `ConfigInvalid` before any resolution is attempted if a
    /// numeric field is zero, with `BackendUnavailable` if resolution cannot
    /// produce a usable backend, and with `StartFailed` if the backend
    /// refuses to start. State stays Stopped on every failure path; on
    /// success the config is recorded as `current_config`.
    pub fn start(&mut self, config: EngineConfig) -> Result<(), AudioError> {
        config.validate().map_err(|err| {
            log_audio_error(&err, "start");
            err
        })?;

        self.ensure_backend();
        let Some(backend) = self.backend.as_mut() else {
            let err = AudioError::BackendUnavailable {
                id: self.selector.as_str().to_string(),
            };
            log_audio_error(&err, "start");
            return Err(err);
        };
        if !backend.is_available() {
            let err = AudioError::BackendUnavailable {
                id: backend.id().to_string(),
            };
            log_audio_error(&err, "start");
            return Err(err);
        }

        if let Err(err) = backend.start(&config) {
            log_audio_error(&err, "start");
            return Err(AudioError::StartFailed {
                id: backend.id().to_string(),
            });
        }

        self.running = true;
        info!(
            "engine running on backend '{}' ({} Hz, {} frames)",
            self.backend_id_cache, config.sample_rate, config.buffer_size
        );
        self.current_config = Some(config);
        Ok(())
    }

    /// Stop the engine. Never fails; always ends in Stopped.
    pub fn stop(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.stop();
        }
        if self.running {
            debug!("engine stopped");
        }
        self.running = false;
    }

    /// Pure query of the cached lifecycle state.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin asynchronous playback of `path`, implicitly starting the
    /// engine first when stopped.
    ///
    /// The implicit start reuses the last successfully-applied config, or
    /// the default config if none was ever applied; either way the config
    /// used is recorded as `current_config` (it goes through [`start`]).
    /// Failures are routine here and reported as `false`, never raised.
    ///
    /// [`start`]: PlaybackEngine::start
    pub fn play_file(&mut self, path: &Path) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        if !self.running {
            let fallback = self.current_config.clone().unwrap_or_default();
            if self.start(fallback).is_err() {
                return false;
            }
        }
        self.ensure_backend();
        match self.backend.as_mut() {
            Some(backend) => backend.play_file(path),
            None => false,
        }
    }

    /// Stop any in-flight playback, resolving a backend if needed.
    ///
    /// Does not require the engine to be Running. Returns false when no
    /// backend is resolvable or the backend reports the stop call failed.
    pub fn stop_playback(&mut self) -> bool {
        self.ensure_backend();
        match self.backend.as_mut() {
            Some(backend) => backend.stop_playback(),
            None => false,
        }
    }

    /// Switch the backend selector.
    ///
    /// Unknown ids are rejected with `false` and leave all state untouched.
    /// On acceptance the engine is stopped if running, the cached backend
    /// instance is discarded, and the identity cache is reset; the next
    /// operation lazily re-resolves.
    pub fn set_backend(&mut self, token: &str) -> bool {
        let Some(selector) = BackendSelector::parse(token) else {
            warn!("rejecting unknown backend id '{}'", token);
            return false;
        };
        if self.running {
            self.stop();
        }
        self.selector = selector;
        self.backend = None;
        self.backend_id_cache = selector.as_str().to_string();
        self.backend_name_cache = NAME_UNINITIALIZED.to_string();
        info!("backend selector set to '{}'", selector.as_str());
        true
    }

    /// Whether the given backend id can play on this platform.
    ///
    /// `auto` maps to the platform-preferred concrete variant. Probes a
    /// throwaway candidate; engine state is never touched.
    pub fn is_backend_available(&self, token: &str) -> bool {
        match BackendSelector::parse(token) {
            Some(selector) => selector.effective_kind().create().is_available(),
            None => false,
        }
    }

    /// Id of the cached backend, or of whatever `auto` would resolve to.
    ///
    /// Populates the identity cache as a side effect but never mutates
    /// `running` or the selector.
    pub fn backend_id(&mut self) -> String {
        self.refresh_identity();
        self.backend_id_cache.clone()
    }

    /// Human-readable name companion to [`backend_id`].
    ///
    /// [`backend_id`]: PlaybackEngine::backend_id
    pub fn backend_name(&mut self) -> String {
        self.refresh_identity();
        self.backend_name_cache.clone()
    }

    /// Current selector token.
    pub fn selected_backend(&self) -> &'static str {
        self.selector.as_str()
    }

    /// Last successfully-applied config, if the engine ever started.
    pub fn current_config(&self) -> Option<&EngineConfig> {
        self.current_config.as_ref()
    }

    /// Resolve the selector into a fresh backend instance.
    ///
    /// Concrete selectors construct directly with no fallback. `auto` tries
    /// the platform-preferred variant, accepting it only if available, then
    /// falls back to the placeholder unconditionally so a resolvable
    /// instance always exists. Never probes more than one non-placeholder
    /// candidate.
    fn resolve_backend(&self) -> Option<Box<dyn PlaybackBackend>> {
        match self.selector {
            BackendSelector::Concrete(kind) => Some(kind.create()),
            BackendSelector::Auto => {
                let preferred = BackendKind::preferred().create();
                if preferred.is_available() {
                    Some(preferred)
                } else {
                    Some(BackendKind::Juce.create())
                }
            }
        }
    }

    /// Resolve and cache a backend instance if none is held yet.
    fn ensure_backend(&mut self) {
        if self.backend.is_some() {
            return;
        }
        match self.resolve_backend() {
            Some(backend) => {
                self.backend_id_cache = backend.id().to_string();
                self.backend_name_cache = backend.name().to_string();
                self.backend = Some(backend);
            }
            None => {
                self.backend_id_cache = self.selector.as_str().to_string();
                self.backend_name_cache = NAME_UNAVAILABLE.to_string();
            }
        }
    }

    /// Refresh the identity cache without caching a backend instance.
    fn refresh_identity(&mut self) {
        if let Some(backend) = self.backend.as_ref() {
            self.backend_id_cache = backend.id().to_string();
            self.backend_name_cache = backend.name().to_string();
            return;
        }
        match self.resolve_backend() {
            Some(resolved) => {
                self.backend_id_cache = resolved.id().to_string();
                self.backend_name_cache = resolved.name().to_string();
            }
            None => {
                self.backend_id_cache = self.selector.as_str().to_string();
                self.backend_name_cache = NAME_UNAVAILABLE.to_string();
            }
        }
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
