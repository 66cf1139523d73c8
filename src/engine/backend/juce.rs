//! Placeholder backend standing in for the full JUCE-based engine.
//!
//! Not yet integrated: every operation fails or no-ops without side
//! effects. Its presence gives `auto` resolution a terminal fallback
//! candidate, so the engine never has to special-case "no backend".

use std::path::Path;

use crate::config::EngineConfig;
use crate::error::AudioError;

use super::PlaybackBackend;

pub struct JucePlaceholderBackend {
    _unit: (),
}

impl JucePlaceholderBackend {
    pub fn new() -> Self {
        Self { _unit: () }
    }
}

impl Default for JucePlaceholderBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackBackend for JucePlaceholderBackend {
    fn id(&self) -> &'static str {
        "juce"
    }

    fn name(&self) -> &'static str {
        "juce-placeholder"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _config: &EngineConfig) -> Result<(), AudioError> {
        Err(AudioError::BackendUnavailable {
            id: self.id().to_string(),
        })
    }

    fn stop(&mut self) {}

    fn play_file(&mut self, _path: &Path) -> bool {
        false
    }

    fn stop_playback(&mut self) -> bool {
        false
    }
}
