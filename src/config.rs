//! Engine configuration types
//!
//! `EngineConfig` is the value type handed to `start`; `EngineSettings` is
//! an optional JSON profile (backend preselection plus an engine config)
//! loaded by composition points such as the CLI, enabling host-side tuning
//! without recompilation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AudioError;

/// Requested engine parameters
///
/// Carries no behavior beyond validation. Both numeric fields must be
/// non-zero before the engine may transition to running; this is checked
/// once at start time, not at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Buffer size in frames
    pub buffer_size: u32,
    /// Output device identifier; `None` means the system default
    #[serde(default)]
    pub device_id: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            buffer_size: 256,
            device_id: None,
        }
    }
}

impl EngineConfig {
    /// Check the start-time invariant on the numeric fields.
    pub fn validate(&self) -> Result<(), AudioError> {
        if self.sample_rate == 0 || self.buffer_size == 0 {
            return Err(AudioError::ConfigInvalid {
                sample_rate: self.sample_rate,
                buffer_size: self.buffer_size,
            });
        }
        Ok(())
    }
}

/// Persistent playback settings profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Backend selector: `auto` or a concrete backend id
    pub backend: String,
    pub engine: EngineConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            backend: "auto".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl EngineSettings {
    /// Load settings from a JSON file, falling back to defaults.
    ///
    /// A missing file is normal (first run); a malformed file is logged and
    /// ignored rather than failing the host.
    pub fn load_from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("loaded engine settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!(
                        "failed to parse {}: {}; using default settings",
                        path.display(),
                        err
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
