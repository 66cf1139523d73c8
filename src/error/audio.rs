// Audio error types and constants

use std::fmt;

use log::error;

use crate::error::ErrorCode;

/// Audio error code constants exposed to hosts across the FFI boundary
///
/// These constants provide a single source of truth for error codes shared
/// between the core and any foreign host that wants to interpret failures
/// beyond the boolean results of the C ABI.
///
/// Error code range: 1001-1005
pub struct AudioErrorCodes {}

impl AudioErrorCodes {
    /// Engine config has a zero-valued sample rate or buffer size
    pub const CONFIG_INVALID: i32 = 1001;

    /// Resolution could not produce a usable backend
    pub const BACKEND_UNAVAILABLE: i32 = 1002;

    /// The resolved backend refused to start
    pub const START_FAILED: i32 = 1003;

    /// Backend id is outside the closed selector vocabulary
    pub const UNKNOWN_BACKEND: i32 = 1004;

    /// The bridge mutex guarding the process-wide engine was poisoned
    pub const LOCK_POISONED: i32 = 1005;
}

/// Log an audio error with structured context
///
/// Logs with the numeric error code so host-side log scrapers can match on
/// it. Non-blocking, never panics.
pub fn log_audio_error(err: &AudioError, context: &str) {
    error!(
        "audio error in {}: code={}, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors surfaced by the playback engine and its backends
///
/// `play_file`/`stop_playback` report failure as plain booleans so hosts
/// can treat playback failures as routine; this enum covers the
/// `start`-path failures and diagnostics. Error code range: 1001-1005.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Engine config has a zero-valued numeric field
    ConfigInvalid { sample_rate: u32, buffer_size: u32 },

    /// Resolution yielded no backend, or the resolved backend is
    /// unavailable on this platform
    BackendUnavailable { id: String },

    /// The resolved backend reported failure from its own start
    StartFailed { id: String },

    /// Backend id outside `{auto, winmm, juce}`
    UnknownBackend { id: String },

    /// The FFI bridge mutex was poisoned
    LockPoisoned,
}

impl ErrorCode for AudioError {
    fn code(&self) -> i32 {
        match self {
            AudioError::ConfigInvalid { .. } => AudioErrorCodes::CONFIG_INVALID,
            AudioError::BackendUnavailable { .. } => AudioErrorCodes::BACKEND_UNAVAILABLE,
            AudioError::StartFailed { .. } => AudioErrorCodes::START_FAILED,
            AudioError::UnknownBackend { .. } => AudioErrorCodes::UNKNOWN_BACKEND,
            AudioError::LockPoisoned => AudioErrorCodes::LOCK_POISONED,
        }
    }

    fn message(&self) -> String {
        match self {
            AudioError::ConfigInvalid {
                sample_rate,
                buffer_size,
            } => {
                format!(
                    "sample_rate and buffer_size must be non-zero (got {} Hz, {} frames)",
                    sample_rate, buffer_size
                )
            }
            AudioError::BackendUnavailable { id } => {
                format!("backend '{}' is unavailable on this platform", id)
            }
            AudioError::StartFailed { id } => {
                format!("backend '{}' failed to start", id)
            }
            AudioError::UnknownBackend { id } => {
                format!("unknown backend id '{}' (expected auto, winmm or juce)", id)
            }
            AudioError::LockPoisoned => "engine bridge lock poisoned".to_string(),
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AudioError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for AudioError {}
