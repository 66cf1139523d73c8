//! Native-service backend delegating to the Windows PlaySound facility.
//!
//! Playback requests are issued in fire-and-forget mode (`SND_ASYNC`), so
//! the calling thread is never held for the duration of playback; the OS
//! service opens and closes its stream per request. Availability is a
//! compile-time platform characteristic, not a runtime probe.

use std::path::Path;

use log::{debug, warn};

use crate::config::EngineConfig;
use crate::error::AudioError;

use super::PlaybackBackend;

/// Playback strategy backed by the host-OS sound-playback service.
///
/// The type is compiled on every platform so selection and identity queries
/// work everywhere; only the OS calls are Windows-gated.
pub struct WinMmBackend {
    running: bool,
}

impl WinMmBackend {
    pub fn new() -> Self {
        Self { running: false }
    }
}

impl Default for WinMmBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackBackend for WinMmBackend {
    fn id(&self) -> &'static str {
        "winmm"
    }

    fn name(&self) -> &'static str {
        "winmm-playsound"
    }

    fn is_available(&self) -> bool {
        cfg!(windows)
    }

    fn start(&mut self, config: &EngineConfig) -> Result<(), AudioError> {
        if !self.is_available() {
            return Err(AudioError::BackendUnavailable {
                id: self.id().to_string(),
            });
        }
        config.validate()?;
        // PlaySound opens a stream per request, so start only records the
        // running flag; there is no persistent device handle to hold.
        self.running = true;
        debug!(
            "winmm backend started ({} Hz, {} frames)",
            config.sample_rate, config.buffer_size
        );
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_playback();
        self.running = false;
    }

    fn play_file(&mut self, path: &Path) -> bool {
        if !self.is_available() || path.as_os_str().is_empty() {
            return false;
        }
        if !self.running && self.start(&EngineConfig::default()).is_err() {
            return false;
        }
        let ok = service_play(path);
        if !ok {
            warn!("PlaySound rejected {}", path.display());
        }
        ok
    }

    fn stop_playback(&mut self) -> bool {
        service_stop()
    }
}

#[cfg(windows)]
fn service_play(path: &Path) -> bool {
    use std::os::windows::ffi::OsStrExt;

    use windows::core::PCWSTR;
    use windows::Win32::Media::Audio::{
        PlaySoundW, SND_ASYNC, SND_FILENAME, SND_NODEFAULT,
    };

    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
    unsafe {
        PlaySoundW(
            PCWSTR(wide.as_ptr()),
            None,
            SND_FILENAME | SND_ASYNC | SND_NODEFAULT,
        )
        .as_bool()
    }
}

#[cfg(windows)]
fn service_stop() -> bool {
    use windows::core::PCWSTR;
    use windows::Win32::Media::Audio::{PlaySoundW, SND_FLAGS};

    // A null sound name cancels any in-flight playback.
    unsafe { PlaySoundW(PCWSTR::null(), None, SND_FLAGS(0)).as_bool() }
}

#[cfg(not(windows))]
fn service_play(_path: &Path) -> bool {
    false
}

#[cfg(not(windows))]
fn service_stop() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_fixed() {
        let backend = WinMmBackend::new();
        assert_eq!(backend.id(), "winmm");
        assert_eq!(backend.name(), "winmm-playsound");
    }

    #[test]
    fn test_availability_matches_platform() {
        let backend = WinMmBackend::new();
        assert_eq!(backend.is_available(), cfg!(windows));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_start_fails_off_platform() {
        let mut backend = WinMmBackend::new();
        let result = backend.start(&EngineConfig::default());
        assert!(matches!(
            result,
            Err(AudioError::BackendUnavailable { ref id }) if id == "winmm"
        ));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_play_file_fails_off_platform() {
        let mut backend = WinMmBackend::new();
        assert!(!backend.play_file(Path::new("clip.wav")));
        assert!(!backend.stop_playback());
    }

    #[cfg(windows)]
    #[test]
    fn test_start_validates_config() {
        let mut backend = WinMmBackend::new();
        let bad = EngineConfig {
            sample_rate: 0,
            ..EngineConfig::default()
        };
        assert!(backend.start(&bad).is_err());
        assert!(backend.start(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_play_file_rejects_empty_path() {
        let mut backend = WinMmBackend::new();
        assert!(!backend.play_file(Path::new("")));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut backend = WinMmBackend::new();
        backend.stop();
        backend.stop();
    }
}
