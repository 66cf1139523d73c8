use std::path::Path;

use super::*;

fn config(sample_rate: u32, buffer_size: u32) -> EngineConfig {
    EngineConfig {
        sample_rate,
        buffer_size,
        device_id: None,
    }
}

#[test]
fn test_new_engine_is_stopped_on_auto() {
    let engine = PlaybackEngine::new();
    assert!(!engine.is_running());
    assert_eq!(engine.selected_backend(), "auto");
    assert!(engine.current_config().is_none());
}

#[test]
fn test_start_rejects_zero_sample_rate() {
    let mut engine = PlaybackEngine::new();
    let result = engine.start(config(0, 256));
    assert!(matches!(
        result,
        Err(AudioError::ConfigInvalid { sample_rate: 0, .. })
    ));
    assert!(!engine.is_running());
    assert!(engine.current_config().is_none());
}

#[test]
fn test_start_rejects_zero_buffer_size() {
    let mut engine = PlaybackEngine::new();
    assert!(engine.start(config(48_000, 0)).is_err());
    assert!(!engine.is_running());
}

#[test]
fn test_stop_is_idempotent() {
    let mut engine = PlaybackEngine::new();
    engine.stop();
    engine.stop();
    assert!(!engine.is_running());
}

#[test]
fn test_set_backend_rejects_unknown_id_without_state_change() {
    let mut engine = PlaybackEngine::new();
    assert!(engine.set_backend("auto"));
    assert!(!engine.set_backend("nonexistent-id"));
    assert_eq!(engine.selected_backend(), "auto");
    assert!(!engine.is_running());
}

#[test]
fn test_set_backend_normalizes_case() {
    let mut engine = PlaybackEngine::new();
    assert!(engine.set_backend("WinMM"));
    assert_eq!(engine.selected_backend(), "winmm");
    assert!(engine.set_backend("JUCE"));
    assert_eq!(engine.selected_backend(), "juce");
}

#[test]
fn test_is_backend_available_rejects_unknown_and_placeholder() {
    let engine = PlaybackEngine::new();
    assert!(!engine.is_backend_available("nonexistent-id"));
    assert!(!engine.is_backend_available(""));
    assert!(!engine.is_backend_available("juce"));
}

#[test]
fn test_auto_availability_matches_native_id() {
    let engine = PlaybackEngine::new();
    assert_eq!(
        engine.is_backend_available("auto"),
        engine.is_backend_available("winmm")
    );
    assert_eq!(engine.is_backend_available("auto"), cfg!(windows));
}

#[test]
fn test_availability_probe_does_not_mutate_state() {
    let mut engine = PlaybackEngine::new();
    let _ = engine.is_backend_available("winmm");
    let _ = engine.is_backend_available("auto");
    assert!(!engine.is_running());
    assert_eq!(engine.selected_backend(), "auto");
    // The probe must not have populated the backend slot either: identity
    // still reports what resolution *would* select.
    assert_eq!(engine.backend_name(), expected_auto_name());
}

#[test]
fn test_play_file_empty_path_is_quiet_noop() {
    let mut engine = PlaybackEngine::new();
    assert!(!engine.play_file(Path::new("")));
    assert!(!engine.is_running());
}

#[test]
fn test_placeholder_backend_always_fails_playback() {
    let mut engine = PlaybackEngine::new();
    assert!(engine.set_backend("juce"));
    assert!(!engine.play_file(Path::new("x.wav")));
    assert!(!engine.is_running());
    assert!(engine.start(config(48_000, 256)).is_err());
}

#[test]
fn test_identity_reflects_selection_before_resolution() {
    let mut engine = PlaybackEngine::new();
    assert!(engine.set_backend("winmm"));
    // Concrete selection resolves directly, regardless of availability.
    assert_eq!(engine.backend_id(), "winmm");
    assert_eq!(engine.backend_name(), "winmm-playsound");
    assert!(!engine.is_running());
}

fn expected_auto_name() -> &'static str {
    if cfg!(windows) {
        "winmm-playsound"
    } else {
        "juce-placeholder"
    }
}

#[test]
fn test_auto_identity_resolves_platform_fallback() {
    let mut engine = PlaybackEngine::new();
    let expected_id = if cfg!(windows) { "winmm" } else { "juce" };
    assert_eq!(engine.backend_id(), expected_id);
    assert_eq!(engine.backend_name(), expected_auto_name());
    assert!(!engine.is_running());
    assert_eq!(engine.selected_backend(), "auto");
}

#[cfg(not(windows))]
mod non_windows {
    use super::*;

    #[test]
    fn test_auto_start_fails_unavailable() {
        let mut engine = PlaybackEngine::new();
        let result = engine.start(config(48_000, 256));
        assert!(matches!(result, Err(AudioError::BackendUnavailable { .. })));
        assert!(!engine.is_running());
    }

    #[test]
    fn test_winmm_start_fails_off_platform() {
        let mut engine = PlaybackEngine::new();
        assert!(engine.set_backend("winmm"));
        let result = engine.start(config(48_000, 256));
        assert!(matches!(
            result,
            Err(AudioError::BackendUnavailable { ref id }) if id == "winmm"
        ));
        assert!(!engine.is_running());
    }

    #[test]
    fn test_play_file_implicit_start_failure_is_quiet() {
        let mut engine = PlaybackEngine::new();
        assert!(!engine.play_file(Path::new("x.wav")));
        assert!(!engine.is_running());
        // The failed implicit start must not have recorded a config.
        assert!(engine.current_config().is_none());
    }

    #[test]
    fn test_stop_playback_without_running_engine() {
        let mut engine = PlaybackEngine::new();
        // Resolution succeeds (placeholder fallback), the stop call itself
        // reports failure.
        assert!(!engine.stop_playback());
        assert!(!engine.is_running());
    }
}

#[cfg(windows)]
mod windows_native {
    use super::*;

    #[test]
    fn test_start_and_stop_lifecycle() {
        let mut engine = PlaybackEngine::new();
        assert!(engine.start(config(48_000, 256)).is_ok());
        assert!(engine.is_running());
        assert_eq!(engine.backend_id(), "winmm");
        assert_eq!(engine.current_config().unwrap().sample_rate, 48_000);

        engine.stop();
        assert!(!engine.is_running());
        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_play_file_implicitly_starts_and_persists_config() {
        let mut engine = PlaybackEngine::new();
        // The file does not exist, so the service call itself reports
        // failure, but the implicit start must have gone through.
        let _ = engine.play_file(Path::new("mc-audio-missing-fixture.wav"));
        assert!(engine.is_running());
        assert_eq!(engine.current_config(), Some(&EngineConfig::default()));
    }

    #[test]
    fn test_set_backend_while_running_stops_engine() {
        let mut engine = PlaybackEngine::new();
        assert!(engine.start(config(44_100, 512)).is_ok());
        assert!(engine.is_running());
        assert!(engine.set_backend("juce"));
        assert!(!engine.is_running());
        assert_eq!(engine.selected_backend(), "juce");
    }
}
