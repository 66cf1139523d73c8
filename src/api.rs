// Exported C call surface for foreign hosts
//
// Flat function set mapping 1:1 onto PlaybackEngine operations, consumed by
// hosts through a foreign-call bridge (the reference host loads the cdylib
// via ctypes). Every internal failure is converted to 0/false here; nothing
// ever unwinds across the boundary.

use std::ffi::{c_char, c_int, c_uint, CStr, CString};
use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::config::EngineConfig;
use crate::engine::PlaybackEngine;
use crate::error::{log_audio_error, AudioError};

/// The single process-wide engine behind the C surface.
///
/// The engine itself is lock-free single-writer; this mutex only serializes
/// the bridge, because a C ABI cannot impose a threading discipline on the
/// host. Tests and Rust consumers construct their own [PlaybackEngine]
/// instances instead of sharing this one.
static ENGINE: Lazy<Mutex<PlaybackEngine>> = Lazy::new(|| {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).try_init();
    let mut engine = PlaybackEngine::new();
    if let Ok(selector) = std::env::var("MC_AUDIO_BACKEND") {
        if !engine.set_backend(&selector) {
            log::warn!("ignoring MC_AUDIO_BACKEND='{}'", selector);
        }
    }
    Mutex::new(engine)
});

fn with_engine<T>(context: &str, poisoned: T, f: impl FnOnce(&mut PlaybackEngine) -> T) -> T {
    match ENGINE.lock() {
        Ok(mut engine) => f(&mut engine),
        Err(_) => {
            log_audio_error(&AudioError::LockPoisoned, context);
            poisoned
        }
    }
}

/// Decode a NUL-terminated UTF-16 string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated buffer of `u16`.
unsafe fn wide_cstr_to_string(ptr: *const u16) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let mut len = 0usize;
    while *ptr.add(len) != 0 {
        len += 1;
    }
    let units = std::slice::from_raw_parts(ptr, len);
    Some(String::from_utf16_lossy(units))
}

/// Hand a string to the host as an owned, NUL-terminated allocation.
///
/// Owned-per-call instead of a pointer into a mutable cache, so the host
/// never observes a value invalidated by a later engine call. Release with
/// [mc_audio_string_free].
fn into_owned_cstring(value: String) -> *mut c_char {
    match CString::new(value) {
        Ok(cstring) => cstring.into_raw(),
        // Identity strings never contain NUL; degrade to an empty string
        // rather than a null pointer if one ever does.
        Err(_) => CString::default().into_raw(),
    }
}

/// Start the engine. Zero-valued fields or an unavailable backend yield 0.
#[no_mangle]
pub extern "C" fn mc_audio_start(sample_rate: c_uint, buffer_size: c_uint) -> c_int {
    with_engine("mc_audio_start", 0, |engine| {
        let config = EngineConfig {
            sample_rate,
            buffer_size,
            device_id: None,
        };
        match engine.start(config) {
            Ok(()) => 1,
            Err(_) => 0,
        }
    })
}

/// Stop the engine. Always reports success.
#[no_mangle]
pub extern "C" fn mc_audio_stop() -> c_int {
    with_engine("mc_audio_stop", 1, |engine| {
        engine.stop();
        1
    })
}

#[no_mangle]
pub extern "C" fn mc_audio_is_running() -> c_int {
    with_engine("mc_audio_is_running", 0, |engine| engine.is_running() as c_int)
}

/// Begin asynchronous playback of the UTF-16 file path.
///
/// # Safety
/// `path` must be null or point to a NUL-terminated UTF-16 string.
#[no_mangle]
pub unsafe extern "C" fn mc_audio_play_file_w(path: *const u16) -> c_int {
    let Some(path) = wide_cstr_to_string(path) else {
        return 0;
    };
    let path = PathBuf::from(path);
    with_engine("mc_audio_play_file_w", 0, |engine| {
        engine.play_file(&path) as c_int
    })
}

#[no_mangle]
pub extern "C" fn mc_audio_stop_playback() -> c_int {
    with_engine("mc_audio_stop_playback", 0, |engine| {
        engine.stop_playback() as c_int
    })
}

/// Owned backend name string; release with [mc_audio_string_free].
#[no_mangle]
pub extern "C" fn mc_audio_backend_name() -> *mut c_char {
    let name = with_engine("mc_audio_backend_name", "unavailable".to_string(), |engine| {
        engine.backend_name()
    });
    into_owned_cstring(name)
}

/// Owned backend id string; release with [mc_audio_string_free].
#[no_mangle]
pub extern "C" fn mc_audio_backend_id() -> *mut c_char {
    let id = with_engine("mc_audio_backend_id", "unknown".to_string(), |engine| {
        engine.backend_id()
    });
    into_owned_cstring(id)
}

/// Release a string returned by the identity queries.
///
/// # Safety
/// `ptr` must be null or a pointer previously returned by
/// [mc_audio_backend_name] or [mc_audio_backend_id], not yet freed.
#[no_mangle]
pub unsafe extern "C" fn mc_audio_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Switch the backend selector. Unknown or null ids yield 0.
///
/// # Safety
/// `backend_id` must be null or a NUL-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn mc_audio_set_backend(backend_id: *const c_char) -> c_int {
    if backend_id.is_null() {
        return 0;
    }
    let Ok(token) = CStr::from_ptr(backend_id).to_str() else {
        return 0;
    };
    let token = token.to_string();
    with_engine("mc_audio_set_backend", 0, |engine| {
        engine.set_backend(&token) as c_int
    })
}

/// Probe a backend id for availability without touching engine state.
///
/// # Safety
/// `backend_id` must be null or a NUL-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn mc_audio_is_backend_available(backend_id: *const c_char) -> c_int {
    if backend_id.is_null() {
        return 0;
    }
    let Ok(token) = CStr::from_ptr(backend_id).to_str() else {
        return 0;
    };
    let token = token.to_string();
    with_engine("mc_audio_is_backend_available", 0, |engine| {
        engine.is_backend_available(&token) as c_int
    })
}
