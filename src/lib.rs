// Music Create audio core - pluggable playback engine
// Swappable playback backends behind a stable C call surface

pub mod api;
pub mod config;
pub mod engine;
pub mod error;

pub use config::{EngineConfig, EngineSettings};
pub use engine::{BackendKind, BackendSelector, PlaybackBackend, PlaybackEngine};
pub use error::{AudioError, AudioErrorCodes, ErrorCode};
