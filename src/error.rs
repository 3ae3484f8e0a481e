//! Error types for the light composer.

use thiserror::Error;

use crate::config::Mode;

/// Color parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color format: {0:?} (expected RRGGBB or #RRGGBB)")]
    InvalidColorFormat(String),
}

/// Audio acquisition errors
///
/// These never leave the amplitude tracker: it logs them and falls back to
/// simulated input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("no audio input device available")]
    NoInputDevice,

    #[error("unsupported audio sample format")]
    UnsupportedFormat,

    #[error("audio stream error: {0}")]
    Stream(String),

    #[error("timed out waiting for audio samples")]
    Timeout,

    #[error("audio source closed")]
    Closed,
}

/// Error reported by a strip sink while transmitting a frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("strip sink error: {0}")]
pub struct SinkError(pub String);

/// Errors surfaced to the command surface
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("pattern {pattern:?} is not available in {mode} mode")]
    UnmappedPattern { mode: Mode, pattern: String },

    #[error(transparent)]
    InvalidColor(#[from] ColorError),

    #[error("failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Failure of a single render tick
///
/// Logged by the render loop and never propagated; the loop keeps running.
#[derive(Error, Debug)]
pub enum TickError {
    #[error("pattern {pattern:?} is not available in {mode} mode")]
    UnmappedPattern { mode: Mode, pattern: String },

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("render tick panicked: {0}")]
    Panic(String),
}
