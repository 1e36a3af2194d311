//! Central error types for the engine (thiserror-based).

use thiserror::Error;

use crate::asset::MediaKind;
use crate::types::{AssetId, ClipId, SequenceId};

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Project store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Validation rejections from the edit operations engine. The timeline is
/// left unchanged when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("No active sequence")]
    NoActiveSequence,

    #[error("Sequence not found: {0}")]
    SequenceNotFound(SequenceId),

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Track is locked: {0}")]
    TrackLocked(String),

    #[error("Clip not found: {0}")]
    ClipNotFound(ClipId),

    #[error("Clip kind {kind:?} is not allowed on track {track_id}")]
    IncompatibleTrack { track_id: String, kind: MediaKind },

    #[error("Time {time} is outside clip {clip_id}")]
    OutOfClipRange { clip_id: ClipId, time: f64 },

    #[error("Invalid trim window: start {start} must be before end {end}")]
    InvalidTrimWindow { start: f64, end: f64 },

    #[error("Invalid speed: {0} (must be > 0)")]
    InvalidSpeed(f64),

    #[error("Invalid duration: {0} (must be > 0)")]
    InvalidDuration(f64),

    #[error("Clipboard is empty")]
    EmptyClipboard,
}

/// Failures from a host-side media binding. Isolated per clip: one failed
/// binding never aborts the playback tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("Asset unavailable: {0}")]
    AssetUnavailable(AssetId),

    #[error("Binding creation failed for {asset}: {reason}")]
    CreateFailed { asset: AssetId, reason: String },

    #[error("Transport command failed: {0}")]
    Transport(String),

    #[error("Seek to {position}s failed: {reason}")]
    SeekFailed { position: f64, reason: String },
}

/// Playback synchronization errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("No active sequence")]
    NoActiveSequence,

    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),
}

/// Convenience Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
