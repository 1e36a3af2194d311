//! Opaque media asset handles supplied by the host's asset store.

use serde::{Deserialize, Serialize};

use crate::types::{AssetId, Resolution, TimeCode};

/// What kind of media an asset holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Video,
    Audio,
    Image,
    Text,
}

impl MediaKind {
    pub fn is_audio(self) -> bool {
        matches!(self, MediaKind::Audio)
    }

    /// Whether playback drives a time-based media binding for this kind.
    pub fn is_playable(self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }
}

/// Metadata the engine needs about an asset. The actual media data stays
/// behind the host's `AssetProvider`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: AssetId,
    pub name: String,
    pub kind: MediaKind,
    /// Intrinsic duration. Zero for stills; insert substitutes the
    /// configured default still duration.
    pub duration: TimeCode,
    pub resolution: Option<Resolution>,
}

impl AssetInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: AssetId::new(id),
            name: name.into(),
            kind,
            duration: TimeCode::ZERO,
            resolution: None,
        }
    }

    pub fn with_duration(mut self, duration: TimeCode) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }
}
