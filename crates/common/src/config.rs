//! Engine configuration defaults.

use serde::{Deserialize, Serialize};

use crate::types::{Rational, Resolution, TimeCode};

/// Top-level engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    pub default_resolution: Resolution,
    pub default_fps: Rational,
    /// Maximum undo history entries before the oldest is evicted.
    pub history_capacity: usize,
    /// Timeline duration given to assets that report none (stills, titles).
    pub default_still_duration: TimeCode,
    /// Duration of a freshly created adjustment layer.
    pub adjustment_layer_duration: TimeCode,
    /// Autosave cadence in seconds. The timer itself is host-owned.
    pub autosave_interval_secs: f64,
    /// Allowed drift between the logical clock and a media binding before a
    /// resync seek is issued.
    pub drift_tolerance: TimeCode,
    /// Relaxed drift tolerance used when playback speed exceeds 1x.
    pub drift_tolerance_fast: TimeCode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_resolution: Resolution::HD,
            default_fps: Rational::FPS_30,
            history_capacity: 50,
            default_still_duration: TimeCode::from_secs(5.0),
            adjustment_layer_duration: TimeCode::from_secs(5.0),
            autosave_interval_secs: 30.0,
            drift_tolerance: TimeCode::from_secs(0.1),
            drift_tolerance_fast: TimeCode::from_secs(0.5),
        }
    }
}
