//! Keyframe interpolation: piecewise-linear parameter automation.
//!
//! A clip carries a flat, insertion-ordered keyframe list mixing properties.
//! Evaluation filters by property and interpolates linearly between the
//! surrounding pair, holding the first/last value outside the keyframed span.

use cutline_common::TimeCode;
use serde::{Deserialize, Serialize};

/// Properties that can be automated with keyframes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipProperty {
    Volume,
    Opacity,
    PositionX,
    PositionY,
    ScaleX,
    ScaleY,
    Rotation,
}

/// A single keyframe. Times are sequence times, not clip-local.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: TimeCode,
    pub property: ClipProperty,
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: TimeCode, property: ClipProperty, value: f32) -> Self {
        Self {
            time,
            property,
            value,
        }
    }
}

/// Evaluate one property of a keyframe list at a given time.
///
/// Returns `None` if no keyframe targets the property.
/// Before the first keyframe the first value holds; after the last, the last.
/// Keyframes sharing an identical time resolve by insertion order, with the
/// later-inserted keyframe taking precedence at that exact time.
pub fn evaluate_property(
    keyframes: &[Keyframe],
    property: ClipProperty,
    time: TimeCode,
) -> Option<f32> {
    let mut track: Vec<&Keyframe> = keyframes.iter().filter(|k| k.property == property).collect();
    if track.is_empty() {
        return None;
    }
    // Stable sort keeps insertion order among equal times.
    track.sort_by(|a, b| {
        a.time
            .as_secs()
            .partial_cmp(&b.time.as_secs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let t = time.as_secs() as f32;

    // Before or at first keyframe
    if track.len() == 1 || t <= track[0].time.as_secs() as f32 {
        return Some(track[0].value);
    }

    // After or at last keyframe
    let last = track[track.len() - 1];
    if t >= last.time.as_secs() as f32 {
        return Some(last.value);
    }

    // Find the pair of keyframes surrounding the current time. Zero-length
    // segments (duplicate times) never match `t >= t_a && t < t_b`, so the
    // scan naturally lands on the segment leaving the later-inserted keyframe.
    for i in 0..track.len() - 1 {
        let kf_a = track[i];
        let kf_b = track[i + 1];
        let t_a = kf_a.time.as_secs() as f32;
        let t_b = kf_b.time.as_secs() as f32;

        if t >= t_a && t < t_b {
            let dt = t_b - t_a;
            if dt <= 0.0 {
                return Some(kf_a.value);
            }
            let frac = (t - t_a) / dt;
            return Some(lerp(kf_a.value, kf_b.value, frac));
        }
    }

    Some(last.value)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
