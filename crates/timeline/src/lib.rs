//! `cutline-timeline` — Timeline data model and keyframe interpolation.
//!
//! The model is deliberately plain data (serde end to end) so that history
//! snapshots and project persistence are straight clones:
//!
//! - **Sequence**: tracks, flat insertion-ordered clip list, markers, in/out
//! - **Track**: identity plus mute/solo/lock flags
//! - **Clip**: asset reference, tagged kind, timeline placement, trim window,
//!   keyframes, and per-clip effect chains
//! - **Keyframe**: piecewise-linear parameter automation
//!
//! Editing lives in `cutline-edit`; playback in `cutline-playback`.

pub mod effect;
pub mod keyframe;
pub mod types;

// Re-export commonly used items at crate root
pub use effect::EffectInstance;
pub use keyframe::{evaluate_property, ClipProperty, Keyframe};
pub use types::{Clip, ClipKind, Marker, Sequence, Track, TrackKind, MARKER_COLORS};
