//! `cutline-playback` — Playback synchronization engine.
//!
//! Drives a logical clock over the active sequence and reconciles external
//! media handles against it:
//!
//! ```text
//!  host timer ──tick──▶ PlaybackEngine ──reads──▶ EditorContext (sequences)
//!                            │
//!                            ├──play/pause/seek──▶ MediaBinding (per clip)
//!                            └──clear/composite──▶ RenderSurface
//! ```
//!
//! The engine owns only the transport and the binding set; it never mutates
//! clip placement. Hosts implement [`AssetProvider`], [`MediaBinding`], and
//! [`RenderSurface`].

pub mod binding;
pub mod engine;
pub mod surface;

// Re-export commonly used items at crate root
pub use binding::{AssetProvider, MediaBinding};
pub use engine::PlaybackEngine;
pub use surface::{CompositeOp, RenderSurface};
