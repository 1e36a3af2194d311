//! `cutline-common` — Shared types and errors for the cutline editing engine.
//!
//! This crate is the foundation that all other engine crates depend on.
//! It defines the core abstractions:
//!
//! - **Types**: `FrameNumber`, `TimeCode`, `Resolution`, `Rational` (newtypes for safety)
//! - **Ids**: `ClipId`, `SequenceId`, `AssetId`
//! - **Assets**: `AssetInfo`, `MediaKind` (opaque host-side media handles)
//! - **Errors**: `EngineError`, `EditError`, `PlaybackError`, `BindingError` (thiserror-based)
//! - **Config**: `EngineConfig`

pub mod asset;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use asset::{AssetInfo, MediaKind};
pub use config::EngineConfig;
pub use error::{BindingError, EditError, EngineError, EngineResult, PlaybackError};
pub use types::{AssetId, ClipId, FrameNumber, Rational, Resolution, SequenceId, TimeCode};
