//! External media-handle collaborators.
//!
//! The engine never decodes media itself. Each playable clip is driven
//! through a `MediaBinding` obtained from the host's `AssetProvider`; the
//! binding wraps whatever the host uses to actually play the asset (a decoder
//! pipeline, a platform media element). Transport calls may complete
//! asynchronously on the host side, which is why the engine reconciles with a
//! drift tolerance instead of trusting every call to land instantly.

use cutline_common::{AssetId, AssetInfo, BindingError, TimeCode};

/// A live playback handle for one asset, keyed by clip id in the engine.
pub trait MediaBinding {
    fn play(&mut self) -> Result<(), BindingError>;
    fn pause(&mut self) -> Result<(), BindingError>;

    /// Seek the handle's own clock to a source time.
    fn seek(&mut self, source_time: TimeCode) -> Result<(), BindingError>;

    /// The handle's last reported source position.
    fn position(&self) -> TimeCode;

    fn is_paused(&self) -> bool;

    /// Playback rate of the handle itself (clip speed x transport speed).
    fn set_rate(&mut self, rate: f64) -> Result<(), BindingError>;

    /// Effective volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32) -> Result<(), BindingError>;
}

/// Host-side asset store. Supplies asset metadata and mints bindings.
pub trait AssetProvider {
    fn asset(&self, id: &AssetId) -> Option<AssetInfo>;

    fn create_binding(&mut self, id: &AssetId) -> Result<Box<dyn MediaBinding>, BindingError>;
}
