//! The playback synchronization engine.
//!
//! A fixed-rate tick (cadence `1/fps`, independent of playback speed) drives
//! a logical clock on the `EditorContext`. Each tick the engine works out the
//! active clips under the playhead, reconciles every playable clip's media
//! binding against its required source time, and composites visual clips onto
//! the render surface in clip-list order.
//!
//! The logical clock is authoritative: bindings are external, their transport
//! calls may land late, so the engine reseeks only when a binding is paused
//! or drifts past a tolerance, and otherwise lets it run free.
//!
//! Binding failures are isolated per clip: a clip whose asset cannot seek or
//! play is skipped for the tick and every other clip proceeds.

use std::collections::HashMap;

use cutline_common::{BindingError, ClipId, PlaybackError, TimeCode};
use cutline_state::EditorContext;
use cutline_timeline::{evaluate_property, Clip, ClipKind, ClipProperty, Sequence, Track};

use crate::binding::{AssetProvider, MediaBinding};
use crate::surface::{CompositeOp, RenderSurface};

/// Transport state plus the live media-handle bindings, keyed by clip id.
///
/// The engine reads the sequence graph but never mutates clip placement; the
/// only state it owns is the transport and the binding set.
pub struct PlaybackEngine {
    is_playing: bool,
    playback_speed: f64,
    bindings: HashMap<ClipId, Box<dyn MediaBinding>>,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self {
            is_playing: false,
            playback_speed: 1.0,
            bindings: HashMap::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }

    /// Number of live media-handle bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Start playback. Bindings catch up on the next tick.
    pub fn play(&mut self) {
        self.is_playing = true;
        tracing::debug!(speed = self.playback_speed, "Playback started");
    }

    /// Pause playback and every live binding.
    pub fn pause(&mut self) {
        self.is_playing = false;
        self.pause_all_bindings();
        tracing::debug!("Playback paused");
    }

    /// Stop playback. Idempotent: stopping twice is safe, and bindings are
    /// always left paused.
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.pause_all_bindings();
        tracing::debug!("Playback stopped");
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
        self.is_playing
    }

    /// Set the transport speed multiplier. Clamped to [0.1, 16.0].
    pub fn set_speed(&mut self, speed: f64) {
        self.playback_speed = speed.clamp(0.1, 16.0);
        tracing::debug!(speed = self.playback_speed, "Playback speed set");
    }

    /// Move the playhead. While stopped, the surface is still refreshed once
    /// so the host sees the frame under the new position; no binding starts
    /// playing as a side effect.
    pub fn seek(
        &mut self,
        ctx: &mut EditorContext,
        provider: &mut dyn AssetProvider,
        surface: &mut dyn RenderSurface,
        time: TimeCode,
    ) -> Result<(), PlaybackError> {
        ctx.set_current_time(time);
        if !self.is_playing {
            self.render(ctx, provider, surface)?;
        }
        Ok(())
    }

    /// Step the playhead by a signed number of frames at the sequence rate.
    pub fn skip_frames(
        &mut self,
        ctx: &mut EditorContext,
        provider: &mut dyn AssetProvider,
        surface: &mut dyn RenderSurface,
        frames: i64,
    ) -> Result<(), PlaybackError> {
        let frame = ctx
            .active_sequence()
            .ok_or(PlaybackError::NoActiveSequence)?
            .fps
            .frame_duration();
        let target = TimeCode::from_secs(ctx.current_time.as_secs() + frames as f64 * frame);
        self.seek(ctx, provider, surface, target)
    }

    /// One timer tick: advance the logical clock while playing (wrapping to 0
    /// at the sequence end), then reconcile bindings and redraw.
    pub fn tick(
        &mut self,
        ctx: &mut EditorContext,
        provider: &mut dyn AssetProvider,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), PlaybackError> {
        if self.is_playing {
            let seq = ctx.active_sequence().ok_or(PlaybackError::NoActiveSequence)?;
            let frame = seq.fps.frame_duration();
            let duration = seq.duration().as_secs();

            let mut next = ctx.current_time.as_secs() + frame * self.playback_speed;
            if duration > 0.0 && next >= duration {
                next = 0.0;
            }
            ctx.current_time = TimeCode::from_secs(next);
        }
        self.render(ctx, provider, surface)
    }

    /// Reconcile bindings and composite the frame at the current playhead.
    /// All work is synchronous; nothing here blocks on a binding.
    pub fn render(
        &mut self,
        ctx: &EditorContext,
        provider: &mut dyn AssetProvider,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), PlaybackError> {
        let seq = ctx.active_sequence().ok_or(PlaybackError::NoActiveSequence)?;
        let time = ctx.current_time;

        surface.clear();

        // Drop bindings whose clips were deleted out from under us.
        self.bindings.retain(|id, _| seq.clip(id).is_some());

        // Release playback on bindings no longer under the playhead. The
        // binding itself survives for when the playhead comes back.
        for (id, binding) in self.bindings.iter_mut() {
            let active = seq.clip(id).is_some_and(|c| c.is_active_at(time));
            if !active && !binding.is_paused() {
                if let Err(err) = binding.pause() {
                    tracing::warn!(clip = %id, %err, "Failed to pause inactive binding");
                }
            }
        }

        let tolerance = if self.playback_speed > 1.0 {
            ctx.config.drift_tolerance_fast
        } else {
            ctx.config.drift_tolerance
        };

        for clip in &seq.clips {
            if !clip.is_active_at(time) {
                continue;
            }
            match &clip.kind {
                // Neither produces a frame nor owns a binding here; compound
                // playback is resolved by the host flattening the nested
                // sequence.
                ClipKind::Adjustment | ClipKind::Compound { .. } => continue,

                // Static visuals: no binding, straight to the surface.
                ClipKind::Image | ClipKind::Text => {
                    surface.composite(&composite_op(clip, time));
                }

                ClipKind::Video | ClipKind::Audio => {
                    let source_time = clip.source_time_at(time);
                    if !clip.is_within_trim(source_time) {
                        // Nominally active but trimmed out of the source.
                        if let Some(binding) = self.bindings.get_mut(&clip.id) {
                            if !binding.is_paused() {
                                if let Err(err) = binding.pause() {
                                    tracing::warn!(clip = %clip.id, %err, "Failed to pause trimmed-out binding");
                                }
                            }
                        }
                        continue;
                    }

                    let muted = seq
                        .track(&clip.track_id)
                        .is_some_and(|track| is_effectively_muted(seq, track));

                    if let Err(err) =
                        self.sync_binding(clip, time, source_time, muted, tolerance, provider)
                    {
                        tracing::warn!(
                            clip = %clip.id,
                            asset = %clip.asset_id,
                            %err,
                            "Binding failure, skipping clip this tick"
                        );
                        continue;
                    }

                    if clip.kind.produces_visual() {
                        surface.composite(&composite_op(clip, time));
                    }
                }
            }
        }

        Ok(())
    }

    /// Bring one clip's binding in line with the logical clock: lazily
    /// create it, reseek when paused or drifted, and apply rate, volume,
    /// and transport state.
    fn sync_binding(
        &mut self,
        clip: &Clip,
        time: TimeCode,
        source_time: TimeCode,
        muted: bool,
        tolerance: TimeCode,
        provider: &mut dyn AssetProvider,
    ) -> Result<(), BindingError> {
        if !self.bindings.contains_key(&clip.id) {
            if provider.asset(&clip.asset_id).is_none() {
                return Err(BindingError::AssetUnavailable(clip.asset_id.clone()));
            }
            let binding = provider.create_binding(&clip.asset_id)?;
            tracing::debug!(clip = %clip.id, asset = %clip.asset_id, "Binding created");
            self.bindings.insert(clip.id.clone(), binding);
        }
        let binding = self.bindings.get_mut(&clip.id).expect("inserted above");

        // Reseek only when out of tolerance: constant correction of a live
        // handle causes stutter.
        let drift = (binding.position().as_secs() - source_time.as_secs()).abs();
        if binding.is_paused() || drift > tolerance.as_secs() {
            binding.seek(source_time)?;
        }

        binding.set_rate(self.playback_speed * clip.speed)?;

        let volume = if muted {
            0.0
        } else {
            evaluate_property(&clip.keyframes, ClipProperty::Volume, time)
                .unwrap_or(clip.volume)
                .clamp(0.0, 100.0)
                / 100.0
        };
        binding.set_volume(volume)?;

        if self.is_playing {
            binding.play()?;
        } else if !binding.is_paused() {
            binding.pause()?;
        }
        Ok(())
    }

    fn pause_all_bindings(&mut self) {
        for (id, binding) in self.bindings.iter_mut() {
            if binding.is_paused() {
                continue;
            }
            if let Err(err) = binding.pause() {
                tracing::warn!(clip = %id, %err, "Failed to pause binding");
            }
        }
    }
}

/// A track is audibly muted if it is muted directly, or if some track of the
/// same kind is soloed while this one is not.
fn is_effectively_muted(seq: &Sequence, track: &Track) -> bool {
    if track.muted {
        return true;
    }
    let solo_present = seq
        .tracks
        .iter()
        .any(|t| t.kind == track.kind && t.solo);
    solo_present && !track.solo
}

/// Build the composite command for a visual clip, evaluating keyframed
/// transform parameters at the sequence time.
fn composite_op(clip: &Clip, time: TimeCode) -> CompositeOp {
    let keys = &clip.keyframes;
    let eval = |property, fallback| evaluate_property(keys, property, time).unwrap_or(fallback);

    CompositeOp {
        clip_id: clip.id.clone(),
        asset_id: clip.asset_id.clone(),
        source_time: clip.source_time_at(time),
        opacity: eval(ClipProperty::Opacity, clip.opacity).clamp(0.0, 100.0) / 100.0,
        position: [
            eval(ClipProperty::PositionX, clip.position[0]),
            eval(ClipProperty::PositionY, clip.position[1]),
        ],
        scale: [
            eval(ClipProperty::ScaleX, clip.scale[0]),
            eval(ClipProperty::ScaleY, clip.scale[1]),
        ],
        rotation: eval(ClipProperty::Rotation, clip.rotation),
    }
}
