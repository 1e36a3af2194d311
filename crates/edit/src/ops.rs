//! Core edit operations: insert, overwrite, split, move, delete, and the
//! clipboard verbs.
//!
//! Every operation validates before mutating: on `Err` the timeline is
//! untouched. History is the caller's concern — commit a snapshot after each
//! successful operation.

use cutline_common::{AssetInfo, ClipId, EditError, SequenceId, TimeCode};
use cutline_state::EditorContext;
use cutline_timeline::{Clip, ClipKind, EffectInstance, Sequence};
use serde_json::json;

/// Result of a `move_clip` call. A rejected track change is not an error:
/// the time move still applies and `track_changed` reports what happened.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    pub start_time: TimeCode,
    pub track_changed: bool,
}

fn active_sequence_mut(ctx: &mut EditorContext) -> Result<&mut Sequence, EditError> {
    ctx.active_sequence_mut().ok_or(EditError::NoActiveSequence)
}

fn check_track_writable(seq: &Sequence, track_id: &str, kind: &ClipKind) -> Result<(), EditError> {
    let track = seq
        .track(track_id)
        .ok_or_else(|| EditError::TrackNotFound(track_id.to_string()))?;
    if track.locked {
        return Err(EditError::TrackLocked(track_id.to_string()));
    }
    if !track.kind.accepts(kind) {
        return Err(EditError::IncompatibleTrack {
            track_id: track_id.to_string(),
            kind: clip_media_kind(kind),
        });
    }
    Ok(())
}

fn clip_media_kind(kind: &ClipKind) -> cutline_common::MediaKind {
    match kind {
        ClipKind::Audio => cutline_common::MediaKind::Audio,
        ClipKind::Image => cutline_common::MediaKind::Image,
        ClipKind::Text => cutline_common::MediaKind::Text,
        _ => cutline_common::MediaKind::Video,
    }
}

/// Effective timeline duration of an asset: stills and titles that report no
/// duration get the configured default.
fn effective_duration(ctx: &EditorContext, asset: &AssetInfo) -> TimeCode {
    if asset.duration.as_secs() > 0.0 {
        asset.duration
    } else {
        ctx.config.default_still_duration
    }
}

/// Build a clip from an asset with an optional source in/out window.
fn build_clip(
    ctx: &mut EditorContext,
    asset: &AssetInfo,
    track_id: &str,
    at: TimeCode,
    source_range: Option<(TimeCode, TimeCode)>,
) -> Result<Clip, EditError> {
    let source_duration = effective_duration(ctx, asset);
    let (trim_start, trim_end) = match source_range {
        None => (TimeCode::ZERO, source_duration),
        Some((s, e)) => {
            if s.as_secs() < 0.0 || e.as_secs() <= s.as_secs() {
                return Err(EditError::InvalidTrimWindow {
                    start: s.as_secs(),
                    end: e.as_secs(),
                });
            }
            (s, e)
        }
    };

    let id = ctx.mint_clip_id();
    let mut clip = Clip::from_asset(
        id.0.clone(),
        asset,
        track_id,
        at.clamp_min_zero(),
        trim_end - trim_start,
    );
    clip.trim_start = trim_start;
    clip.trim_end = trim_end;
    clip.source_duration = source_duration;
    Ok(clip)
}

/// Insert an asset at `at`, rippling every clip at or after the insert point
/// (on every track) forward by the new clip's duration.
pub fn insert(
    ctx: &mut EditorContext,
    asset: &AssetInfo,
    track_id: &str,
    at: TimeCode,
) -> Result<ClipId, EditError> {
    insert_range(ctx, asset, track_id, at, None)
}

/// `insert` with an explicit source in/out window (source-monitor workflow).
pub fn insert_range(
    ctx: &mut EditorContext,
    asset: &AssetInfo,
    track_id: &str,
    at: TimeCode,
    source_range: Option<(TimeCode, TimeCode)>,
) -> Result<ClipId, EditError> {
    let clip = build_clip(ctx, asset, track_id, at, source_range)?;
    let seq = active_sequence_mut(ctx)?;
    check_track_writable(seq, track_id, &clip.kind)?;

    let at = clip.start_time;
    let ripple = clip.duration;
    for c in seq.clips.iter_mut() {
        if c.start_time.as_secs() >= at.as_secs() {
            c.start_time = c.start_time + ripple;
        }
    }

    let id = clip.id.clone();
    tracing::debug!(
        clip = %id,
        track = track_id,
        at = at.as_secs(),
        duration = ripple.as_secs(),
        "Insert"
    );
    seq.clips.push(clip);
    Ok(id)
}

/// Overwrite at `at`: clips fully inside the new clip's range are removed,
/// partial overlaps are trimmed. Affects clips on every track; the new clip
/// itself lands on `track_id`.
pub fn overwrite(
    ctx: &mut EditorContext,
    asset: &AssetInfo,
    track_id: &str,
    at: TimeCode,
) -> Result<ClipId, EditError> {
    overwrite_range(ctx, asset, track_id, at, None)
}

/// `overwrite` with an explicit source in/out window.
pub fn overwrite_range(
    ctx: &mut EditorContext,
    asset: &AssetInfo,
    track_id: &str,
    at: TimeCode,
    source_range: Option<(TimeCode, TimeCode)>,
) -> Result<ClipId, EditError> {
    let clip = build_clip(ctx, asset, track_id, at, source_range)?;
    let seq = active_sequence_mut(ctx)?;
    check_track_writable(seq, track_id, &clip.kind)?;

    let start = clip.start_time;
    let end = clip.end_time();

    seq.clips.retain_mut(|c| {
        // Fully covered: remove
        if c.start_time.as_secs() >= start.as_secs() && c.end_time().as_secs() <= end.as_secs() {
            return false;
        }

        // Overlap on the left edge: shorten so the clip ends at `start`,
        // pulling the trim window in to keep it consistent with duration.
        if c.start_time.as_secs() < start.as_secs() && c.end_time().as_secs() > start.as_secs() {
            let new_dur = start - c.start_time;
            c.duration = new_dur;
            c.trim_end = c.trim_start + TimeCode::from_secs(new_dur.as_secs() * c.speed);
        }

        // Overlap on the right edge: advance the head to `end`.
        if c.start_time.as_secs() < end.as_secs() && c.end_time().as_secs() > end.as_secs() {
            let overlap = end - c.start_time;
            c.trim_start = c.trim_start + TimeCode::from_secs(overlap.as_secs() * c.speed);
            c.duration = c.duration - overlap;
            c.start_time = end;
        }

        true
    });

    let id = clip.id.clone();
    tracing::debug!(
        clip = %id,
        track = track_id,
        at = start.as_secs(),
        end = end.as_secs(),
        "Overwrite"
    );
    seq.clips.push(clip);
    Ok(id)
}

/// Split a clip at a sequence time strictly inside it. The left half keeps
/// the original id; the right half gets a fresh id, which is returned.
pub fn split(ctx: &mut EditorContext, clip_id: &ClipId, at: TimeCode) -> Result<ClipId, EditError> {
    let new_id = ctx.mint_clip_id();
    let seq = active_sequence_mut(ctx)?;

    let clip = seq
        .clip(clip_id)
        .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?;
    let track_id = clip.track_id.clone();
    let track = seq.track(&track_id).expect("clip always sits on a track");
    if track.locked {
        return Err(EditError::TrackLocked(track_id));
    }

    let delta = at - clip.start_time;
    if delta.as_secs() <= 0.0 || delta.as_secs() >= clip.duration.as_secs() {
        return Err(EditError::OutOfClipRange {
            clip_id: clip_id.clone(),
            time: at.as_secs(),
        });
    }

    let source_delta = TimeCode::from_secs(delta.as_secs() * clip.speed);
    let mut right = clip.clone();
    right.id = new_id.clone();
    right.start_time = at;
    right.duration = clip.duration - delta;
    right.trim_start = clip.trim_start + source_delta;

    let left = seq.clip_mut(clip_id).expect("looked up above");
    left.duration = delta;
    left.trim_end = left.trim_start + source_delta;

    tracing::debug!(left = %clip_id, right = %new_id, at = at.as_secs(), "Split");
    seq.clips.push(right);
    Ok(new_id)
}

/// Move a clip to a new start time, optionally onto another track.
///
/// The clip's own track being locked rejects the whole move. A locked or
/// kind-incompatible *destination* only rejects the track change: the time
/// move still applies, and the outcome reports `track_changed: false`.
/// Snapping (when enabled) quantizes the new start to the sequence frame grid.
pub fn move_clip(
    ctx: &mut EditorContext,
    clip_id: &ClipId,
    new_start: TimeCode,
    new_track: Option<&str>,
) -> Result<MoveOutcome, EditError> {
    let snapping = ctx.snapping_enabled;
    let seq = active_sequence_mut(ctx)?;
    let fps = seq.fps;

    let clip = seq
        .clip(clip_id)
        .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?;
    let current_track = clip.track_id.clone();
    let kind = clip.kind.clone();

    let source = seq
        .track(&current_track)
        .ok_or_else(|| EditError::TrackNotFound(current_track.clone()))?;
    if source.locked {
        return Err(EditError::TrackLocked(current_track));
    }

    let mut start = new_start.clamp_min_zero();
    if snapping {
        start = start.snap_to_frame(fps);
    }

    let mut track_changed = false;
    let mut target_track: Option<String> = None;
    if let Some(dest) = new_track {
        if dest != current_track {
            let dest_track = seq
                .track(dest)
                .ok_or_else(|| EditError::TrackNotFound(dest.to_string()))?;
            if !dest_track.locked && dest_track.kind.accepts(&kind) {
                target_track = Some(dest.to_string());
                track_changed = true;
            }
        }
    }

    let clip = seq.clip_mut(clip_id).expect("looked up above");
    clip.start_time = start;
    if let Some(t) = target_track {
        clip.track_id = t;
    }

    tracing::debug!(
        clip = %clip_id,
        start = start.as_secs(),
        track_changed,
        "Move"
    );
    Ok(MoveOutcome {
        start_time: start,
        track_changed,
    })
}

/// Delete a clip and drop it from the selection.
pub fn delete(ctx: &mut EditorContext, clip_id: &ClipId) -> Result<(), EditError> {
    let seq = active_sequence_mut(ctx)?;
    let idx = seq
        .clip_index(clip_id)
        .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?;
    let track_id = seq.clips[idx].track_id.clone();
    if seq.track(&track_id).is_some_and(|t| t.locked) {
        return Err(EditError::TrackLocked(track_id));
    }

    seq.clips.remove(idx);
    ctx.selection.deselect_clip(clip_id);
    tracing::debug!(clip = %clip_id, "Delete");
    Ok(())
}

/// Copy a clip into the context clipboard.
pub fn copy_clip(ctx: &mut EditorContext, clip_id: &ClipId) -> Result<(), EditError> {
    let seq = ctx.active_sequence().ok_or(EditError::NoActiveSequence)?;
    let clip = seq
        .clip(clip_id)
        .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?
        .clone();
    tracing::debug!(clip = %clip_id, "Copy");
    ctx.clipboard = Some(clip);
    Ok(())
}

/// Copy a clip into the clipboard, then remove it from the timeline. The
/// clipboard is only replaced once the removal succeeds.
pub fn cut_clip(ctx: &mut EditorContext, clip_id: &ClipId) -> Result<(), EditError> {
    let clip = ctx
        .active_sequence()
        .ok_or(EditError::NoActiveSequence)?
        .clip(clip_id)
        .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?
        .clone();
    delete(ctx, clip_id)?;
    tracing::debug!(clip = %clip_id, "Cut");
    ctx.clipboard = Some(clip);
    Ok(())
}

/// Paste the clipboard clip at the playhead, on its original track, with a
/// fresh id. The clipboard is left intact for repeated pastes.
pub fn paste(ctx: &mut EditorContext) -> Result<ClipId, EditError> {
    let mut clip = ctx.clipboard.clone().ok_or(EditError::EmptyClipboard)?;
    clip.id = ctx.mint_clip_id();
    clip.start_time = ctx.current_time;

    let track_id = clip.track_id.clone();
    let seq = active_sequence_mut(ctx)?;
    check_track_writable(seq, &track_id, &clip.kind)?;

    let id = clip.id.clone();
    tracing::debug!(clip = %id, at = clip.start_time.as_secs(), "Paste");
    seq.clips.push(clip);
    Ok(id)
}

/// Copy + paste in one step: a fresh copy of the clip at the playhead.
pub fn duplicate(ctx: &mut EditorContext, clip_id: &ClipId) -> Result<ClipId, EditError> {
    copy_clip(ctx, clip_id)?;
    paste(ctx)
}

/// Drop an adjustment layer on the top video track at the playhead.
pub fn add_adjustment_layer(ctx: &mut EditorContext) -> Result<ClipId, EditError> {
    let duration = ctx.config.adjustment_layer_duration;
    let at = ctx.current_time;
    let id = ctx.mint_clip_id();
    let seq = active_sequence_mut(ctx)?;
    check_track_writable(seq, "v3", &ClipKind::Adjustment)?;

    let clip = Clip {
        id: id.clone(),
        asset_id: cutline_common::AssetId::new("adjustment"),
        name: "Adjustment Layer".to_string(),
        kind: ClipKind::Adjustment,
        track_id: "v3".to_string(),
        start_time: at,
        duration,
        trim_start: TimeCode::ZERO,
        trim_end: duration,
        source_duration: duration,
        speed: 1.0,
        volume: 100.0,
        opacity: 100.0,
        position: [0.0, 0.0],
        scale: [100.0, 100.0],
        rotation: 0.0,
        keyframes: Vec::new(),
        effects: Vec::new(),
        audio_effects: Vec::new(),
    };

    tracing::debug!(clip = %id, at = at.as_secs(), "Adjustment layer added");
    seq.clips.push(clip);
    Ok(id)
}

/// Nest a clip into a fresh sequence and turn the original into a compound
/// clip referencing it. Returns the nested sequence's id.
pub fn make_compound(
    ctx: &mut EditorContext,
    clip_id: &ClipId,
    name: impl Into<String>,
) -> Result<SequenceId, EditError> {
    let name = name.into();
    {
        let seq = ctx.active_sequence().ok_or(EditError::NoActiveSequence)?;
        seq.clip(clip_id)
            .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?;
    }

    // Create the nested sequence without stealing active status.
    let prev_active = ctx.active_sequence_id.clone();
    let nested_id = ctx.create_sequence(name.clone()).id.clone();
    ctx.active_sequence_id = prev_active;

    let nested_clip_id = ctx.mint_clip_id();
    let seq = active_sequence_mut(ctx)?;
    let original = seq.clip_mut(clip_id).expect("checked above");

    let mut nested_clip = original.clone();
    nested_clip.id = nested_clip_id;
    nested_clip.start_time = TimeCode::ZERO;

    original.kind = ClipKind::Compound {
        sequence_id: nested_id.clone(),
    };
    original.name = name;

    let nested = ctx.sequence_mut(&nested_id).expect("just created");
    nested.clips.push(nested_clip);

    tracing::debug!(clip = %clip_id, sequence = %nested_id, "Compound clip created");
    Ok(nested_id)
}

/// Default parameter object for a known video effect; empty for unknown names.
fn effect_defaults(name: &str) -> serde_json::Value {
    match name {
        "crossDissolve" => json!({ "duration": 1 }),
        "dip" => json!({ "duration": 1, "color": "#000000" }),
        "transform" => json!({ "scale": 100, "rotation": 0, "x": 0, "y": 0 }),
        "crop" => json!({ "top": 0, "bottom": 0, "left": 0, "right": 0 }),
        "speedRamp" => json!({ "startSpeed": 1, "endSpeed": 1 }),
        "timeRemapping" => json!({ "keyframes": [] }),
        _ => json!({}),
    }
}

fn audio_effect_defaults(name: &str) -> serde_json::Value {
    match name {
        "eq" => json!({ "low": 0, "mid": 0, "high": 0 }),
        "compressor" => json!({ "threshold": -20, "ratio": 4, "attack": 10, "release": 100 }),
        "reverb" => json!({ "roomSize": 0.5, "damping": 0.5, "wetLevel": 0.3 }),
        "normalize" => json!({ "target": -3 }),
        _ => json!({}),
    }
}

fn apply_effect_inner(
    ctx: &mut EditorContext,
    clip_id: &ClipId,
    name: &str,
    parameters: serde_json::Value,
    audio: bool,
) -> Result<(), EditError> {
    let id = ctx.mint_effect_id();
    let seq = active_sequence_mut(ctx)?;
    let track_id = seq
        .clip(clip_id)
        .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?
        .track_id
        .clone();
    if seq.track(&track_id).is_some_and(|t| t.locked) {
        return Err(EditError::TrackLocked(track_id));
    }

    let clip = seq.clip_mut(clip_id).expect("looked up above");
    let chain = if audio {
        &mut clip.audio_effects
    } else {
        &mut clip.effects
    };
    chain.push(EffectInstance::new(id, name, parameters));
    tracing::debug!(clip = %clip_id, effect = name, audio, "Effect applied");
    Ok(())
}

/// Append a video effect to a clip's effect chain, with the stock default
/// parameters for known effect names (empty parameters otherwise).
pub fn apply_effect(
    ctx: &mut EditorContext,
    clip_id: &ClipId,
    name: &str,
) -> Result<(), EditError> {
    apply_effect_inner(ctx, clip_id, name, effect_defaults(name), false)
}

/// Append an audio effect to a clip's audio effect chain.
pub fn apply_audio_effect(
    ctx: &mut EditorContext,
    clip_id: &ClipId,
    name: &str,
) -> Result<(), EditError> {
    apply_effect_inner(ctx, clip_id, name, audio_effect_defaults(name), true)
}
