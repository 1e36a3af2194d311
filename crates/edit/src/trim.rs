//! Trim-window operations: set_trim, slip, and rate (speed) changes.

use cutline_common::{ClipId, EditError, TimeCode};
use cutline_state::EditorContext;
use cutline_timeline::Clip;

fn writable_clip_mut<'a>(
    ctx: &'a mut EditorContext,
    clip_id: &ClipId,
) -> Result<&'a mut Clip, EditError> {
    let seq = ctx.active_sequence_mut().ok_or(EditError::NoActiveSequence)?;
    let track_id = seq
        .clip(clip_id)
        .ok_or_else(|| EditError::ClipNotFound(clip_id.clone()))?
        .track_id
        .clone();
    if seq.track(&track_id).is_some_and(|t| t.locked) {
        return Err(EditError::TrackLocked(track_id));
    }
    Ok(seq.clip_mut(clip_id).expect("looked up above"))
}

/// Set the trim window directly. Duration is recomputed from the window and
/// the clip's speed.
pub fn set_trim(
    ctx: &mut EditorContext,
    clip_id: &ClipId,
    trim_start: TimeCode,
    trim_end: TimeCode,
) -> Result<(), EditError> {
    if trim_start.as_secs() < 0.0 || trim_end.as_secs() <= trim_start.as_secs() {
        return Err(EditError::InvalidTrimWindow {
            start: trim_start.as_secs(),
            end: trim_end.as_secs(),
        });
    }

    let clip = writable_clip_mut(ctx, clip_id)?;
    clip.trim_start = trim_start;
    clip.trim_end = trim_end;
    clip.duration = TimeCode::from_secs((trim_end - trim_start).as_secs() / clip.speed);
    tracing::debug!(
        clip = %clip_id,
        trim_start = trim_start.as_secs(),
        trim_end = trim_end.as_secs(),
        "Trim"
    );
    Ok(())
}

/// Slip the trim window within the source without moving the clip on the
/// timeline. The window is shifted by `delta` and clamped to the source
/// bounds; its length (and the clip duration) never changes.
pub fn slip(ctx: &mut EditorContext, clip_id: &ClipId, delta: TimeCode) -> Result<(), EditError> {
    let clip = writable_clip_mut(ctx, clip_id)?;
    let window = clip.trim_end - clip.trim_start;

    let mut start = clip.trim_start + delta;
    if start.as_secs() < 0.0 {
        start = TimeCode::ZERO;
    }
    let max_start = (clip.source_duration - window).clamp_min_zero();
    if start.as_secs() > max_start.as_secs() {
        start = max_start;
    }

    clip.trim_start = start;
    clip.trim_end = start + window;
    tracing::debug!(clip = %clip_id, trim_start = start.as_secs(), "Slip");
    Ok(())
}

/// Change playback speed (rate tool). The timeline duration is rescaled from
/// the full source length: `duration = source_duration / speed`.
pub fn set_speed(ctx: &mut EditorContext, clip_id: &ClipId, speed: f64) -> Result<(), EditError> {
    if speed <= 0.0 || !speed.is_finite() {
        return Err(EditError::InvalidSpeed(speed));
    }

    let clip = writable_clip_mut(ctx, clip_id)?;
    clip.speed = speed;
    clip.duration = TimeCode::from_secs(clip.source_duration.as_secs() / speed);
    tracing::debug!(clip = %clip_id, speed, duration = clip.duration.as_secs(), "Rate");
    Ok(())
}
