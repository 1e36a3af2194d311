//! Audio ducking: generate volume keyframes on music clips wherever dialog
//! plays over them.

use cutline_common::{EditError, TimeCode};
use cutline_state::EditorContext;
use cutline_timeline::{ClipProperty, Keyframe};

/// Ducking parameters. `amount` is the ducked volume keyframe value; fades
/// are the ramp lengths on either side of the ducked span.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DuckingParams {
    pub amount: f32,
    pub fade_in: TimeCode,
    pub fade_out: TimeCode,
}

impl Default for DuckingParams {
    fn default() -> Self {
        Self {
            amount: -12.0,
            fade_in: TimeCode::from_secs(0.5),
            fade_out: TimeCode::from_secs(0.5),
        }
    }
}

/// For every (dialog clip, overlapping music clip) pair, append four volume
/// keyframes to the music clip: full level before the overlap, the ducked
/// value across it, and full level after.
///
/// Keyframes are *appended*, never replaced: applying ducking twice stacks a
/// second set of keyframes. Returns the number of ducked pairs.
pub fn apply_audio_ducking(
    ctx: &mut EditorContext,
    dialog_track: &str,
    music_track: &str,
    params: DuckingParams,
) -> Result<usize, EditError> {
    let seq = ctx.active_sequence_mut().ok_or(EditError::NoActiveSequence)?;
    if seq.track(dialog_track).is_none() {
        return Err(EditError::TrackNotFound(dialog_track.to_string()));
    }
    if seq.track(music_track).is_none() {
        return Err(EditError::TrackNotFound(music_track.to_string()));
    }

    let dialog_spans: Vec<(TimeCode, TimeCode)> = seq
        .clips_on_track(dialog_track)
        .map(|c| (c.start_time, c.end_time()))
        .collect();

    let mut pairs = 0;
    for (dialog_start, dialog_end) in dialog_spans {
        for music in seq
            .clips
            .iter_mut()
            .filter(|c| c.track_id == music_track)
            .filter(|c| {
                c.start_time.as_secs() < dialog_end.as_secs()
                    && c.end_time().as_secs() > dialog_start.as_secs()
            })
        {
            if music
                .keyframes
                .iter()
                .any(|k| k.property == ClipProperty::Volume)
            {
                tracing::warn!(
                    clip = %music.id,
                    "Ducking applied over existing volume keyframes; stacking"
                );
            }

            let duck_start = TimeCode::from_secs(dialog_start.as_secs().max(music.start_time.as_secs()));
            let duck_end = TimeCode::from_secs(dialog_end.as_secs().min(music.end_time().as_secs()));

            music.keyframes.extend([
                Keyframe::new(duck_start - params.fade_in, ClipProperty::Volume, 100.0),
                Keyframe::new(duck_start, ClipProperty::Volume, params.amount),
                Keyframe::new(duck_end, ClipProperty::Volume, params.amount),
                Keyframe::new(duck_end + params.fade_out, ClipProperty::Volume, 100.0),
            ]);
            pairs += 1;
        }
    }

    tracing::debug!(dialog_track, music_track, pairs, "Audio ducking applied");
    Ok(pairs)
}
