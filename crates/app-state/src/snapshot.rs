//! Serializable state snapshot for undo/redo.
//!
//! `ProjectSnapshot` captures the minimum state needed to restore the editor
//! to a previous point: the full sequence collection plus the playhead time.
//! Snapshots are deep copies; later edits never alias into history.

use cutline_timeline::Sequence;
use serde::{Deserialize, Serialize};

use crate::context::EditorContext;

/// A complete snapshot of the editable project state for undo/redo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// All sequences, deep-copied.
    pub sequences: Vec<Sequence>,
    /// Playhead position in seconds.
    pub current_time: f64,
}

impl ProjectSnapshot {
    /// Capture a snapshot from the current editor context.
    pub fn capture(ctx: &EditorContext) -> Self {
        Self {
            sequences: ctx.sequences.clone(),
            current_time: ctx.current_time.as_secs(),
        }
    }

    /// Restore this snapshot into the given editor context.
    ///
    /// Overwrites the sequence collection and the playhead. Does NOT touch
    /// transport mode, tool, snapping, or the clipboard — those are managed
    /// separately. If the previously active sequence no longer exists, the
    /// first restored sequence becomes active. Selection entries whose clips
    /// no longer resolve are dropped.
    pub fn restore(&self, ctx: &mut EditorContext) {
        ctx.sequences = self.sequences.clone();
        ctx.current_time = cutline_common::TimeCode::from_secs(self.current_time);

        let still_active = ctx
            .active_sequence_id
            .as_ref()
            .is_some_and(|id| ctx.sequences.iter().any(|s| &s.id == id));
        if !still_active {
            ctx.active_sequence_id = ctx.sequences.first().map(|s| s.id.clone());
        }

        let live: Vec<cutline_common::ClipId> = ctx
            .sequences
            .iter()
            .flat_map(|s| s.clips.iter().map(|c| c.id.clone()))
            .collect();
        ctx.selection.retain_clips(|id| live.contains(id));

        tracing::debug!(
            sequences = ctx.sequences.len(),
            time = self.current_time,
            "Snapshot restored"
        );
    }

    /// Estimate the memory footprint of this snapshot in bytes.
    /// A rough approximation for history budgeting, not an exact measurement.
    pub fn estimated_size(&self) -> usize {
        let mut size = std::mem::size_of::<Self>();
        for seq in &self.sequences {
            size += std::mem::size_of::<Sequence>();
            size += seq.name.len();
            for clip in &seq.clips {
                size += std::mem::size_of::<cutline_timeline::Clip>();
                size += clip.id.0.len() + clip.name.len() + clip.track_id.len();
                size += clip.keyframes.len() * std::mem::size_of::<cutline_timeline::Keyframe>();
            }
            for marker in &seq.markers {
                size += marker.label.len() + marker.color.len();
            }
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_common::{AssetInfo, MediaKind, TimeCode};
    use cutline_timeline::Clip;

    fn make_test_context() -> EditorContext {
        let mut ctx = EditorContext::new();
        let seq = ctx.create_sequence("Sequence 1");
        let seq_id = seq.id.clone();

        let asset =
            AssetInfo::new("m1", "footage.mp4", MediaKind::Video).with_duration(TimeCode::from_secs(10.0));
        let seq = ctx.sequence_mut(&seq_id).unwrap();
        seq.clips.push(Clip::from_asset(
            "c1",
            &asset,
            "v1",
            TimeCode::ZERO,
            TimeCode::from_secs(10.0),
        ));
        ctx.current_time = TimeCode::from_secs(4.0);
        ctx.selection.select_clip(&cutline_common::ClipId::new("c1"), false);
        ctx
    }

    #[test]
    fn capture_and_restore_roundtrip() {
        let ctx = make_test_context();
        let snapshot = ProjectSnapshot::capture(&ctx);

        assert_eq!(snapshot.sequences.len(), 1);
        assert!((snapshot.current_time - 4.0).abs() < f64::EPSILON);

        let mut modified = EditorContext::new();
        snapshot.restore(&mut modified);

        assert_eq!(modified.sequences.len(), 1);
        assert_eq!(modified.sequences[0].clips.len(), 1);
        assert_eq!(modified.current_time, TimeCode::from_secs(4.0));
        assert!(modified.active_sequence().is_some());
    }

    #[test]
    fn restore_is_a_deep_copy() {
        let ctx = make_test_context();
        let snapshot = ProjectSnapshot::capture(&ctx);

        let mut target = EditorContext::new();
        snapshot.restore(&mut target);
        target.sequences[0].clips[0].start_time = TimeCode::from_secs(99.0);

        // The snapshot itself must be unaffected
        assert_eq!(snapshot.sequences[0].clips[0].start_time, TimeCode::ZERO);
    }

    #[test]
    fn restore_retargets_missing_active_sequence() {
        let ctx = make_test_context();
        let snapshot = ProjectSnapshot::capture(&ctx);

        let mut target = EditorContext::new();
        target.active_sequence_id = Some(cutline_common::SequenceId::new("gone"));
        snapshot.restore(&mut target);

        assert_eq!(
            target.active_sequence_id,
            Some(snapshot.sequences[0].id.clone())
        );
    }

    #[test]
    fn restore_drops_dead_selection() {
        let ctx = make_test_context();
        let snapshot = ProjectSnapshot::capture(&ctx);

        let mut target = EditorContext::new();
        target
            .selection
            .select_clip(&cutline_common::ClipId::new("ghost"), false);
        snapshot.restore(&mut target);

        assert!(!target
            .selection
            .is_clip_selected(&cutline_common::ClipId::new("ghost")));
    }

    #[test]
    fn restore_does_not_touch_tool_or_snapping() {
        let ctx = make_test_context();
        let snapshot = ProjectSnapshot::capture(&ctx);

        let mut target = EditorContext::new();
        target.tool = crate::selection::Tool::Razor;
        target.snapping_enabled = false;

        snapshot.restore(&mut target);
        assert_eq!(target.tool, crate::selection::Tool::Razor);
        assert!(!target.snapping_enabled);
    }

    #[test]
    fn effect_chains_survive_capture_and_restore() {
        let mut ctx = make_test_context();
        let clip = &mut ctx.sequences[0].clips[0];
        clip.effects.push(cutline_timeline::EffectInstance::new(
            "fx_1",
            "crossDissolve",
            serde_json::json!({ "duration": 1 }),
        ));
        clip.audio_effects.push(cutline_timeline::EffectInstance::new(
            "fx_2",
            "normalize",
            serde_json::json!({ "target": -3 }),
        ));

        let snapshot = ProjectSnapshot::capture(&ctx);
        let json = serde_json::to_string(&snapshot).unwrap();
        let reloaded: ProjectSnapshot = serde_json::from_str(&json).unwrap();

        let mut target = EditorContext::new();
        reloaded.restore(&mut target);
        let restored = &target.sequences[0].clips[0];
        assert_eq!(restored.effects.len(), 1);
        assert_eq!(restored.effects[0].name, "crossDissolve");
        assert_eq!(restored.audio_effects[0].parameters["target"], -3);
    }

    #[test]
    fn snapshot_serialization_roundtrip() {
        let ctx = make_test_context();
        let snapshot = ProjectSnapshot::capture(&ctx);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: ProjectSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, restored);
    }

    #[test]
    fn estimated_size_grows_with_data() {
        let empty = ProjectSnapshot {
            sequences: Vec::new(),
            current_time: 0.0,
        };
        let full = ProjectSnapshot::capture(&make_test_context());
        assert!(full.estimated_size() > empty.estimated_size());
    }
}
