//! The editor context: the single state container the engine operates on.
//!
//! All editing and playback APIs take an explicit `&mut EditorContext`; there
//! is no global editor state. The context owns the sequence collection, the
//! playhead, selection, tool, and the clipboard. Undo history and playback
//! transport live outside (see `HistoryManager` and `cutline-playback`) so
//! that snapshots stay small and restoring one never disturbs playback.

use cutline_common::{ClipId, EditError, EngineConfig, SequenceId, TimeCode};
use cutline_timeline::{Clip, Marker, Sequence};
use serde::{Deserialize, Serialize};

use crate::selection::{SelectionState, Tool};

/// Host-owned editor state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorContext {
    pub config: EngineConfig,
    pub sequences: Vec<Sequence>,
    pub active_sequence_id: Option<SequenceId>,
    /// Playhead position on the active sequence.
    pub current_time: TimeCode,
    pub selection: SelectionState,
    pub tool: Tool,
    pub snapping_enabled: bool,
    /// Single-clip clipboard for copy/paste.
    pub clipboard: Option<Clip>,
    #[serde(default)]
    next_clip: u64,
    #[serde(default)]
    next_sequence: u64,
    #[serde(default)]
    next_marker: u64,
    #[serde(default)]
    next_effect: u64,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorContext {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            sequences: Vec::new(),
            active_sequence_id: None,
            current_time: TimeCode::ZERO,
            selection: SelectionState::new(),
            tool: Tool::Select,
            snapping_enabled: true,
            clipboard: None,
            next_clip: 0,
            next_sequence: 0,
            next_marker: 0,
            next_effect: 0,
        }
    }

    /// Create a sequence with the default track layout and make it active.
    pub fn create_sequence(&mut self, name: impl Into<String>) -> &mut Sequence {
        self.next_sequence += 1;
        let id = format!("seq_{}", self.next_sequence);
        let seq = Sequence::with_format(
            id,
            name,
            self.config.default_fps,
            self.config.default_resolution,
        );
        tracing::debug!(id = %seq.id, name = %seq.name, "Sequence created");
        self.active_sequence_id = Some(seq.id.clone());
        self.sequences.push(seq);
        self.sequences.last_mut().expect("just pushed")
    }

    pub fn sequence(&self, id: &SequenceId) -> Option<&Sequence> {
        self.sequences.iter().find(|s| &s.id == id)
    }

    pub fn sequence_mut(&mut self, id: &SequenceId) -> Option<&mut Sequence> {
        self.sequences.iter_mut().find(|s| &s.id == id)
    }

    pub fn active_sequence(&self) -> Option<&Sequence> {
        let id = self.active_sequence_id.as_ref()?;
        self.sequence(id)
    }

    pub fn active_sequence_mut(&mut self) -> Option<&mut Sequence> {
        let id = self.active_sequence_id.clone()?;
        self.sequence_mut(&id)
    }

    /// Switch the active sequence. Returns false if the id is unknown.
    pub fn set_active_sequence(&mut self, id: &SequenceId) -> bool {
        if self.sequence(id).is_some() {
            tracing::debug!(%id, "Active sequence changed");
            self.active_sequence_id = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Mint a fresh clip id. Monotonic for the lifetime of the context; undo
    /// never rewinds it, so restored and new clips can't collide.
    pub fn mint_clip_id(&mut self) -> ClipId {
        self.next_clip += 1;
        ClipId::new(format!("clip_{}", self.next_clip))
    }

    fn mint_marker_id(&mut self) -> String {
        self.next_marker += 1;
        format!("marker_{}", self.next_marker)
    }

    /// Mint a fresh effect instance id.
    pub fn mint_effect_id(&mut self) -> String {
        self.next_effect += 1;
        format!("fx_{}", self.next_effect)
    }

    /// Move the playhead. Clamps to zero; the upper bound is the sequence
    /// duration when one exists.
    pub fn set_current_time(&mut self, time: TimeCode) {
        let duration = self.active_sequence().map(|s| s.duration());
        let mut t = time.clamp_min_zero();
        if let Some(d) = duration {
            if d.as_secs() > 0.0 && t.as_secs() > d.as_secs() {
                t = d;
            }
        }
        self.current_time = t;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        tracing::debug!(?tool, "Tool selected");
        self.tool = tool;
    }

    pub fn toggle_snapping(&mut self) -> bool {
        self.snapping_enabled = !self.snapping_enabled;
        tracing::debug!(enabled = self.snapping_enabled, "Snapping toggled");
        self.snapping_enabled
    }

    /// Toggle a track's mute flag, returning the new state.
    pub fn toggle_track_mute(&mut self, track_id: &str) -> Result<bool, EditError> {
        let track = self
            .active_sequence_mut()
            .ok_or(EditError::NoActiveSequence)?
            .track_mut(track_id)
            .ok_or_else(|| EditError::TrackNotFound(track_id.to_string()))?;
        track.muted = !track.muted;
        let muted = track.muted;
        tracing::debug!(track_id, muted, "Track mute toggled");
        Ok(muted)
    }

    /// Toggle a track's solo flag, returning the new state.
    pub fn toggle_track_solo(&mut self, track_id: &str) -> Result<bool, EditError> {
        let track = self
            .active_sequence_mut()
            .ok_or(EditError::NoActiveSequence)?
            .track_mut(track_id)
            .ok_or_else(|| EditError::TrackNotFound(track_id.to_string()))?;
        track.solo = !track.solo;
        let solo = track.solo;
        tracing::debug!(track_id, solo, "Track solo toggled");
        Ok(solo)
    }

    /// Toggle a track's lock flag, returning the new state.
    pub fn toggle_track_lock(&mut self, track_id: &str) -> Result<bool, EditError> {
        let track = self
            .active_sequence_mut()
            .ok_or(EditError::NoActiveSequence)?
            .track_mut(track_id)
            .ok_or_else(|| EditError::TrackNotFound(track_id.to_string()))?;
        track.locked = !track.locked;
        let locked = track.locked;
        tracing::debug!(track_id, locked, "Track lock toggled");
        Ok(locked)
    }

    /// Drop a marker at the playhead on the active sequence.
    pub fn add_marker_at_playhead(&mut self) -> Result<&Marker, EditError> {
        let id = self.mint_marker_id();
        let time = self.current_time;
        let seq = self
            .active_sequence_mut()
            .ok_or(EditError::NoActiveSequence)?;
        let marker = seq.add_marker(id, time);
        tracing::debug!(id = %marker.id, time = time.as_secs(), "Marker added");
        Ok(marker)
    }

    /// Set the sequence in point from the playhead.
    pub fn set_in_point(&mut self) -> Result<(), EditError> {
        let time = self.current_time;
        let seq = self
            .active_sequence_mut()
            .ok_or(EditError::NoActiveSequence)?;
        seq.in_point = Some(time);
        tracing::debug!(time = time.as_secs(), "In point set");
        Ok(())
    }

    /// Set the sequence out point from the playhead.
    pub fn set_out_point(&mut self) -> Result<(), EditError> {
        let time = self.current_time;
        let seq = self
            .active_sequence_mut()
            .ok_or(EditError::NoActiveSequence)?;
        seq.out_point = Some(time);
        tracing::debug!(time = time.as_secs(), "Out point set");
        Ok(())
    }

    pub fn clear_in_out_points(&mut self) -> Result<(), EditError> {
        let seq = self
            .active_sequence_mut()
            .ok_or(EditError::NoActiveSequence)?;
        seq.in_point = None;
        seq.out_point = None;
        Ok(())
    }

    /// Total clip count across all sequences.
    pub fn total_clips(&self) -> usize {
        self.sequences.iter().map(|s| s.clips.len()).sum()
    }
}
