//! Clip and track selection state, plus the active editing tool.

use cutline_common::ClipId;
use serde::{Deserialize, Serialize};

/// The active editing tool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    /// Standard selection/move tool.
    #[default]
    Select,
    /// Razor: split a clip at the click point.
    Razor,
    /// Rate: change clip speed, rescaling its duration.
    Rate,
    /// Slip: shift the trim window without moving the clip.
    Slip,
}

/// Tracks which clips and tracks are currently selected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected_clips: Vec<ClipId>,
    selected_tracks: Vec<String>,
    /// Whether multi-select mode is active (e.g., Shift or Ctrl held).
    multi_select: bool,
}

impl SelectionState {
    /// Create a new empty selection state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a clip. If `multi` is false, clears previous clip selection first.
    pub fn select_clip(&mut self, clip_id: &ClipId, multi: bool) {
        if !multi {
            self.selected_clips.clear();
        }
        // Avoid duplicates
        if !self.selected_clips.iter().any(|id| id == clip_id) {
            self.selected_clips.push(clip_id.clone());
        }
        self.multi_select = multi;
    }

    /// Deselect a specific clip by ID.
    pub fn deselect_clip(&mut self, clip_id: &ClipId) {
        self.selected_clips.retain(|id| id != clip_id);
    }

    /// Select a track. If `multi` is false, clears previous track selection first.
    pub fn select_track(&mut self, track_id: &str, multi: bool) {
        if !multi {
            self.selected_tracks.clear();
        }
        if !self.selected_tracks.iter().any(|id| id == track_id) {
            self.selected_tracks.push(track_id.to_string());
        }
        self.multi_select = multi;
    }

    /// Deselect a specific track by ID.
    pub fn deselect_track(&mut self, track_id: &str) {
        self.selected_tracks.retain(|id| id != track_id);
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected_clips.clear();
        self.selected_tracks.clear();
        self.multi_select = false;
    }

    /// Drop selection entries whose clips are not in `live` anymore.
    pub fn retain_clips(&mut self, live: impl Fn(&ClipId) -> bool) {
        self.selected_clips.retain(|id| live(id));
    }

    /// Get the list of currently selected clip IDs.
    pub fn selected_clips(&self) -> &[ClipId] {
        &self.selected_clips
    }

    /// The primary (first) selected clip, if any.
    pub fn primary_clip(&self) -> Option<&ClipId> {
        self.selected_clips.first()
    }

    /// Get the list of currently selected track IDs.
    pub fn selected_tracks(&self) -> &[String] {
        &self.selected_tracks
    }

    /// Check if a clip is currently selected.
    pub fn is_clip_selected(&self, clip_id: &ClipId) -> bool {
        self.selected_clips.iter().any(|id| id == clip_id)
    }

    /// Check if a track is currently selected.
    pub fn is_track_selected(&self, track_id: &str) -> bool {
        self.selected_tracks.iter().any(|id| id == track_id)
    }

    /// Whether multi-select mode is currently active.
    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_clips.is_empty() && self.selected_tracks.is_empty()
    }

    /// Returns the total number of selected items across all categories.
    pub fn count(&self) -> usize {
        self.selected_clips.len() + self.selected_tracks.len()
    }
}
