//! Snapshot-based undo/redo history.
//!
//! A single bounded list of snapshots with a cursor. Each committed action
//! appends a deep-copy snapshot *after* the cursor, discarding any redo
//! branch beyond it. When the list exceeds its capacity the oldest entry is
//! evicted and the cursor stays in place, so long sessions silently lose
//! their deepest undo steps instead of growing without bound.
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryManager::new(50);
//!
//! // After every committed action, record the resulting state
//! history.record(ProjectSnapshot::capture(&ctx));
//!
//! // Undo / redo restore the snapshot at the new cursor position
//! if let Some(snap) = history.undo() {
//!     snap.clone().restore(&mut ctx);
//! }
//! ```

use crate::snapshot::ProjectSnapshot;

/// Manages undo/redo history using state snapshots.
pub struct HistoryManager {
    entries: Vec<ProjectSnapshot>,
    /// Index of the snapshot matching the live state. `None` until the first
    /// `record()`.
    cursor: Option<usize>,
    max_entries: usize,
}

impl HistoryManager {
    /// Create a new history manager with the given maximum number of entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_entries,
        }
    }

    /// Record a snapshot of the state after a committed action.
    ///
    /// Entries beyond the cursor (the redo branch) are discarded. If the
    /// list would exceed its capacity, the oldest entry is evicted and the
    /// cursor is left pointing at the same snapshot it pointed at before.
    pub fn record(&mut self, snapshot: ProjectSnapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
            self.cursor = Some(self.entries.len() - 1);
        } else {
            self.cursor = Some(keep);
        }

        tracing::debug!(
            depth = self.entries.len(),
            cursor = ?self.cursor,
            "History entry recorded"
        );
    }

    /// Step the cursor back and return the snapshot to restore.
    /// No-op at the oldest entry (or before the first `record()`).
    pub fn undo(&mut self) -> Option<&ProjectSnapshot> {
        let c = self.cursor?;
        if c == 0 {
            return None;
        }
        self.cursor = Some(c - 1);
        tracing::debug!(cursor = c - 1, "Undo");
        self.entries.get(c - 1)
    }

    /// Step the cursor forward and return the snapshot to restore.
    /// No-op when the cursor already sits at the newest entry.
    pub fn redo(&mut self) -> Option<&ProjectSnapshot> {
        let c = self.cursor?;
        if c + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(c + 1);
        tracing::debug!(cursor = c + 1, "Redo");
        self.entries.get(c + 1)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor position, if any snapshot has been recorded.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Get the maximum number of entries.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        tracing::debug!("History cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a snapshot with an identifying playhead time.
    fn make_snapshot(tag: f64) -> ProjectSnapshot {
        ProjectSnapshot {
            sequences: Vec::new(),
            current_time: tag,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let h = HistoryManager::new(50);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(h.is_empty());
        assert!(h.cursor().is_none());
    }

    #[test]
    fn undo_before_first_record_is_noop() {
        let mut h = HistoryManager::new(50);
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
    }

    #[test]
    fn single_record_cannot_undo() {
        let mut h = HistoryManager::new(50);
        h.record(make_snapshot(0.0));
        // The only snapshot matches the live state; nothing earlier exists.
        assert!(!h.can_undo());
        assert!(h.undo().is_none());
    }

    #[test]
    fn record_undo_redo_cycle() {
        let mut h = HistoryManager::new(50);
        h.record(make_snapshot(0.0));
        h.record(make_snapshot(1.0));
        h.record(make_snapshot(2.0));

        assert_eq!(h.undo().unwrap().current_time, 1.0);
        assert_eq!(h.undo().unwrap().current_time, 0.0);
        assert!(h.undo().is_none()); // boundary

        assert_eq!(h.redo().unwrap().current_time, 1.0);
        assert_eq!(h.redo().unwrap().current_time, 2.0);
        assert!(h.redo().is_none()); // boundary
    }

    #[test]
    fn record_discards_redo_branch() {
        let mut h = HistoryManager::new(50);
        h.record(make_snapshot(0.0));
        h.record(make_snapshot(1.0));
        h.record(make_snapshot(2.0));

        h.undo();
        h.undo();
        assert!(h.can_redo());

        h.record(make_snapshot(9.0));
        assert!(!h.can_redo());
        assert_eq!(h.len(), 2); // 0.0 and 9.0
        assert_eq!(h.undo().unwrap().current_time, 0.0);
        assert_eq!(h.redo().unwrap().current_time, 9.0);
    }

    #[test]
    fn eviction_keeps_cursor_on_same_snapshot() {
        let mut h = HistoryManager::new(3);
        h.record(make_snapshot(0.0));
        h.record(make_snapshot(1.0));
        h.record(make_snapshot(2.0));
        assert_eq!(h.cursor(), Some(2));

        // Exceeds capacity: 0.0 is evicted, cursor stays on the newest entry
        h.record(make_snapshot(3.0));
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), Some(2));

        // Undo now walks 3.0 -> 2.0 -> 1.0 and stops
        assert_eq!(h.undo().unwrap().current_time, 2.0);
        assert_eq!(h.undo().unwrap().current_time, 1.0);
        assert!(h.undo().is_none());
    }

    #[test]
    fn deep_eviction_preserves_newest_window() {
        let mut h = HistoryManager::new(3);
        for i in 0..10 {
            h.record(make_snapshot(i as f64));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.undo().unwrap().current_time, 8.0);
        assert_eq!(h.undo().unwrap().current_time, 7.0);
        assert!(h.undo().is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut h = HistoryManager::new(50);
        h.record(make_snapshot(0.0));
        h.record(make_snapshot(1.0));
        h.undo();

        h.clear();
        assert!(h.is_empty());
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(h.cursor().is_none());
    }

    #[test]
    fn undo_redo_are_idempotent_at_boundaries() {
        let mut h = HistoryManager::new(50);
        h.record(make_snapshot(0.0));
        h.record(make_snapshot(1.0));

        h.undo();
        assert!(h.undo().is_none());
        assert!(h.undo().is_none());
        assert_eq!(h.cursor(), Some(0));

        h.redo();
        assert!(h.redo().is_none());
        assert!(h.redo().is_none());
        assert_eq!(h.cursor(), Some(1));
    }
}
