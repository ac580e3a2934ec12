// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bounded snapshot undo/redo history.
//!
//! The store keeps an ordered sequence of full-project snapshots plus a
//! cursor into it. Saving truncates everything after the cursor before
//! appending, so history stays linear; once the cap is reached the
//! oldest snapshot is evicted.

use lineage_editor_graph::Project;
use std::collections::VecDeque;

/// Maximum number of snapshots retained
pub const MAX_HISTORY: usize = 50;

/// Ordered snapshot sequence with a cursor into the active state
#[derive(Debug, Clone)]
pub struct HistoryStore {
    snapshots: VecDeque<Project>,
    cursor: usize,
}

impl HistoryStore {
    /// Create a history whose single snapshot is the given state
    pub fn new(initial: Project) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);
        Self { snapshots, cursor: 0 }
    }

    /// Record a new snapshot after the cursor, discarding any redo tail.
    ///
    /// When the sequence would exceed [`MAX_HISTORY`] the oldest
    /// snapshot is evicted and the cursor stays clamped at the end.
    pub fn save_state(&mut self, project: &Project) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(project.clone());
        if self.snapshots.len() > MAX_HISTORY {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step the cursor back and emit the snapshot to restore.
    ///
    /// Returns `None` when already at the oldest snapshot. The emitted
    /// snapshot must replace the caller's canonical state wholesale.
    pub fn undo(&mut self) -> Option<&Project> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step the cursor forward and emit the snapshot to restore.
    ///
    /// Returns `None` when already at the newest snapshot.
    pub fn redo(&mut self) -> Option<&Project> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    /// Reset to a single empty-project snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.snapshots.push_back(Project::default());
        self.cursor = 0;
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots currently held
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the store holds no snapshots (never true in practice:
    /// the store always keeps at least the initial snapshot)
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(Project::default())
    }
}
