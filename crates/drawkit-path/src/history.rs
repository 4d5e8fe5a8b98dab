//! Snapshot-based undo and redo.
//!
//! Paths are plain values, so history is a bounded list of earlier path
//! versions. Every recorded edit gets a sequence number that keeps growing
//! across undo and redo.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use drawkit_core::PathResult;
use tracing::debug;

use crate::model::Path;

pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// A path version saved before an edit.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub sequence: u64,
    pub label: String,
    pub recorded_at: DateTime<Utc>,
    pub path: Path,
}

#[derive(Debug, Clone)]
pub struct PathHistory {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    next_sequence: u64,
    max_depth: usize,
}

impl Default for PathHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl PathHistory {
    /// A history keeping at most `max_depth` undo steps (at least one).
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            next_sequence: 1,
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Saves `before`, the path as it was before an edit named `label`.
    /// Any redo steps are discarded. Returns the edit's sequence number.
    pub fn record(&mut self, before: &Path, label: impl Into<String>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.undo.push_back(Snapshot {
            sequence,
            label: label.into(),
            recorded_at: Utc::now(),
            path: before.clone(),
        });
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        self.redo.clear();
        sequence
    }

    /// Restores the most recent snapshot into `current`, keeping what it
    /// replaces for redo. Returns the undone edit's sequence number.
    pub fn undo(&mut self, current: &mut Path) -> Option<u64> {
        let snapshot = self.undo.pop_back()?;
        let sequence = snapshot.sequence;
        debug!("Undo #{} ({})", sequence, snapshot.label);
        let replaced = restore(current, snapshot.path);
        self.redo.push(Snapshot {
            sequence,
            label: snapshot.label,
            recorded_at: Utc::now(),
            path: replaced,
        });
        Some(sequence)
    }

    /// Reapplies the most recently undone edit.
    pub fn redo(&mut self, current: &mut Path) -> Option<u64> {
        let snapshot = self.redo.pop()?;
        let sequence = snapshot.sequence;
        debug!("Redo #{} ({})", sequence, snapshot.label);
        let replaced = restore(current, snapshot.path);
        self.undo.push_back(Snapshot {
            sequence,
            label: snapshot.label,
            recorded_at: Utc::now(),
            path: replaced,
        });
        Some(sequence)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Label of the edit `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo.back().map(|s| s.label.as_str())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo.last().map(|s| s.label.as_str())
    }

    /// The snapshot recorded for edit `sequence`, if still held.
    pub fn snapshot(&self, sequence: u64) -> Option<&Snapshot> {
        self.undo
            .iter()
            .chain(self.redo.iter())
            .find(|s| s.sequence == sequence)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

/// Puts `saved` in place of `current` and returns the previous version.
///
/// The restored path gets a fresh generation so partcodes issued on either
/// side of the swap are stale afterwards.
fn restore(current: &mut Path, saved: Path) -> Path {
    let replaced = current.clone();
    current.replace_segments(saved.segments().to_vec());
    replaced
}

/// A path bundled with its history.
///
/// Operations run on a working copy; the path and history only change when
/// the operation succeeds.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    path: Path,
    history: PathHistory,
}

impl EditSession {
    pub fn new(path: Path, max_depth: usize) -> Self {
        Self {
            path,
            history: PathHistory::new(max_depth),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &PathHistory {
        &self.history
    }

    /// Runs `op` on the path as one undoable edit.
    ///
    /// If `op` fails the session is left exactly as it was. A successful
    /// operation that leaves the geometry unchanged records nothing.
    pub fn apply<T>(
        &mut self,
        label: &str,
        op: impl FnOnce(&mut Path) -> PathResult<T>,
    ) -> PathResult<T> {
        let mut working = self.path.clone();
        let value = op(&mut working)?;
        if working != self.path {
            self.history.record(&self.path, label);
        }
        self.path = working;
        Ok(value)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.path).is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.path).is_some()
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}
