//! Linear undo/redo over whole-state snapshots.
//!
//! Every snapshot is a structurally independent copy of `MatchState`, never
//! a reference into the live state. Depth is bounded: once the undo stack is
//! full the oldest snapshot is evicted.

use std::collections::VecDeque;

use super::match_state::MatchState;

/// Maximum retained undo depth. A full match logs a few hundred entries, so
/// this comfortably covers a session while keeping memory bounded.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Default)]
pub struct HistoryManager {
    undo: VecDeque<MatchState>,
    redo: Vec<MatchState>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-transition state. Any redo branch is discarded.
    pub fn record(&mut self, snapshot: MatchState) {
        if self.undo.len() == MAX_DEPTH {
            self.undo.pop_front();
            log::debug!("undo stack full, evicting oldest snapshot");
        }
        self.undo.push_back(snapshot);
        self.redo.clear();
    }

    /// Pop the most recent snapshot, stashing `current` for redo. `None`
    /// when there is nothing to undo.
    pub fn undo(&mut self, current: &MatchState) -> Option<MatchState> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current.clone());
        Some(previous)
    }

    /// Symmetric to [`undo`](Self::undo).
    pub fn redo(&mut self, current: &MatchState) -> Option<MatchState> {
        let next = self.redo.pop()?;
        if self.undo.len() == MAX_DEPTH {
            self.undo.pop_front();
        }
        self.undo.push_back(current.clone());
        Some(next)
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

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_score(score_us: u8) -> MatchState {
        MatchState { score_us, ..MatchState::new() }
    }

    #[test]
    fn test_undo_then_redo_round_trips() {
        let mut history = HistoryManager::new();
        let before = state_with_score(3);
        let after = state_with_score(4);

        history.record(before.clone());

        let undone = history.undo(&after).unwrap();
        assert_eq!(undone, before);

        let redone = history.redo(&undone).unwrap();
        assert_eq!(redone, after);
    }

    #[test]
    fn test_empty_stacks_are_no_ops() {
        let mut history = HistoryManager::new();
        let current = state_with_score(0);
        assert!(history.undo(&current).is_none());
        assert!(history.redo(&current).is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo_branch() {
        let mut history = HistoryManager::new();
        history.record(state_with_score(1));
        let _ = history.undo(&state_with_score(2));
        assert!(history.can_redo());

        history.record(state_with_score(3));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_is_bounded_and_oldest_evicted() {
        let mut history = HistoryManager::new();
        for i in 0..(MAX_DEPTH + 10) {
            history.record(state_with_score((i % 200) as u8));
        }
        assert_eq!(history.undo_depth(), MAX_DEPTH);

        // The oldest surviving snapshot is number 10, not 0.
        let mut last = None;
        let current = state_with_score(0);
        while let Some(s) = history.undo(&current) {
            last = Some(s);
        }
        assert_eq!(last.unwrap().score_us, 10);
    }
}
