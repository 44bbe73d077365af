//! Authoritative match state and its transitions.
//!
//! `MatchState` is replaced wholesale on every transition: each `apply_*`
//! method builds a new state from the old one, so history snapshots are
//! structurally independent copies and a failed validation leaves the
//! current state untouched.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::models::{ActionResult, Lineup, LogEntry, TeamSide};

use super::recorder::{RallyCommit, SubstitutionCommit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub set_number: u8,
    pub sets_won_us: u8,
    pub sets_won_opponent: u8,
    pub lineup_us: Lineup,
    pub lineup_opponent: Lineup,
    pub score_us: u8,
    pub score_opponent: u8,
    pub serving: TeamSide,
    /// Append-only match log, accumulated across sets.
    pub log: Vec<LogEntry>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            set_number: 1,
            sets_won_us: 0,
            sets_won_opponent: 0,
            lineup_us: Lineup::new(),
            lineup_opponent: Lineup::new(),
            score_us: 0,
            score_opponent: 0,
            serving: TeamSide::Us,
            log: Vec::new(),
        }
    }

    pub fn score(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Us => self.score_us,
            TeamSide::Opponent => self.score_opponent,
        }
    }

    pub fn sets_won(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Us => self.sets_won_us,
            TeamSide::Opponent => self.sets_won_opponent,
        }
    }

    pub fn lineup(&self, side: TeamSide) -> &Lineup {
        match side {
            TeamSide::Us => &self.lineup_us,
            TeamSide::Opponent => &self.lineup_opponent,
        }
    }

    fn lineup_mut(&mut self, side: TeamSide) -> &mut Lineup {
        match side {
            TeamSide::Us => &mut self.lineup_us,
            TeamSide::Opponent => &mut self.lineup_opponent,
        }
    }

    fn add_point(&mut self, side: TeamSide) {
        match side {
            TeamSide::Us => self.score_us += 1,
            TeamSide::Opponent => self.score_opponent += 1,
        }
    }

    /// Apply a committed rally as one atomic transition.
    ///
    /// Scoring: Point awards the acting side, Error awards the other side,
    /// Normal changes nothing. Side-out: the serve changes hands, and the
    /// winner's lineup rotates once, if and only if the point winner was not
    /// already serving. The appended entry records the post-increment scores
    /// and the serving side after the side-out decision.
    pub fn apply_rally(&self, commit: &RallyCommit, timestamp_ms: u64) -> MatchState {
        let mut next = self.clone();

        let point_winner = match commit.result {
            ActionResult::Point => Some(commit.side),
            ActionResult::Error => Some(commit.side.other()),
            ActionResult::Normal => None,
        };

        if let Some(winner) = point_winner {
            next.add_point(winner);
            if winner != next.serving {
                next.serving = winner;
                let rotated = next.lineup(winner).rotate();
                *next.lineup_mut(winner) = rotated;
            }
        }

        // The acting player is resolved against the pre-rotation lineup.
        let player_number = self.lineup(commit.side).number_at(commit.position).to_string();

        let mut entry = LogEntry::rally(
            timestamp_ms,
            next.set_number,
            next.score_us,
            next.score_opponent,
            commit.side,
            player_number,
            commit.position,
            commit.action,
            commit.quality,
            commit.result,
            next.serving,
        )
        .with_start(commit.start)
        .with_end(commit.end);
        if let Some(note) = &commit.note {
            entry = entry.with_note(note.clone());
        }
        next.log.push(entry);
        next
    }

    /// Apply a substitution. The incoming number must be non-empty and not
    /// already on court for that side; on rejection the state is unchanged.
    /// Score and serve are never touched.
    pub fn apply_substitution(
        &self,
        commit: &SubstitutionCommit,
        timestamp_ms: u64,
    ) -> Result<MatchState> {
        if commit.incoming.trim().is_empty() {
            return Err(MatchError::EmptyJerseyNumber);
        }
        if self.lineup(commit.side).contains(&commit.incoming) {
            return Err(MatchError::DuplicateJerseyNumber(commit.incoming.clone()));
        }

        let mut next = self.clone();
        let outgoing = next.lineup(commit.side).number_at(commit.position).to_string();
        next.lineup_mut(commit.side).set_number(commit.position, commit.incoming.clone());
        next.log.push(LogEntry::substitution(
            timestamp_ms,
            next.set_number,
            next.score_us,
            next.score_opponent,
            commit.side,
            commit.position,
            &outgoing,
            &commit.incoming,
            next.serving,
        ));
        Ok(next)
    }

    /// Rotate one side by hand. Produces no log entry.
    pub fn apply_manual_rotation(&self, side: TeamSide) -> MatchState {
        let mut next = self.clone();
        let rotated = next.lineup(side).rotate();
        *next.lineup_mut(side) = rotated;
        next
    }

    /// Replace one side's lineup (setup or between-set re-entry).
    pub fn apply_lineup(&self, side: TeamSide, lineup: Lineup) -> Result<MatchState> {
        lineup.validate_unique()?;
        let mut next = self.clone();
        *next.lineup_mut(side) = lineup;
        Ok(next)
    }

    /// End the current set. The higher score takes the set win; a tied score
    /// awards neither side. Scores reset to 0:0, the set counter advances,
    /// and the log carries over with its per-entry set tags intact.
    pub fn apply_set_end(&self) -> MatchState {
        let mut next = self.clone();
        match next.score_us.cmp(&next.score_opponent) {
            std::cmp::Ordering::Greater => next.sets_won_us += 1,
            std::cmp::Ordering::Less => next.sets_won_opponent += 1,
            std::cmp::Ordering::Equal => {
                log::warn!(
                    "set {} ended tied at {}:{}, no set awarded",
                    next.set_number,
                    next.score_us,
                    next.score_opponent
                );
            }
        }
        next.set_number = next.set_number.saturating_add(1);
        next.score_us = 0;
        next.score_opponent = 0;
        next
    }
}
