//! Derived statistics over the match log.
//!
//! Pure, stateless re-derivation: every function takes the log as a slice
//! and can be re-run at any time. Entries are attributed by their stable
//! side identifier, never by display name.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ActionResult, ActionType, LogEntry, TeamSide};

/// Summary counters for one filtered slice of the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub attack_total: u32,
    pub attack_kills: u32,
    pub blocks: u32,
    pub serve_aces: u32,
    pub serve_errors: u32,
    pub digs: u32,
}

impl StatLine {
    /// Kill rate over all attack attempts; 0 when there were none.
    pub fn attack_rate(&self) -> f32 {
        if self.attack_total == 0 {
            0.0
        } else {
            self.attack_kills as f32 / self.attack_total as f32
        }
    }

    /// Directly scored points: kills + scoring blocks + aces. Sets, receives,
    /// digs and substitutions never count here.
    pub fn total_points(&self) -> u32 {
        self.attack_kills + self.blocks + self.serve_aces
    }

    fn absorb(&mut self, entry: &LogEntry) {
        match entry.action {
            ActionType::Attack => {
                self.attack_total += 1;
                if entry.result == ActionResult::Point {
                    self.attack_kills += 1;
                }
            }
            ActionType::Block => {
                if entry.result == ActionResult::Point {
                    self.blocks += 1;
                }
            }
            ActionType::Serve => match entry.result {
                ActionResult::Point => self.serve_aces += 1,
                ActionResult::Error => self.serve_errors += 1,
                ActionResult::Normal => {}
            },
            ActionType::Dig => self.digs += 1,
            ActionType::Set | ActionType::Receive | ActionType::Substitution => {}
        }
    }
}

fn side_entries<'a>(log: &'a [LogEntry], side: TeamSide) -> impl Iterator<Item = &'a LogEntry> {
    log.iter().filter(move |e| e.side == side && e.action != ActionType::Substitution)
}

/// Counters for one whole side.
pub fn side_stats(log: &[LogEntry], side: TeamSide) -> StatLine {
    let mut line = StatLine::default();
    for entry in side_entries(log, side) {
        line.absorb(entry);
    }
    line
}

/// Counters for one player on a side, matched by jersey number.
pub fn player_stats(log: &[LogEntry], side: TeamSide, number: &str) -> StatLine {
    let mut line = StatLine::default();
    for entry in side_entries(log, side).filter(|e| e.player_number == number) {
        line.absorb(entry);
    }
    line
}

/// Per-player counters for one side, keyed by jersey number.
pub fn side_player_stats(log: &[LogEntry], side: TeamSide) -> BTreeMap<String, StatLine> {
    let mut players: BTreeMap<String, StatLine> = BTreeMap::new();
    for entry in side_entries(log, side) {
        if entry.player_number.is_empty() {
            continue;
        }
        players.entry(entry.player_number.clone()).or_default().absorb(entry);
    }
    players
}

/// Players of a side ranked by total points, descending. Ties break on
/// jersey number for a deterministic order.
pub fn scoring_ranking(log: &[LogEntry], side: TeamSide) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = side_player_stats(log, side)
        .into_iter()
        .map(|(number, line)| (number, line.total_points()))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Top two scorers of a side. A slot is only filled when that player has
/// actually scored.
pub fn top_scorers(log: &[LogEntry], side: TeamSide) -> (Option<String>, Option<String>) {
    let ranked = scoring_ranking(log, side);
    let mut top = ranked.into_iter().filter(|(_, points)| *points > 0);
    (top.next().map(|(n, _)| n), top.next().map(|(n, _)| n))
}
