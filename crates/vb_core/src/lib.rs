//! # vb_core - Volleyball Match Scorekeeping Engine
//!
//! Single-device, single-referee scorekeeping: per-rally action capture,
//! score and serve-rotation bookkeeping, linear undo/redo, and derived
//! player/team statistics.
//!
//! ## Features
//! - Explicit rally selection state machine (invalid selections are unrepresentable)
//! - Side-out scoring with automatic lineup rotation
//! - Whole-state snapshot history (undo/redo)
//! - MessagePack+LZ4 save files with integrity checks
//! - JSON API for easy integration with UI layers

// Game engine APIs often require many parameters for events and state
#![allow(clippy::too_many_arguments)]
// Large enum variants - the recorder step carries its accumulated selections
#![allow(clippy::large_enum_variant)]

pub mod api;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod save;

// Re-export main API functions
pub use api::{match_setup_from_json, state_to_json, stats_to_json};
pub use error::{MatchError, Result};

// Re-export engine types
pub use engine::{
    HistoryManager, MatchEngine, MatchState, RallyRecorder, RecorderStep, StatLine,
};

// Re-export model types
pub use models::{
    ActionQuality, ActionResult, ActionType, CourtPoint, Lineup, LogEntry, Position, TeamConfig,
    TeamSide,
};

// Re-export save system
pub use save::{SaveError, SaveManager, SavedGame};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    fn test_engine() -> MatchEngine {
        MatchEngine::with_lineups(
            TeamConfig::new("League night", "Hawks", "Falcons").unwrap(),
            Lineup::from_numbers(["5", "7", "12", "3", "9", "11"]),
            Lineup::from_numbers(["1", "2", "4", "6", "8", "10"]),
        )
        .unwrap()
    }

    fn record(
        engine: &mut MatchEngine,
        side: TeamSide,
        position: Position,
        action: ActionType,
        result: ActionResult,
    ) {
        engine.select_player(side, position, None).unwrap();
        engine.select_action(action).unwrap();
        engine.select_quality(ActionQuality::Normal).unwrap();
        engine.select_result(result, None).unwrap();
    }

    #[test]
    fn test_point_while_serving_keeps_serve() {
        // Team A serving; player at position 3 attacks for a point:
        // score 0 -> 1, no rotation, no serve change.
        let mut engine = test_engine();
        let lineup_before = engine.state().lineup_us.clone();

        record(&mut engine, TeamSide::Us, Position::P3, ActionType::Attack, ActionResult::Point);

        let state = engine.state();
        assert_eq!(state.score_us, 1);
        assert_eq!(state.score_opponent, 0);
        assert_eq!(state.serving, TeamSide::Us);
        assert_eq!(state.lineup_us, lineup_before);
        assert_eq!(state.log.last().unwrap().player_number, "12");
    }

    #[test]
    fn test_receiving_team_point_triggers_side_out() {
        // Team B (not serving) blocks for a point: B scores, serve switches
        // to B, and B's lineup rotates exactly once.
        let mut engine = test_engine();
        let lineup_before = engine.state().lineup_opponent.clone();

        record(&mut engine, TeamSide::Opponent, Position::P2, ActionType::Block, ActionResult::Point);

        let state = engine.state();
        assert_eq!(state.score_opponent, 1);
        assert_eq!(state.serving, TeamSide::Opponent);
        assert_eq!(state.lineup_opponent, lineup_before.rotate());
        assert_eq!(state.lineup_us, test_engine().state().lineup_us);
        assert_eq!(state.log.last().unwrap().serving, TeamSide::Opponent);
    }

    #[test]
    fn test_duplicate_substitution_rejected_end_to_end() {
        // Replacing the player at position 2 with "9" while "9" is already
        // on court elsewhere: rejected, lineup unchanged, flow stays open.
        let mut engine = test_engine();
        engine.select_player(TeamSide::Us, Position::P2, None).unwrap();
        engine.select_action(ActionType::Substitution).unwrap();

        let err = engine.submit_substitution("9").unwrap_err();
        assert!(matches!(err, MatchError::DuplicateJerseyNumber(n) if n == "9"));
        assert_eq!(engine.state().lineup_us, test_engine().state().lineup_us);
        assert_eq!(engine.recorder_step().name(), "enter_substitution");
    }

    #[test]
    fn test_set_transition_keeps_log_across_sets() {
        let mut engine = test_engine();
        for _ in 0..25 {
            record(&mut engine, TeamSide::Us, Position::P3, ActionType::Attack, ActionResult::Point);
        }
        for _ in 0..20 {
            record(
                &mut engine,
                TeamSide::Opponent,
                Position::P4,
                ActionType::Attack,
                ActionResult::Point,
            );
        }
        assert_eq!(engine.state().score_us, 25);
        assert_eq!(engine.state().score_opponent, 20);

        engine.end_set();

        let state = engine.state();
        assert_eq!(state.sets_won_us, 1);
        assert_eq!(state.sets_won_opponent, 0);
        assert_eq!(state.set_number, 2);
        assert_eq!(state.score_us, 0);
        assert_eq!(state.score_opponent, 0);
        assert_eq!(state.log.len(), 45);
        assert!(state.log.iter().all(|e| e.set_number == 1));
    }

    #[test]
    fn test_undo_redo_round_trip_is_bit_identical() {
        let mut engine = test_engine();
        record(&mut engine, TeamSide::Us, Position::P1, ActionType::Serve, ActionResult::Point);
        record(&mut engine, TeamSide::Opponent, Position::P2, ActionType::Attack, ActionResult::Point);

        let after = engine.state().clone();
        assert!(engine.undo());
        assert_ne!(engine.state(), &after);
        assert!(engine.redo());
        assert_eq!(engine.state(), &after);
    }

    #[test]
    fn test_full_session_through_save_and_export() {
        let mut engine = test_engine();
        record(&mut engine, TeamSide::Us, Position::P1, ActionType::Serve, ActionResult::Point);
        record(&mut engine, TeamSide::Us, Position::P3, ActionType::Attack, ActionResult::Error);

        // Persist and resume.
        let dir = tempfile::TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path());
        manager.save_game(&engine.to_saved_game("set one")).unwrap();
        let resumed = MatchEngine::from_saved_game(manager.load_game("set one").unwrap());
        assert_eq!(resumed.state(), engine.state());

        // The scoresheet projects every entry.
        let sheet = export::to_delimited(resumed.log(), resumed.config(), ',');
        assert_eq!(sheet.lines().count(), 1 + 2);
        assert!(sheet.contains("Hawks"));
    }
}
