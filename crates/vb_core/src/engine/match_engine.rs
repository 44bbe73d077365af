//! Session controller.
//!
//! Wires the rally recorder, the authoritative match state, and the
//! undo/redo history together. All mutation is routed through here: every
//! accepted transition snapshots the pre-transition state, and every
//! rejected one leaves both the state and the pending selection untouched.

use crate::error::{MatchError, Result};
use crate::models::{
    ActionQuality, ActionResult, ActionType, CourtPoint, Lineup, LogEntry, Position, TeamConfig,
    TeamSide,
};
use crate::save::format::{current_timestamp, SavedGame};
use crate::save::SAVE_VERSION;

use super::history::HistoryManager;
use super::match_state::MatchState;
use super::recorder::{RallyRecorder, RecorderStep};

#[derive(Debug)]
pub struct MatchEngine {
    config: TeamConfig,
    state: MatchState,
    recorder: RallyRecorder,
    history: HistoryManager,
}

impl MatchEngine {
    pub fn new(config: TeamConfig) -> Self {
        Self {
            config,
            state: MatchState::new(),
            recorder: RallyRecorder::new(),
            history: HistoryManager::new(),
        }
    }

    /// Start a match with both lineups already entered.
    pub fn with_lineups(config: TeamConfig, us: Lineup, opponent: Lineup) -> Result<Self> {
        us.validate_unique()?;
        opponent.validate_unique()?;
        let mut engine = Self::new(config);
        engine.state.lineup_us = us;
        engine.state.lineup_opponent = opponent;
        Ok(engine)
    }

    /// Choose the side serving first. Setup-time builder, not a transition.
    pub fn with_serving(mut self, side: TeamSide) -> Self {
        self.state.serving = side;
        self
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn recorder_step(&self) -> &RecorderStep {
        self.recorder.step()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.state.log
    }

    // ========================
    // Selection events
    // ========================

    pub fn select_player(
        &mut self,
        side: TeamSide,
        position: Position,
        start: Option<CourtPoint>,
    ) -> Result<()> {
        self.recorder.select_player(side, position, start)
    }

    pub fn select_action(&mut self, action: ActionType) -> Result<()> {
        self.recorder.select_action(action)
    }

    pub fn select_quality(&mut self, quality: ActionQuality) -> Result<()> {
        self.recorder.select_quality(quality)
    }

    pub fn record_drag(&mut self, end: CourtPoint) -> Result<()> {
        self.recorder.record_drag(end)
    }

    pub fn skip_location(&mut self) -> Result<()> {
        self.recorder.skip_location()
    }

    pub fn cancel_selection(&mut self) {
        self.recorder.cancel();
    }

    /// Resolve the pending selection into a committed rally and apply it as
    /// one atomic transition.
    pub fn select_result(&mut self, result: ActionResult, note: Option<String>) -> Result<()> {
        let commit = self.recorder.select_result(result, note)?;
        let next = self.state.apply_rally(&commit, current_timestamp());
        self.push_history();
        self.state = next;
        Ok(())
    }

    /// Submit the replacement number for the open substitution flow. On a
    /// validation error the flow stays open for correction.
    pub fn submit_substitution(&mut self, incoming: &str) -> Result<()> {
        let commit = self.recorder.substitution_request(incoming)?;
        let next = self.state.apply_substitution(&commit, current_timestamp())?;
        self.push_history();
        self.state = next;
        self.recorder.finish_substitution();
        Ok(())
    }

    // ========================
    // Direct transitions
    // ========================

    /// Manual rotation trigger. Only allowed while no rally selection is in
    /// progress.
    pub fn rotate_lineup(&mut self, side: TeamSide) -> Result<()> {
        if !self.recorder.is_idle() {
            return Err(MatchError::RotationLocked);
        }
        self.push_history();
        self.state = self.state.apply_manual_rotation(side);
        Ok(())
    }

    /// Lineup (re-)entry for one side.
    pub fn set_lineup(&mut self, side: TeamSide, lineup: Lineup) -> Result<()> {
        let next = self.state.apply_lineup(side, lineup)?;
        self.push_history();
        self.state = next;
        Ok(())
    }

    /// End the current set and move to the next one. Any in-flight selection
    /// is discarded.
    pub fn end_set(&mut self) {
        self.push_history();
        self.recorder.cancel();
        self.state = self.state.apply_set_end();
        log::info!(
            "set ended, now in set {} ({}:{} sets)",
            self.state.set_number,
            self.state.sets_won_us,
            self.state.sets_won_opponent
        );
    }

    /// Reset everything, including the history, for a fresh match.
    pub fn new_match(&mut self, config: TeamConfig) {
        self.config = config;
        self.state = MatchState::new();
        self.recorder.cancel();
        self.history.clear();
        log::info!("new match started: {}", self.config.match_name);
    }

    // ========================
    // History
    // ========================

    /// Step back one transition. Returns false (and changes nothing) when
    /// there is nothing to undo. Discards any in-flight selection.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.state) {
            Some(previous) => {
                self.recorder.cancel();
                self.state = previous;
                true
            }
            None => {
                log::debug!("nothing to undo");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.state) {
            Some(next) => {
                self.recorder.cancel();
                self.state = next;
                true
            }
            None => {
                log::debug!("nothing to redo");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn push_history(&mut self) {
        self.history.record(self.state.clone());
    }

    // ========================
    // Persistence glue
    // ========================

    /// Snapshot the session into the persistence unit.
    pub fn to_saved_game(&self, name: impl Into<String>) -> SavedGame {
        SavedGame {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            name: name.into(),
            config: self.config.clone(),
            state: self.state.clone(),
        }
    }

    /// Resume a saved session. The recorder starts idle and the history
    /// starts empty: undo never crosses a save boundary.
    pub fn from_saved_game(save: SavedGame) -> Self {
        Self {
            config: save.config,
            state: save.state,
            recorder: RallyRecorder::new(),
            history: HistoryManager::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MatchEngine {
        MatchEngine::with_lineups(
            TeamConfig::new("League night", "Hawks", "Falcons").unwrap(),
            Lineup::from_numbers(["5", "7", "12", "3", "9", "11"]),
            Lineup::from_numbers(["1", "2", "4", "6", "8", "10"]),
        )
        .unwrap()
    }

    fn record_attack(engine: &mut MatchEngine, side: TeamSide, result: ActionResult) {
        engine.select_player(side, Position::P3, None).unwrap();
        engine.select_action(ActionType::Attack).unwrap();
        engine.select_quality(ActionQuality::Good).unwrap();
        engine.select_result(result, None).unwrap();
    }

    #[test]
    fn test_rally_commit_is_atomic() {
        let mut engine = engine();
        record_attack(&mut engine, TeamSide::Us, ActionResult::Point);

        assert_eq!(engine.state().score_us, 1);
        assert_eq!(engine.log().len(), 1);
        assert!(engine.recorder_step() == &RecorderStep::SelectPlayer);
        assert!(engine.can_undo());
    }

    #[test]
    fn test_manual_rotation_blocked_mid_selection() {
        let mut engine = engine();
        engine.select_player(TeamSide::Us, Position::P1, None).unwrap();

        assert!(matches!(engine.rotate_lineup(TeamSide::Us), Err(MatchError::RotationLocked)));

        engine.cancel_selection();
        assert!(engine.rotate_lineup(TeamSide::Us).is_ok());
        assert_eq!(engine.state().lineup_us.number_at(Position::P1), "7");
    }

    #[test]
    fn test_undo_restores_pre_transition_state() {
        let mut engine = engine();
        let before = engine.state().clone();

        record_attack(&mut engine, TeamSide::Opponent, ActionResult::Point);
        assert_eq!(engine.state().score_opponent, 1);
        assert_eq!(engine.state().serving, TeamSide::Opponent);

        assert!(engine.undo());
        assert_eq!(engine.state(), &before);

        assert!(engine.redo());
        assert_eq!(engine.state().score_opponent, 1);
        assert_eq!(engine.state().serving, TeamSide::Opponent);
    }

    #[test]
    fn test_undo_with_empty_history_is_a_no_op() {
        let mut engine = engine();
        let before = engine.state().clone();
        assert!(!engine.undo());
        assert!(!engine.redo());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_failed_substitution_keeps_flow_open_and_state_clean() {
        let mut engine = engine();
        engine.select_player(TeamSide::Us, Position::P2, None).unwrap();
        engine.select_action(ActionType::Substitution).unwrap();

        // "9" is already on court for us.
        let err = engine.submit_substitution("9").unwrap_err();
        assert!(matches!(err, MatchError::DuplicateJerseyNumber(_)));
        assert_eq!(engine.recorder_step().name(), "enter_substitution");
        assert!(engine.log().is_empty());
        assert!(!engine.can_undo());

        // Corrected number goes through and closes the flow.
        engine.submit_substitution("14").unwrap();
        assert_eq!(engine.state().lineup_us.number_at(Position::P2), "14");
        assert!(engine.recorder_step() == &RecorderStep::SelectPlayer);
    }

    #[test]
    fn test_new_match_clears_history_and_log() {
        let mut engine = engine();
        record_attack(&mut engine, TeamSide::Us, ActionResult::Point);

        engine.new_match(TeamConfig::default());
        assert_eq!(engine.state(), &MatchState::new());
        assert!(!engine.can_undo());
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_saved_game_round_trip_resumes_state() {
        let mut engine = engine();
        record_attack(&mut engine, TeamSide::Us, ActionResult::Point);

        let save = engine.to_saved_game("mid-set");
        let resumed = MatchEngine::from_saved_game(save);

        assert_eq!(resumed.state(), engine.state());
        assert_eq!(resumed.config(), engine.config());
        assert!(!resumed.can_undo());
    }

    #[test]
    fn test_end_set_discards_open_selection() {
        let mut engine = engine();
        record_attack(&mut engine, TeamSide::Us, ActionResult::Point);
        engine.select_player(TeamSide::Us, Position::P4, None).unwrap();

        engine.end_set();
        assert!(engine.recorder_step() == &RecorderStep::SelectPlayer);
        assert_eq!(engine.state().set_number, 2);
        assert_eq!(engine.state().sets_won_us, 1);
    }
}
