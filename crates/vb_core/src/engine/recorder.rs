//! Rally selection flow.
//!
//! The UI feeds discrete selection events (player, action, quality, drag,
//! result) in a fixed order. The recorder holds the current step together
//! with everything picked so far as one tagged value, so a result cannot
//! exist without an action and an action cannot exist without a player.
//! Out-of-order events are rejected without touching the pending selection.

use crate::error::{MatchError, Result};
use crate::models::{ActionQuality, ActionResult, ActionType, CourtPoint, Position, TeamSide};

/// Player selection captured at the start of a rally flow. The start
/// coordinate is the player's on-court location at selection time, not a
/// separately drawn point.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPick {
    pub side: TeamSide,
    pub position: Position,
    pub start: Option<CourtPoint>,
}

/// Current step of the rally selection flow, carrying the accumulated
/// selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecorderStep {
    #[default]
    SelectPlayer,
    SelectAction {
        pick: PlayerPick,
    },
    SelectQuality {
        pick: PlayerPick,
        action: ActionType,
    },
    RecordLocation {
        pick: PlayerPick,
        action: ActionType,
        quality: ActionQuality,
    },
    SelectResult {
        pick: PlayerPick,
        action: ActionType,
        quality: ActionQuality,
        end: Option<CourtPoint>,
    },
    EnterSubstitution {
        pick: PlayerPick,
    },
}

impl RecorderStep {
    pub fn name(&self) -> &'static str {
        match self {
            RecorderStep::SelectPlayer => "select_player",
            RecorderStep::SelectAction { .. } => "select_action",
            RecorderStep::SelectQuality { .. } => "select_quality",
            RecorderStep::RecordLocation { .. } => "record_location",
            RecorderStep::SelectResult { .. } => "select_result",
            RecorderStep::EnterSubstitution { .. } => "enter_substitution",
        }
    }
}

/// A completed rally selection, handed to the match state machine as one
/// atomic unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RallyCommit {
    pub side: TeamSide,
    pub position: Position,
    pub action: ActionType,
    pub quality: ActionQuality,
    pub result: ActionResult,
    pub start: Option<CourtPoint>,
    pub end: Option<CourtPoint>,
    pub note: Option<String>,
}

/// A completed substitution request. Lineup validity is checked by the match
/// state machine, which knows the active numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionCommit {
    pub side: TeamSide,
    pub position: Position,
    pub incoming: String,
}

#[derive(Debug, Default)]
pub struct RallyRecorder {
    step: RecorderStep,
}

impl RallyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &RecorderStep {
        &self.step
    }

    /// No selection in flight.
    pub fn is_idle(&self) -> bool {
        self.step == RecorderStep::SelectPlayer
    }

    fn out_of_order(&self, event: &'static str) -> MatchError {
        MatchError::SelectionOutOfOrder { event, step: self.step.name() }
    }

    pub fn select_player(
        &mut self,
        side: TeamSide,
        position: Position,
        start: Option<CourtPoint>,
    ) -> Result<()> {
        if !self.is_idle() {
            return Err(self.out_of_order("select_player"));
        }
        self.step = RecorderStep::SelectAction { pick: PlayerPick { side, position, start } };
        Ok(())
    }

    /// Substitution branches into its own entry step; every other action
    /// continues to the quality grade.
    pub fn select_action(&mut self, action: ActionType) -> Result<()> {
        match std::mem::take(&mut self.step) {
            RecorderStep::SelectAction { pick } => {
                self.step = if action == ActionType::Substitution {
                    RecorderStep::EnterSubstitution { pick }
                } else {
                    RecorderStep::SelectQuality { pick, action }
                };
                Ok(())
            }
            other => {
                self.step = other;
                Err(self.out_of_order("select_action"))
            }
        }
    }

    pub fn select_quality(&mut self, quality: ActionQuality) -> Result<()> {
        match std::mem::take(&mut self.step) {
            RecorderStep::SelectQuality { pick, action } => {
                self.step = RecorderStep::RecordLocation { pick, action, quality };
                Ok(())
            }
            other => {
                self.step = other;
                Err(self.out_of_order("select_quality"))
            }
        }
    }

    /// End-of-drag coordinate from the court surface.
    pub fn record_drag(&mut self, end: CourtPoint) -> Result<()> {
        match std::mem::take(&mut self.step) {
            RecorderStep::RecordLocation { pick, action, quality } => {
                self.step = RecorderStep::SelectResult { pick, action, quality, end: Some(end) };
                Ok(())
            }
            other => {
                self.step = other;
                Err(self.out_of_order("record_drag"))
            }
        }
    }

    /// Move on without an end coordinate.
    pub fn skip_location(&mut self) -> Result<()> {
        match std::mem::take(&mut self.step) {
            RecorderStep::RecordLocation { pick, action, quality } => {
                self.step = RecorderStep::SelectResult { pick, action, quality, end: None };
                Ok(())
            }
            other => {
                self.step = other;
                Err(self.out_of_order("skip_location"))
            }
        }
    }

    /// Resolve the pending selection. Accepted from the location step too,
    /// which is the "skip the drag" path. Resets to `SelectPlayer`.
    pub fn select_result(
        &mut self,
        result: ActionResult,
        note: Option<String>,
    ) -> Result<RallyCommit> {
        match std::mem::take(&mut self.step) {
            RecorderStep::SelectResult { pick, action, quality, end } => Ok(RallyCommit {
                side: pick.side,
                position: pick.position,
                action,
                quality,
                result,
                start: pick.start,
                end,
                note,
            }),
            RecorderStep::RecordLocation { pick, action, quality } => Ok(RallyCommit {
                side: pick.side,
                position: pick.position,
                action,
                quality,
                result,
                start: pick.start,
                end: None,
                note,
            }),
            other => {
                self.step = other;
                Err(self.out_of_order("select_result"))
            }
        }
    }

    /// Build a substitution commit from the entry step. Does not reset: the
    /// sub-flow stays open until the state machine accepts the number, so a
    /// rejected number can be corrected in place.
    pub fn substitution_request(&self, incoming: &str) -> Result<SubstitutionCommit> {
        match &self.step {
            RecorderStep::EnterSubstitution { pick } => {
                if incoming.trim().is_empty() {
                    return Err(MatchError::EmptyJerseyNumber);
                }
                Ok(SubstitutionCommit {
                    side: pick.side,
                    position: pick.position,
                    incoming: incoming.trim().to_string(),
                })
            }
            _ => Err(self.out_of_order("substitution")),
        }
    }

    /// Called by the engine once a substitution commit has been applied.
    pub fn finish_substitution(&mut self) {
        self.step = RecorderStep::SelectPlayer;
    }

    /// Discard all selections and return to `SelectPlayer`. No-op when idle.
    pub fn cancel(&mut self) {
        self.step = RecorderStep::SelectPlayer;
    }
}
