use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::court::CourtPoint;
use super::lineup::Position;
use super::team::TeamSide;

/// Closed set of rally actions. Substitution carries no statistical weight
/// and never affects the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Serve,
    Attack,
    Block,
    Dig,
    Set,
    Receive,
    Substitution,
}

impl ActionType {
    /// Short label used on the scoresheet export.
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Serve => "serve",
            ActionType::Attack => "attack",
            ActionType::Block => "block",
            ActionType::Dig => "dig",
            ActionType::Set => "set",
            ActionType::Receive => "receive",
            ActionType::Substitution => "sub",
        }
    }
}

/// Subjective execution grade. Does not affect score; carried for notes and
/// export context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ActionQuality {
    Perfect,
    Good,
    Normal,
    Poor,
}

impl ActionQuality {
    /// Grading symbol used on the scoresheet export.
    pub fn symbol(&self) -> &'static str {
        match self {
            ActionQuality::Perfect => "◎",
            ActionQuality::Good => "○",
            ActionQuality::Normal => "△",
            ActionQuality::Poor => "×",
        }
    }
}

/// How the rally resolved for the acting player. Point awards the acting
/// team, Error awards the opposing team, Normal leaves the score alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ActionResult {
    Point,
    Error,
    Normal,
}

impl ActionResult {
    pub fn label(&self) -> &'static str {
        match self {
            ActionResult::Point => "point",
            ActionResult::Error => "error",
            ActionResult::Normal => "-",
        }
    }
}

/// Immutable record of one rally event, appended to the match log.
///
/// Scores are the post-event values; `serving` is the side serving *after*
/// this event (it already reflects any side-out decision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    /// Unix milliseconds at commit time.
    pub timestamp_ms: u64,
    pub set_number: u8,
    pub score_us: u8,
    pub score_opponent: u8,
    /// Acting side. Stable identifier, never a display name.
    pub side: TeamSide,
    pub player_number: String,
    pub position: Position,
    pub action: ActionType,
    pub quality: ActionQuality,
    pub result: ActionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<CourtPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<CourtPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub serving: TeamSide,
}

impl LogEntry {
    /// Record a committed rally action.
    pub fn rally(
        timestamp_ms: u64,
        set_number: u8,
        score_us: u8,
        score_opponent: u8,
        side: TeamSide,
        player_number: String,
        position: Position,
        action: ActionType,
        quality: ActionQuality,
        result: ActionResult,
        serving: TeamSide,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp_ms,
            set_number,
            score_us,
            score_opponent,
            side,
            player_number,
            position,
            action,
            quality,
            result,
            start: None,
            end: None,
            note: None,
            serving,
        }
    }

    /// Record a substitution. Score and serve are untouched by definition, so
    /// the entry always carries `Normal` result semantics.
    pub fn substitution(
        timestamp_ms: u64,
        set_number: u8,
        score_us: u8,
        score_opponent: u8,
        side: TeamSide,
        position: Position,
        outgoing: &str,
        incoming: &str,
        serving: TeamSide,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp_ms,
            set_number,
            score_us,
            score_opponent,
            side,
            player_number: incoming.to_string(),
            position,
            action: ActionType::Substitution,
            quality: ActionQuality::Normal,
            result: ActionResult::Normal,
            start: None,
            end: None,
            note: Some(format!("{} -> {}", outgoing, incoming)),
            serving,
        }
    }

    pub fn with_start(mut self, start: Option<CourtPoint>) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Option<CourtPoint>) -> Self {
        self.end = end;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The side awarded a point by this entry, if any.
    pub fn scored_by(&self) -> Option<TeamSide> {
        match self.result {
            ActionResult::Point => Some(self.side),
            ActionResult::Error => Some(self.side.other()),
            ActionResult::Normal => None,
        }
    }
}
