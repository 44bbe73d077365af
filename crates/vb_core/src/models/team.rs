use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Stable identifier for the two sides of the match.
///
/// Log entries and statistics are keyed by this, never by display name, so a
/// team rename mid-match cannot misattribute historical entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    /// The scorekeeper's own team.
    Us,
    /// The opposing team.
    Opponent,
}

impl TeamSide {
    pub fn other(self) -> TeamSide {
        match self {
            TeamSide::Us => TeamSide::Opponent,
            TeamSide::Opponent => TeamSide::Us,
        }
    }
}

/// Match name and the two team display names. Set once at setup, read-only
/// during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub match_name: String,
    pub our_name: String,
    pub opponent_name: String,
}

impl TeamConfig {
    pub fn new(
        match_name: impl Into<String>,
        our_name: impl Into<String>,
        opponent_name: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            match_name: match_name.into(),
            our_name: our_name.into(),
            opponent_name: opponent_name.into(),
        };
        if config.our_name.trim().is_empty() || config.opponent_name.trim().is_empty() {
            return Err(MatchError::ValidationError(
                "team display names must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Display name for a side.
    pub fn team_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Us => &self.our_name,
            TeamSide::Opponent => &self.opponent_name,
        }
    }
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            match_name: "Scrimmage".to_string(),
            our_name: "Home".to_string(),
            opponent_name: "Away".to_string(),
        }
    }
}
