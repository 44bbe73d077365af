//! JSON facade for UI layers.
//!
//! The render collaborator talks to the engine through typed methods; these
//! helpers cover the coarse-grained exchanges where a UI shell prefers plain
//! JSON strings: match setup, a full state snapshot for rendering, and the
//! statistics panel.

use serde::{Deserialize, Serialize};

use crate::engine::{stats, MatchEngine};
use crate::models::{Lineup, TeamConfig, TeamSide};
use crate::SCHEMA_VERSION;

pub mod error_codes {
    pub const INVALID_SCHEMA: &str = "E_SCHEMA";
    pub const INVALID_REQUEST: &str = "E_REQUEST";
    pub const INVALID_LINEUP: &str = "E_LINEUP";
    pub const SERIALIZE_FAILED: &str = "E_SERIALIZE";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Deserialize)]
pub struct MatchSetupRequest {
    pub schema_version: u8,
    pub match_name: String,
    pub our_team: TeamEntry,
    pub opponent_team: TeamEntry,
    #[serde(default)]
    pub serving: Option<TeamSide>,
}

#[derive(Debug, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub lineup: [String; 6],
}

/// Build a ready-to-play engine from a setup request.
pub fn match_setup_from_json(json: &str) -> Result<MatchEngine, String> {
    let request: MatchSetupRequest =
        serde_json::from_str(json).map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(err_code(
            error_codes::INVALID_SCHEMA,
            format!("expected {}, got {}", SCHEMA_VERSION, request.schema_version),
        ));
    }

    let config =
        TeamConfig::new(request.match_name, request.our_team.name, request.opponent_team.name)
            .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;

    let engine = MatchEngine::with_lineups(
        config,
        Lineup::from(request.our_team.lineup),
        Lineup::from(request.opponent_team.lineup),
    )
    .map_err(|e| err_code(error_codes::INVALID_LINEUP, e))?;

    Ok(match request.serving {
        Some(side) => engine.with_serving(side),
        None => engine,
    })
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub schema_version: u8,
    pub match_name: String,
    pub set_number: u8,
    pub sets_won_us: u8,
    pub sets_won_opponent: u8,
    pub score_us: u8,
    pub score_opponent: u8,
    pub serving: TeamSide,
    pub our_team: TeamStateEntry,
    pub opponent_team: TeamStateEntry,
    /// Current recorder step, for the UI to highlight the pending selection.
    pub recorder_step: String,
    pub log_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct TeamStateEntry {
    pub name: String,
    pub lineup: [String; 6],
}

/// Full render snapshot of the current session.
pub fn state_to_json(engine: &MatchEngine) -> Result<String, String> {
    let state = engine.state();
    let config = engine.config();

    let response = StateResponse {
        schema_version: SCHEMA_VERSION,
        match_name: config.match_name.clone(),
        set_number: state.set_number,
        sets_won_us: state.sets_won_us,
        sets_won_opponent: state.sets_won_opponent,
        score_us: state.score_us,
        score_opponent: state.score_opponent,
        serving: state.serving,
        our_team: TeamStateEntry {
            name: config.our_name.clone(),
            lineup: state.lineup_us.numbers().clone(),
        },
        opponent_team: TeamStateEntry {
            name: config.opponent_name.clone(),
            lineup: state.lineup_opponent.numbers().clone(),
        },
        recorder_step: engine.recorder_step().name().to_string(),
        log_entries: state.log.len(),
    };

    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZE_FAILED, e))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub schema_version: u8,
    pub side: TeamSide,
    pub team_name: String,
    pub players: Vec<PlayerStatsEntry>,
    /// Top scorers, present only when they have actually scored.
    pub top_scorer: Option<String>,
    pub second_scorer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerStatsEntry {
    pub number: String,
    #[serde(flatten)]
    pub line: stats::StatLine,
    pub attack_rate: f32,
    pub total_points: u32,
}

/// Statistics panel for one side, ranked by total points.
pub fn stats_to_json(engine: &MatchEngine, side: TeamSide) -> Result<String, String> {
    let log = engine.log();
    let per_player = stats::side_player_stats(log, side);

    let mut players: Vec<PlayerStatsEntry> = per_player
        .into_iter()
        .map(|(number, line)| PlayerStatsEntry {
            number,
            attack_rate: line.attack_rate(),
            total_points: line.total_points(),
            line,
        })
        .collect();
    players.sort_by(|a, b| b.total_points.cmp(&a.total_points).then_with(|| a.number.cmp(&b.number)));

    let (top_scorer, second_scorer) = stats::top_scorers(log, side);

    let response = StatsResponse {
        schema_version: SCHEMA_VERSION,
        side,
        team_name: engine.config().team_name(side).to_string(),
        players,
        top_scorer,
        second_scorer,
    };

    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZE_FAILED, e))
}
