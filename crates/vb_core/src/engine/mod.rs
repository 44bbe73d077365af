pub mod history;
pub mod match_engine;
pub mod match_state;
pub mod recorder;
pub mod stats;

pub use history::{HistoryManager, MAX_DEPTH};
pub use match_engine::MatchEngine;
pub use match_state::MatchState;
pub use recorder::{PlayerPick, RallyCommit, RallyRecorder, RecorderStep, SubstitutionCommit};
pub use stats::{
    player_stats, scoring_ranking, side_player_stats, side_stats, top_scorers, StatLine,
};
