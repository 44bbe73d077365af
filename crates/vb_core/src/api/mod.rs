pub mod json_api;

pub use json_api::{
    match_setup_from_json, state_to_json, stats_to_json, MatchSetupRequest, StateResponse,
    StatsResponse,
};
