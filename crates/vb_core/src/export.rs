//! Scoresheet export.
//!
//! One-way, human-readable projection of the match log into a delimited
//! table, one row per log entry. Not used for reload; the save format in
//! [`crate::save`] is the lossless representation.

use crate::models::{LogEntry, TeamConfig};

/// Column order of the exported table.
pub const SCORESHEET_COLUMNS: [&str; 15] = [
    "time",
    "set",
    "score_us",
    "score_opponent",
    "serving_team",
    "team",
    "position",
    "number",
    "action",
    "quality",
    "result",
    "start_x",
    "start_y",
    "end_x",
    "end_y",
];

/// One row per entry, in [`SCORESHEET_COLUMNS`] order. Display names are
/// joined in here; the log itself only carries stable side identifiers.
pub fn scoresheet_rows(log: &[LogEntry], config: &TeamConfig) -> Vec<Vec<String>> {
    log.iter().map(|entry| scoresheet_row(entry, config)).collect()
}

fn scoresheet_row(entry: &LogEntry, config: &TeamConfig) -> Vec<String> {
    vec![
        format_time(entry.timestamp_ms),
        entry.set_number.to_string(),
        entry.score_us.to_string(),
        entry.score_opponent.to_string(),
        config.team_name(entry.serving).to_string(),
        config.team_name(entry.side).to_string(),
        entry.position.number().to_string(),
        entry.player_number.clone(),
        entry.action.label().to_string(),
        entry.quality.symbol().to_string(),
        entry.result.label().to_string(),
        format_coordinate(entry.start.map(|p| p.x)),
        format_coordinate(entry.start.map(|p| p.y)),
        format_coordinate(entry.end.map(|p| p.x)),
        format_coordinate(entry.end.map(|p| p.y)),
    ]
}

/// The whole table, header included, as one delimited string.
pub fn to_delimited(log: &[LogEntry], config: &TeamConfig, delimiter: char) -> String {
    let mut out = String::new();
    out.push_str(&SCORESHEET_COLUMNS.join(&delimiter.to_string()));
    out.push('\n');
    for row in scoresheet_rows(log, config) {
        out.push_str(&row.join(&delimiter.to_string()));
        out.push('\n');
    }
    out
}

fn format_time(timestamp_ms: u64) -> String {
    use time::{format_description::well_known::Rfc3339, OffsetDateTime};

    OffsetDateTime::from_unix_timestamp_nanos((timestamp_ms as i128) * 1_000_000)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_coordinate(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => String::new(),
    }
}
