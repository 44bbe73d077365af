//! Scoresheet builder
//!
//! Saved game (.vbs) → CSV scoresheet conversion. The save format stays the
//! lossless representation; the CSV is a one-way projection for spreadsheets.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use vb_core::export::{scoresheet_rows, SCORESHEET_COLUMNS};
use vb_core::save::{decompress_and_deserialize, migrate_save, SavedGame};

/// Summary of one export run, optionally written alongside the CSV.
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    pub save_name: String,
    pub match_name: String,
    pub rows: usize,
    pub out_path: String,
}

/// Read and decode a save file, applying migrations.
pub fn load_saved_game(path: &Path) -> Result<SavedGame> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let save = decompress_and_deserialize(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    let save = migrate_save(save)?;
    Ok(save)
}

/// Export one saved game to a CSV scoresheet, one row per log entry.
pub fn export_scoresheet(
    save_path: &Path,
    out_path: &Path,
    delimiter: u8,
) -> Result<ExportMetadata> {
    let save = load_saved_game(save_path)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;

    writer.write_record(SCORESHEET_COLUMNS)?;
    let rows = scoresheet_rows(&save.state.log, &save.config);
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(ExportMetadata {
        save_name: save.name.clone(),
        match_name: save.config.match_name.clone(),
        rows: rows.len(),
        out_path: out_path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vb_core::{
        ActionQuality, ActionResult, ActionType, Lineup, MatchEngine, Position, SaveManager,
        TeamConfig, TeamSide,
    };

    fn saved_game_path(dir: &TempDir) -> std::path::PathBuf {
        let mut engine = MatchEngine::with_lineups(
            TeamConfig::new("League night", "Hawks", "Falcons").unwrap(),
            Lineup::from_numbers(["5", "7", "12", "3", "9", "11"]),
            Lineup::from_numbers(["1", "2", "4", "6", "8", "10"]),
        )
        .unwrap();

        engine.select_player(TeamSide::Us, Position::P3, None).unwrap();
        engine.select_action(ActionType::Attack).unwrap();
        engine.select_quality(ActionQuality::Good).unwrap();
        engine.select_result(ActionResult::Point, None).unwrap();

        let manager = SaveManager::new(dir.path());
        manager.save_game(&engine.to_saved_game("export-test")).unwrap()
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let save_path = saved_game_path(&dir);
        let out_path = dir.path().join("sheet.csv");

        let meta = export_scoresheet(&save_path, &out_path, b',').unwrap();
        assert_eq!(meta.rows, 1);
        assert_eq!(meta.match_name, "League night");

        let text = fs::read_to_string(&out_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("time,set,"));
        assert!(lines[1].contains("attack"));
    }

    #[test]
    fn test_export_missing_save_fails() {
        let dir = TempDir::new().unwrap();
        let out_path = dir.path().join("sheet.csv");
        assert!(export_scoresheet(&dir.path().join("missing.vbs"), &out_path, b',').is_err());
    }
}
