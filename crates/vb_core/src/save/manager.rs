use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, SavedGame};
use super::migration::migrate_save;

const SAVE_EXTENSION: &str = "vbs";

/// File-backed implementation of the persistence contract: named saves in
/// one directory, save/list/delete/load. The in-memory match state is never
/// touched by a failed save or load.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write a saved game under its name. Atomic: the file either appears
    /// complete or not at all.
    pub fn save_game(&self, save: &SavedGame) -> Result<PathBuf, SaveError> {
        if save.name.trim().is_empty() {
            return Err(SaveError::EmptyName);
        }

        let path = self.path_for(&save.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }
        rename(&temp_path, &path)?;

        log::info!("saved game '{}' ({} bytes)", save.name, data.len());
        Ok(path)
    }

    /// Load a saved game by name, applying migrations if needed.
    pub fn load_game(&self, name: &str) -> Result<SavedGame, SaveError> {
        let path = self.path_for(name);
        let save = Self::load_from_path(&path)?;
        log::info!("loaded game '{}'", name);
        Ok(save)
    }

    pub fn delete_game(&self, name: &str) -> Result<(), SaveError> {
        let path = self.path_for(name);
        if path.exists() {
            remove_file(&path)?;
            log::info!("deleted save '{}'", name);
        }
        Ok(())
    }

    pub fn game_exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Summaries of every readable save in the directory, most recent first.
    /// Unreadable files are skipped with a warning rather than failing the
    /// whole listing.
    pub fn list_games(&self) -> Vec<SaveSlotInfo> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut slots = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(save) => slots.push(SaveSlotInfo::from_save(&save)),
                Err(err) => {
                    log::warn!("skipping unreadable save {:?}: {}", path, err);
                }
            }
        }

        slots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)); // Most recent first
        slots
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", file_stem_for(name), SAVE_EXTENSION))
    }

    fn load_from_path(path: &Path) -> Result<SavedGame, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let mut save = decompress_and_deserialize(&data)?;

        // Apply migrations if needed
        save = migrate_save(save)?;

        log::debug!("loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}

/// Keep save file names filesystem-safe without losing the display name,
/// which lives inside the payload.
fn file_stem_for(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Listing metadata for a load screen.
#[derive(Debug, Clone)]
pub struct SaveSlotInfo {
    pub name: String,
    pub timestamp: u64,
    pub version: u32,
    pub match_name: String,
    pub set_number: u8,
    pub sets_won_us: u8,
    pub sets_won_opponent: u8,
    pub log_entries: usize,
}

impl SaveSlotInfo {
    fn from_save(save: &SavedGame) -> Self {
        Self {
            name: save.name.clone(),
            timestamp: save.timestamp,
            version: save.version,
            match_name: save.config.match_name.clone(),
            set_number: save.state.set_number,
            sets_won_us: save.state.sets_won_us,
            sets_won_opponent: save.state.sets_won_opponent,
            log_entries: save.state.log.len(),
        }
    }

    pub fn format_timestamp(&self) -> String {
        use time::{format_description::well_known::Rfc3339, OffsetDateTime};

        let timestamp =
            OffsetDateTime::from_unix_timestamp_nanos((self.timestamp as i128) * 1_000_000)
                .unwrap_or_else(|_| OffsetDateTime::now_utc());

        timestamp.format(&Rfc3339).unwrap_or_else(|_| "Unknown".to_string())
    }

    pub fn get_display_text(&self) -> String {
        format!(
            "{}: set {} ({}:{} sets, {} entries)",
            self.name, self.set_number, self.sets_won_us, self.sets_won_opponent, self.log_entries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn named_save(name: &str) -> SavedGame {
        SavedGame { name: name.to_string(), ..SavedGame::new() }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());

        let mut save = named_save("league-night");
        save.state.score_us = 21;

        manager.save_game(&save).unwrap();
        let loaded = manager.load_game("league-night").unwrap();

        assert_eq!(loaded, save);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());

        let path = manager.save_game(&named_save("atomic")).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_empty_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());

        let save = named_save("   ");
        assert!(matches!(manager.save_game(&save), Err(SaveError::EmptyName)));
    }

    #[test]
    fn test_load_missing_game_fails() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());
        assert!(matches!(manager.load_game("nope"), Err(SaveError::FileNotFound { .. })));
    }

    #[test]
    fn test_save_under_same_name_supersedes() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());

        let mut save = named_save("rematch");
        save.state.score_us = 5;
        manager.save_game(&save).unwrap();

        save.state.score_us = 19;
        manager.save_game(&save).unwrap();

        assert_eq!(manager.load_game("rematch").unwrap().state.score_us, 19);
        assert_eq!(manager.list_games().len(), 1);
    }

    #[test]
    fn test_list_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());

        manager.save_game(&named_save("first")).unwrap();
        manager.save_game(&named_save("second")).unwrap();

        let listed = manager.list_games();
        assert_eq!(listed.len(), 2);

        manager.delete_game("first").unwrap();
        assert!(!manager.game_exists("first"));
        assert_eq!(manager.list_games().len(), 1);

        // Deleting a missing save is not an error.
        manager.delete_game("first").unwrap();
    }

    #[test]
    fn test_corrupt_file_is_skipped_by_listing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());

        manager.save_game(&named_save("good")).unwrap();
        std::fs::write(temp_dir.path().join("bad.vbs"), b"not a save file").unwrap();

        let listed = manager.list_games();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "good");
    }

    #[test]
    fn test_display_name_survives_filename_sanitizing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SaveManager::new(temp_dir.path());

        manager.save_game(&named_save("cup final #3")).unwrap();
        let loaded = manager.load_game("cup final #3").unwrap();
        assert_eq!(loaded.name, "cup final #3");
    }
}
