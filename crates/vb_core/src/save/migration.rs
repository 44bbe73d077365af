use super::error::SaveError;
use super::format::SavedGame;
use super::SAVE_VERSION;

/// Migrate save data from older versions to the current version.
pub fn migrate_save(mut save: SavedGame) -> Result<SavedGame, SaveError> {
    let original_version = save.version;

    save = match save.version {
        SAVE_VERSION => save, // Current version, no migration needed
        v if v > SAVE_VERSION => {
            // Future version - might be compatible
            log::warn!("Loading save from future version {} (current: {})", v, SAVE_VERSION);
            save
        }
        _ => {
            return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
        }
    };

    save.version = SAVE_VERSION;

    if original_version != SAVE_VERSION {
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}
