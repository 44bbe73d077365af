use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use super::error::SaveError;
use super::SAVE_VERSION;
use crate::engine::MatchState;
use crate::models::TeamConfig;

/// Hard cap on persisted log length. A match is a few hundred entries; far
/// beyond that the payload is treated as garbage.
const MAX_LOG_ENTRIES: usize = 100_000;

/// The unit of persistence: one recorded match session.
///
/// Immutable once written; saving again under the same name supersedes the
/// previous file, it is never merged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedGame {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    /// Display name chosen at save time
    pub name: String,

    /// Match name and team display names
    pub config: TeamConfig,

    /// Full match state including the action log
    pub state: MatchState,
}

impl Default for SavedGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SavedGame {
    pub fn new() -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            name: String::new(),
            config: TeamConfig::default(),
            state: MatchState::new(),
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.state.log.len() > MAX_LOG_ENTRIES {
            return Err(SaveError::DataTooLarge { size: self.state.log.len() });
        }

        // A lineup with duplicate non-empty numbers cannot come from the
        // engine; treat it as corruption rather than a validation error.
        if self.state.lineup_us.validate_unique().is_err()
            || self.state.lineup_opponent.validate_unique().is_err()
        {
            return Err(SaveError::Corrupted);
        }

        Ok(())
    }
}

/// Serialize and compress a saved game
pub fn serialize_and_compress(save: &SavedGame) -> Result<Vec<u8>, SaveError> {
    // Validate before serialization
    save.validate()?;

    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(save).map_err(SaveError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a saved game
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<SavedGame, SaveError> {
    // Check minimum size (header + checksum)
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    // Split payload and checksum
    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    // Verify checksum
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    // Decompress
    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    // Deserialize
    let save: SavedGame = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}
