// Save/Load system for recorded matches
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SaveError;
pub use format::{
    current_timestamp, decompress_and_deserialize, serialize_and_compress, SavedGame,
};
pub use manager::{SaveManager, SaveSlotInfo};
pub use migration::migrate_save;

pub const SAVE_VERSION: u32 = 1;
