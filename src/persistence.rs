//! Keyed blob persistence.
//!
//! The engines read and write named JSON blobs through the [`Store`]
//! trait; the binary uses [`FileStore`], which keeps every blob in one
//! checksummed file, and tests use [`MemStore`]. A blob that is missing
//! or fails to parse always degrades to the caller's default value, so
//! corruption is contained here and never propagates.

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::constants::SAVE_VERSION_MAGIC;

/// Blob keys used by the game.
pub mod keys {
    pub const STATS: &str = "stats";
    pub const LEADERBOARD: &str = "leaderboard";
    pub const COUNTERS: &str = "counters";
    pub const QUEST_CLAIMS: &str = "quest_claims";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const IDENTITY: &str = "identity";
    pub const WALLET: &str = "wallet";
}

/// A keyed JSON blob store.
pub trait Store {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
}

/// Read a typed blob, substituting `default` when the key is absent or
/// the stored value does not parse.
pub fn load_or<T: DeserializeOwned>(store: &dyn Store, key: &str, default: T) -> T {
    match store.get(key) {
        Some(value) => serde_json::from_value(value).unwrap_or(default),
        None => default,
    }
}

/// Serialize and write a typed blob. Values of our own types always
/// serialize; a failure would be a bug, so it degrades to writing null
/// rather than panicking.
pub fn save<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) {
    let value = serde_json::to_value(value).unwrap_or(Value::Null);
    store.set(key, value);
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemStore {
    blobs: HashMap<String, Value>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.blobs.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.blobs.insert(key.to_string(), value);
    }
}

/// On-disk store: every blob lives in one save file written as
/// version magic (8 bytes), payload length (4 bytes), bincode-encoded
/// map of key to JSON text, and a SHA-256 checksum (32 bytes).
pub struct FileStore {
    save_path: PathBuf,
    blobs: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at the platform config directory, loading whatever
    /// save already exists. A missing or corrupt file starts empty.
    pub fn open() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "reflex").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine config directory")
        })?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self::at_path(config_dir.join("save.dat")))
    }

    /// Open a store at an explicit path (used by tests).
    pub fn at_path(save_path: PathBuf) -> Self {
        let blobs = Self::read_file(&save_path).unwrap_or_default();
        Self { save_path, blobs }
    }

    fn read_file(path: &PathBuf) -> Option<HashMap<String, String>> {
        let mut file = fs::File::open(path).ok()?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes).ok()?;
        if u64::from_le_bytes(version_bytes) != SAVE_VERSION_MAGIC {
            return None;
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes).ok()?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data).ok()?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum).ok()?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return None;
        }

        bincode::deserialize(&data).ok()
    }

    fn write_file(&self) -> io::Result<()> {
        let data = bincode::serialize(&self.blobs)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let text = self.blobs.get(key)?;
        serde_json::from_str(text).ok()
    }

    /// Writes go to disk immediately so a crash right after a state
    /// transition loses at most the in-flight write. A failed disk write
    /// keeps the in-memory value; it will be retried on the next set.
    fn set(&mut self, key: &str, value: Value) {
        self.blobs.insert(key.to_string(), value.to_string());
        let _ = self.write_file();
    }
}
