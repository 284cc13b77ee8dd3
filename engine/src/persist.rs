//! Persistence of the character aggregate to device-local storage.
//!
//! The aggregate is serialized as a single JSON blob `{ character, version }`
//! under a fixed key. Load failures never surface to callers: malformed or
//! missing data leaves the current in-memory state untouched.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::character::Character;
use crate::patch::CharacterPatch;

/// Storage key, matching the web app this sheet format comes from.
pub const STORAGE_KEY: &str = "dnd-character-storage";

/// Schema version tag written alongside the character. No migrations exist;
/// the tag is recorded for forward compatibility only.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage read failed: {0}")]
    Read(#[source] io::Error),
    #[error("storage write failed: {0}")]
    Write(#[source] io::Error),
    #[error("persisted character is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A string-keyed blob store, the localStorage analog.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: each key becomes `<root>/<key>.json`.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistError::Read(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.root).map_err(PersistError::Write)?;
        fs::write(self.path_for(key), value).map_err(PersistError::Write)
    }
}

#[derive(Serialize)]
struct PersistedBlob<'a> {
    character: &'a Character,
    version: u32,
}

#[derive(Deserialize)]
struct LoadedBlob {
    #[serde(default)]
    character: Option<CharacterPatch>,
    #[serde(default)]
    version: Option<u32>,
}

/// Owns a backend and mirrors the aggregate to it under [`STORAGE_KEY`].
pub struct Persister {
    backend: Box<dyn StorageBackend>,
    key: String,
}

impl Persister {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            key: STORAGE_KEY.to_string(),
        }
    }

    pub fn with_key(backend: Box<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn save(&mut self, character: &Character) -> Result<(), PersistError> {
        let blob = serde_json::to_string(&PersistedBlob {
            character,
            version: SCHEMA_VERSION,
        })?;
        self.backend.set(&self.key, &blob)
    }

    /// Parse the persisted blob, if any. Shape-checking happens here, at the
    /// boundary; the in-memory store never re-validates.
    pub fn load(&self) -> Result<Option<CharacterPatch>, PersistError> {
        let Some(text) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        let blob: LoadedBlob = serde_json::from_str(&text)?;
        if let Some(version) = blob.version {
            if version != SCHEMA_VERSION {
                debug!(version, "persisted character carries a foreign schema version");
            }
        }
        Ok(blob.character)
    }
}

/// Merge a persisted character over the current one, persisted fields winning.
///
/// Exception: when both sides carry an id and they differ, the persisted
/// record belongs to some other character and is discarded wholesale.
/// Returns whether the merge was applied.
pub fn reconcile(current: &mut Character, persisted: CharacterPatch) -> bool {
    if let (Some(stored), Some(live)) = (&persisted.id, &current.id) {
        if stored != live {
            warn!(%stored, %live, "persisted character id mismatch; keeping current state");
            return false;
        }
    }
    persisted.apply(current);
    true
}
