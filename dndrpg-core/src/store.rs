//! Character persistence.
//!
//! The store owns the durable copy; every read hands back a detached
//! character. Missing records are reported as absent results rather than
//! errors so callers can tell "missing" from "failed".

use crate::character::{Character, CharacterId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Durable character storage.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Persist a new character and return the stored copy.
    async fn create(&self, character: Character) -> Result<Character, StoreError>;

    /// Load a character by id; `None` if it does not exist.
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError>;

    /// Load every stored character.
    async fn get_all(&self) -> Result<Vec<Character>, StoreError>;

    /// Replace a stored character wholesale; `None` if the id is unknown.
    async fn update(&self, character: Character) -> Result<Option<Character>, StoreError>;

    /// Delete by id, reporting whether anything was removed.
    async fn delete(&self, id: CharacterId) -> Result<bool, StoreError>;
}

// ============================================================================
// In-memory store
// ============================================================================

/// Volatile store backed by a map, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: RwLock<HashMap<CharacterId, Character>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    async fn create(&self, character: Character) -> Result<Character, StoreError> {
        self.characters
            .write()
            .await
            .insert(character.id, character.clone());
        Ok(character)
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        Ok(self.characters.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Character>, StoreError> {
        let mut all: Vec<Character> = self.characters.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, character: Character) -> Result<Option<Character>, StoreError> {
        let mut characters = self.characters.write().await;
        if !characters.contains_key(&character.id) {
            return Ok(None);
        }
        characters.insert(character.id, character.clone());
        Ok(Some(character))
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, StoreError> {
        Ok(self.characters.write().await.remove(&id).is_some())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Current character save file version.
const SAVE_VERSION: u32 = 1;

/// On-disk envelope around a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedCharacter {
    version: u32,
    saved_at: String,
    character: Character,
}

impl SavedCharacter {
    fn new(character: Character) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: unix_now(),
            character,
        }
    }
}

/// Get the current unix timestamp as a string.
fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}

/// Store keeping one JSON document per character under a directory.
///
/// Updates rewrite the whole document; there are no field-level patches,
/// so a character on disk is always internally consistent.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: CharacterId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn write(&self, character: &Character) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let saved = SavedCharacter::new(character.clone());
        let content = serde_json::to_string_pretty(&saved)?;
        fs::write(self.path_for(character.id), content).await?;
        Ok(())
    }

    async fn read(&self, path: &Path) -> Result<Character, StoreError> {
        let content = fs::read_to_string(path).await?;
        let saved: SavedCharacter = serde_json::from_str(&content)?;

        if saved.version != SAVE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }

        Ok(saved.character)
    }
}

#[async_trait]
impl CharacterStore for JsonFileStore {
    async fn create(&self, character: Character) -> Result<Character, StoreError> {
        self.write(&character).await?;
        Ok(character)
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        match self.read(&self.path_for(id)).await {
            Ok(character) => Ok(Some(character)),
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_all(&self) -> Result<Vec<Character>, StoreError> {
        let mut characters = Vec::new();

        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(characters),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                match self.read(&path).await {
                    Ok(character) => characters.push(character),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping unreadable save file");
                    }
                }
            }
        }

        characters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(characters)
    }

    async fn update(&self, character: Character) -> Result<Option<Character>, StoreError> {
        if self.get(character.id).await?.is_none() {
            return Ok(None);
        }
        self.write(&character).await?;
        Ok(Some(character))
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, StoreError> {
        match fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
