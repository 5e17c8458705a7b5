//! Key-value backends for progress records.

use super::{PersistenceError, ProgressRecord};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key-value store for progress records, keyed by tour name.
pub trait ProgressStore: Send + Sync {
    fn load(&self, tour: &str) -> Result<Option<ProgressRecord>, PersistenceError>;

    fn save(&self, tour: &str, record: &ProgressRecord) -> Result<(), PersistenceError>;

    /// Removing an absent key is not an error.
    fn remove(&self, tour: &str) -> Result<(), PersistenceError>;
}

/// In-process store holding binary-encoded records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, tour: &str) -> Result<Option<ProgressRecord>, PersistenceError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(tour)
            .map(|bytes| ProgressRecord::from_bytes(bytes))
            .transpose()
    }

    fn save(&self, tour: &str, record: &ProgressRecord) -> Result<(), PersistenceError> {
        let bytes = record.to_bytes()?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tour.to_string(), bytes);
        Ok(())
    }

    fn remove(&self, tour: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(tour);
        Ok(())
    }
}

/// Store writing one JSON file per tour into a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash never leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Use `dir`, creating it if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the record of `tour`.
    ///
    /// Lowercase ASCII letters, digits and `-` are kept; every other byte is
    /// written as `_XX` (uppercase hex). Distinct names therefore never share
    /// a file, even on case-insensitive file systems.
    fn path_for(&self, tour: &str) -> PathBuf {
        let mut file = String::with_capacity(tour.len());
        for byte in tour.bytes() {
            if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' {
                file.push(char::from(byte));
            } else {
                file.push_str(&format!("_{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", file))
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self, tour: &str) -> Result<Option<ProgressRecord>, PersistenceError> {
        match fs::read_to_string(self.path_for(tour)) {
            Ok(json) => ProgressRecord::from_json(&json).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, tour: &str, record: &ProgressRecord) -> Result<(), PersistenceError> {
        let path = self.path_for(tour);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, record.to_json()?)?;
        fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&self, tour: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(tour)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
