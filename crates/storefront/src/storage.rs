//! Synchronous key/value local storage.
//!
//! [`LocalStorage`] mirrors the browser storage API: string values under
//! string keys, read and written synchronously. The cart store persists its
//! whole state as a single blob under one key.
//!
//! Two backends are provided:
//! - [`MemoryStorage`] - `HashMap`-backed, lost when dropped
//! - [`FileStorage`] - one file per key under a data directory

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn io(key: &str, source: io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Key/value storage that survives page reloads.
pub trait LocalStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// File-backed storage: each key is stored as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&staging, &target).map_err(|e| StorageError::io(key, e))?;

        tracing::trace!(key, path = %target.display(), bytes = value.len(), "Stored item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}
