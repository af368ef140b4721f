//! Persisted key-value storage for session records.
//!
//! Defines the interface the session authority persists through, with an
//! in-memory backend and a JSON file backend that survives restarts.

use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AuthError, Result};

/// Client-local key-value storage.
///
/// Each call is a single synchronous step: a `set` replaces the whole value
/// for its key or fails without changing it.
pub trait SessionStorage: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Checks if a value is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

// Lets several authorities (e.g. across a simulated restart) share one backend.
impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }
}

/// In-process storage. Lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON file holding an object of key → value.
///
/// The file is re-read on every access, so a later process sees what an
/// earlier one wrote. Each write goes to a uniquely named sibling file which
/// is then renamed over the backing file. Writers in separate processes are
/// not coordinated: the last complete write wins.
///
/// A backing file that does not parse is reported by `get`, but `set` and
/// `remove` overwrite it, so a damaged file never blocks later writes.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Opens storage at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            AuthError::Storage(format!(
                "failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Reads the entries for a read-modify-write. An unparsable file yields
    /// an empty map and `true`, meaning it must be rewritten.
    fn entries_for_update(&self) -> Result<(BTreeMap<String, String>, bool)> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(AuthError::Storage(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Resetting unparsable session storage"
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let contents = serde_json::to_string_pretty(entries)?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), "Wrote session storage");
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let (mut entries, _) = self.entries_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let (mut entries, reset) = self.entries_for_update()?;
        if entries.remove(key).is_some() || reset {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
