// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Key-value persistence
//
// Everything the app remembers lives in one string-keyed store.
// Values are JSON text, one file on disk, no cloud sync.

use crate::types::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Storage keys shared by all frontends
pub mod keys {
    pub const CUSTOM_PETS: &str = "customPets";
    pub const FAVORITES: &str = "favorites";
    pub const THEME: &str = "theme";
    pub const LANGUAGE: &str = "settings_language";
    pub const NOTIFICATIONS_ENABLED: &str = "settings_notifications_enabled";
}

const STORAGE_FILE_NAME: &str = "storage.json";

/// Durable string-keyed storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// File-backed store: an in-memory cache persisted to disk on every change
pub struct FileKeyValueStore {
    entries: RwLock<BTreeMap<String, String>>,
    file_path: PathBuf,
}

impl FileKeyValueStore {
    /// Open the store in the platform data directory
    pub fn new() -> Result<Self, AppError> {
        let data_dir = directories::ProjectDirs::from("app", "petpals", "petpals")
            .ok_or_else(|| {
                AppError::StorageRead("Could not determine data directory".to_string())
            })?
            .data_dir()
            .to_path_buf();

        Self::open(&data_dir)
    }

    /// Open the store inside `dir`, creating the directory if needed
    pub fn open(dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(dir)?;

        let file_path = dir.join(STORAGE_FILE_NAME);
        tracing::info!("Storage file path: {:?}", file_path);

        let entries = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| AppError::StorageRead(format!("Failed to read storage: {}", e)))?;

            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse storage, starting fresh: {}", e);
                BTreeMap::new()
            })
        } else {
            tracing::info!("No storage file found, starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Persist entries to disk
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(entries)?;

        fs::write(&self.file_path, content)
            .map_err(|e| AppError::StorageWrite(format!("Failed to write storage: {}", e)))?;

        Ok(())
    }

    /// Apply a change and persist it, restoring the previous value if the write fails
    fn apply(&self, key: &str, value: Option<&str>) -> Result<(), AppError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let previous = match value {
            Some(value) => entries.insert(key.to_string(), value.to_string()),
            None => entries.remove(key),
        };

        if let Err(e) = self.persist(&entries) {
            tracing::error!("Failed to persist key {}: {}", key, e);
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.apply(key, Some(value))
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.apply(key, None)
    }
}

/// Process-local store for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Typed JSON access over a `KeyValueStore`.
///
/// Every read-modify-write on a key runs under that key's mutex, so two
/// handles cloned from the same `Storage` never interleave updates.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Raw string value for `key`
    pub fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.backend.get(key)
    }

    /// Store a raw string value under `key`
    pub fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let lock = self.key_lock(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.backend.set(key, value)
    }

    /// Decode the JSON value under `key`; `None` if the key is absent
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.backend.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| {
                    AppError::Serialization(format!("Failed to parse {}: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it under `key`
    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    /// Read the latest value under `key`, let `f` modify it, and write it back.
    ///
    /// Absent keys start from `T::default()`. Nothing is written if `f` fails.
    pub fn update_json<T, R, F>(&self, key: &str, f: F) -> Result<R, AppError>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> Result<R, AppError>,
    {
        self.update(key, |raw| {
            let mut value: T = match raw {
                Some(raw) => serde_json::from_str(raw).map_err(|e| {
                    AppError::Serialization(format!("Failed to parse {}: {}", key, e))
                })?,
                None => T::default(),
            };
            let result = f(&mut value)?;
            Ok((serde_json::to_string(&value)?, result))
        })
    }

    /// Raw-string read-modify-write under the key's lock.
    ///
    /// `f` sees the current value and returns the value to store.
    /// Nothing is written if `f` fails.
    pub fn update<R, F>(&self, key: &str, f: F) -> Result<R, AppError>
    where
        F: FnOnce(Option<&str>) -> Result<(String, R), AppError>,
    {
        let lock = self.key_lock(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.backend.get(key)?;
        let (raw, result) = f(current.as_deref())?;
        self.backend.set(key, &raw)?;

        Ok(result)
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.to_string()).or_default().clone()
    }
}
