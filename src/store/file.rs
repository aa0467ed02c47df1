//! File-backed preference store
//!
//! Keeps the whole map in memory and writes it through to a JSON file on
//! every change.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::core::PermissionResult;

use super::memory::{PreferenceStore, StoreValue};

/// Default file name for persisted flags
const PREFERENCES_FILE: &str = "permissions.json";

/// Preference store persisted to a JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<HashMap<String, StoreValue>>,
}

impl FileStore {
    /// Open the default file inside `dir`, loading existing values
    pub fn in_dir(dir: impl AsRef<Path>) -> PermissionResult<Self> {
        Self::open(dir.as_ref().join(PREFERENCES_FILE))
    }

    /// Open a store at `path`, loading existing values
    ///
    /// A missing file is an empty store; it is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> PermissionResult<Self> {
        let path = path.into();
        let values = Self::load(&path)?;

        tracing::debug!(path = %path.display(), keys = values.len(), "Opened preference store");

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn load(path: &Path) -> PermissionResult<HashMap<String, StoreValue>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let values = serde_json::from_reader(reader)?;

        Ok(values)
    }

    /// Write the current map to disk
    pub fn flush(&self) -> PermissionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let values = self.values.read().unwrap_or_else(|e| e.into_inner());

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &*values)?;
        writer.flush()?;

        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_through(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist preferences");
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<StoreValue> {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: StoreValue) {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
        self.write_through();
    }

    fn remove(&self, key: &str) {
        let removed = self
            .values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);

        if removed.is_some() {
            self.write_through();
        }
    }
}
