//! Preference store trait and in-memory implementation

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::core::Status;

/// A scalar value kept in the preference store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoreValue {
    Bool(bool),
    Text(String),
    Status(Status),
}

/// Process-wide key-value store for flags that must survive restarts
///
/// Synchronous, last-write-wins. Implementations may be written from any
/// thread a platform completion fires on.
pub trait PreferenceStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<StoreValue>;

    /// Overwrite a value
    fn set(&self, key: &str, value: StoreValue);

    /// Remove a value
    fn remove(&self, key: &str);

    /// Read a flag, treating anything but `Bool(true)` as false
    fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(StoreValue::Bool(true)))
    }

    fn set_flag(&self, key: &str, value: bool) {
        self.set(key, StoreValue::Bool(value));
    }

    /// Read a persisted status
    fn status(&self, key: &str) -> Option<Status> {
        match self.get(key) {
            Some(StoreValue::Status(status)) => Some(status),
            _ => None,
        }
    }

    fn set_status(&self, key: &str, status: Status) {
        self.set(key, StoreValue::Status(status));
    }
}

/// Store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, StoreValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial values
    pub fn with_values(values: HashMap<String, StoreValue>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every value
    pub fn clear(&self) {
        self.values.write().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<StoreValue> {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: StoreValue) {
        tracing::trace!(key, ?value, "Store write");
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}
