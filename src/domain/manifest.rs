//! Usage-description declarations
//!
//! Platforms refuse to show a consent dialog unless the app declares why it
//! needs the capability. Requests for an undeclared domain are skipped.

use std::collections::HashSet;

/// Answers whether the app declares a usage-description key
pub trait UsageManifest: Send + Sync {
    /// Check if the key is declared
    fn declares(&self, key: &str) -> bool;
}

/// Manifest that declares every key
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveManifest;

impl UsageManifest for PermissiveManifest {
    fn declares(&self, _key: &str) -> bool {
        true
    }
}

/// Manifest backed by an explicit set of declared keys
#[derive(Debug, Default, Clone)]
pub struct DeclaredKeys {
    keys: HashSet<String>,
}

impl DeclaredKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for DeclaredKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl UsageManifest for DeclaredKeys {
    fn declares(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}
