//! Persisted flags
//!
//! Some domains cannot tell "never asked" apart from other states without
//! remembering that this library already asked. Those flags live in a
//! `PreferenceStore` shared by every permission.
//!
//! - `MemoryStore` - Process-lifetime store
//! - `FileStore` - JSON file, written through on every change

mod file;
pub mod keys;
mod memory;

pub use file::FileStore;
pub use memory::{MemoryStore, PreferenceStore, StoreValue};
