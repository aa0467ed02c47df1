//! Core types for the permission kit
//!
//! - `Status` - The four consent states
//! - `PermissionError` - Error types

pub mod error;
pub mod status;

pub use error::{PermissionError, PermissionResult};
pub use status::Status;
