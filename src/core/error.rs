//! Permission kit error types

use thiserror::Error;

/// Errors that can occur while wiring up or persisting permissions
///
/// Consent outcomes (denied, disabled, platform refusals) are never errors;
/// they are reported as a [`Status`](super::Status).
#[derive(Error, Debug)]
pub enum PermissionError {
    /// No resolver is linked for this domain (feature/build mismatch)
    #[error("Unsupported domain: {0}")]
    UnsupportedDomain(String),

    /// Main queue is gone, nothing can be delivered anymore
    #[error("Main queue closed")]
    ChannelClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PermissionError {
    /// Create an unsupported domain error
    pub fn unsupported(domain: impl std::fmt::Display) -> Self {
        PermissionError::UnsupportedDomain(domain.to_string())
    }
}

/// Result type alias for permission kit operations
pub type PermissionResult<T> = Result<T, PermissionError>;
