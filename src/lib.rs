pub mod core;
pub mod domain;
pub mod permissions;
pub mod resolvers;
pub mod runtime;
pub mod store;

// Alert descriptions and the presenter seam
pub mod alerts;

// Optional components
pub mod config;
pub mod logging;

#[cfg(test)]
mod testing;

pub use crate::core::{PermissionError, PermissionResult, Status};
pub use domain::{Domain, DomainKind};
pub use permissions::{Permission, PermissionRegistry, PermissionSet};
