//! Permission domains
//!
//! - `Domain` - Tagged union of consent subsystems, some carrying request options
//! - `DomainKind` - Payload-free identity used for lookup
//! - `UsageManifest` - Which usage-description keys the app declares

mod manifest;
mod types;

pub use manifest::{DeclaredKeys, PermissiveManifest, UsageManifest};
pub use types::{Domain, DomainKind, NotificationOptions};
