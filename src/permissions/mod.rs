//! Permission entities and groups
//!
//! - `PermissionRegistry` - One shared `Permission` per domain, created lazily
//! - `Permission` - Status reads and the request state machine for a domain
//! - `PermissionSet` - Fixed group of permissions with one aggregate status
//!
//! ## Example
//!
//! ```rust,ignore
//! use permission_kit::permissions::{PermissionRegistry, PermissionSet};
//! use permission_kit::runtime::{create_main_queue, Environment};
//! use permission_kit::Domain;
//!
//! let (queue, main_loop) = create_main_queue();
//! let registry = PermissionRegistry::new(resolvers, Environment::new(queue));
//!
//! let camera = registry.get(&Domain::Camera)?;
//! camera.request(|status| println!("camera: {}", status));
//!
//! let set = PermissionSet::new([camera, registry.get(&Domain::Microphone)?]);
//! println!("{}", set.status());
//! ```

mod permission;
mod registry;
mod set;

pub use permission::{Permission, PermissionObserver};
pub use registry::PermissionRegistry;
pub use set::{aggregate, PermissionSet, PermissionSetDelegate, Permissionable};
