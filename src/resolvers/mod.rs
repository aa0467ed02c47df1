//! Domain resolvers
//!
//! Each domain is backed by exactly one `DomainResolver`: a status query that
//! never prompts, and a request trigger that shows the system dialog once.
//! Resolvers are linked per domain in a `ResolverTable`; anything not linked
//! is unsupported.
//!
//! ## Built-in adapters
//!
//! Some platform subsystems need help from persisted flags before their
//! answers mean anything:
//!
//! - `RequestFlagResolver`: motion-like domains that cannot be queried
//!   without prompting
//! - `LocationResolver`: always vs. when-in-use disambiguation
//! - `BluetoothResolver`: passive radio observation
//!
//! ## Example
//!
//! ```rust,ignore
//! use permission_kit::resolvers::{FlagPolicy, RequestFlagResolver, ResolverTable};
//!
//! let mut resolvers = ResolverTable::new();
//! resolvers.register(DomainKind::Camera, CameraResolver::new());
//! resolvers.register(
//!     DomainKind::Motion,
//!     RequestFlagResolver::new(MotionResolver::new(), store.clone())
//!         .with_policy(FlagPolicy::QueryAfterRequest),
//! );
//! ```

mod bluetooth;
mod flagged;
mod location;
mod resolver;
mod table;

pub use bluetooth::{BluetoothAuthorization, BluetoothRadio, BluetoothResolver, RadioState, StateHandler};
pub use flagged::{FlagPolicy, RequestFlagResolver};
pub use location::{LocationAuthorization, LocationResolver, LocationServices};
pub use resolver::{Callback, DomainResolver, FixedResolver};
pub use table::ResolverTable;
