//! Domain resolver contract
//!
//! A resolver wraps one platform authorization subsystem. The permission
//! entity never talks to the platform directly; it asks its resolver.

use crate::core::Status;
use crate::domain::Domain;

/// Completion invoked once a request has been resolved
pub type Callback = Box<dyn FnOnce(Status) + Send + 'static>;

/// Status query and request trigger for one domain
pub trait DomainResolver: Send + Sync {
    /// Read the current consent state
    ///
    /// Must not prompt the user. May block on an internal wait when the
    /// platform only answers asynchronously.
    fn status(&self, domain: &Domain) -> Status;

    /// Trigger the system consent interaction and call `done` with the result
    ///
    /// Only called when `status` reported `NotDetermined`. Platform errors
    /// are reported as `Denied`. `done` may be invoked from any thread.
    fn request(&self, domain: &Domain, done: Callback);
}

/// Resolver for a capability that needs no consent
///
/// Always reports the same status and answers requests with it.
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver {
    status: Status,
}

impl FixedResolver {
    pub fn new(status: Status) -> Self {
        Self { status }
    }

    /// Resolver that always reports `Authorized`
    pub fn authorized() -> Self {
        Self::new(Status::Authorized)
    }
}

impl DomainResolver for FixedResolver {
    fn status(&self, _domain: &Domain) -> Status {
        self.status
    }

    fn request(&self, _domain: &Domain, done: Callback) {
        done(self.status);
    }
}
