//! Resolver for domains without a side-effect-free status query
//!
//! Motion and (on some systems) notifications can only be queried in a way
//! that may itself prompt. Until this library has asked, the status is
//! `NotDetermined`, read purely from the persisted flag.

use std::sync::Arc;

use crate::core::Status;
use crate::domain::Domain;
use crate::store::{keys, PreferenceStore};

use super::resolver::{Callback, DomainResolver};

/// Where the status comes from once the domain has been requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagPolicy {
    /// Report the persisted result of the last request
    Persisted,
    /// Ask the platform (safe once the dialog has been shown)
    QueryAfterRequest,
}

/// Wraps a platform resolver behind a persisted "requested" flag
pub struct RequestFlagResolver {
    platform: Arc<dyn DomainResolver>,
    store: Arc<dyn PreferenceStore>,
    policy: FlagPolicy,
}

impl RequestFlagResolver {
    /// Persist and report the result of the last request
    pub fn new<R: DomainResolver + 'static>(platform: R, store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            platform: Arc::new(platform),
            store,
            policy: FlagPolicy::Persisted,
        }
    }

    /// Set how the status is read after the first request
    pub fn with_policy(mut self, policy: FlagPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check if this library has completed a request for the domain
    pub fn was_requested(&self, domain: &Domain) -> bool {
        self.store.flag(&keys::requested(domain.kind()))
    }
}

impl DomainResolver for RequestFlagResolver {
    fn status(&self, domain: &Domain) -> Status {
        if !self.was_requested(domain) {
            return Status::NotDetermined;
        }

        match self.policy {
            FlagPolicy::Persisted => self
                .store
                .status(&keys::status(domain.kind()))
                .unwrap_or(Status::NotDetermined),
            FlagPolicy::QueryAfterRequest => self.platform.status(domain),
        }
    }

    fn request(&self, domain: &Domain, done: Callback) {
        let store = self.store.clone();
        let kind = domain.kind();

        self.platform.request(
            domain,
            Box::new(move |status| {
                store.set_status(&keys::status(kind), status);
                store.set_flag(&keys::requested(kind), true);
                tracing::debug!(domain = %kind, %status, "Persisted request result");
                done(status);
            }),
        );
    }
}
