//! Location resolver
//!
//! One platform authorization covers two domains. Once when-in-use is
//! granted, the platform keeps reporting when-in-use after an always-request
//! was refused, so the refusal has to be remembered here.

use std::sync::Arc;

use crate::core::Status;
use crate::domain::{Domain, DomainKind};
use crate::store::{keys, PreferenceStore};

use super::resolver::{Callback, DomainResolver};

/// Raw platform location authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationAuthorization {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedAlways,
    AuthorizedWhenInUse,
}

/// Platform location services
pub trait LocationServices: Send + Sync {
    /// Check if location services are switched on system-wide
    fn services_enabled(&self) -> bool;

    /// Current authorization for this app
    fn authorization(&self) -> LocationAuthorization;

    /// Ask for always authorization, reporting the new authorization
    fn request_always(&self, done: Box<dyn FnOnce(LocationAuthorization) + Send>);

    /// Ask for when-in-use authorization, reporting the new authorization
    fn request_when_in_use(&self, done: Box<dyn FnOnce(LocationAuthorization) + Send>);
}

/// Resolver serving both `LocationAlways` and `LocationWhenInUse`
pub struct LocationResolver {
    services: Arc<dyn LocationServices>,
    store: Arc<dyn PreferenceStore>,
}

impl LocationResolver {
    pub fn new(services: Arc<dyn LocationServices>, store: Arc<dyn PreferenceStore>) -> Self {
        Self { services, store }
    }

    fn always_status(&self, authorization: LocationAuthorization) -> Status {
        match authorization {
            LocationAuthorization::AuthorizedAlways => Status::Authorized,
            LocationAuthorization::AuthorizedWhenInUse => {
                if self.store.flag(keys::REQUESTED_LOCATION_ALWAYS_WITH_WHEN_IN_USE) {
                    Status::Denied
                } else {
                    Status::NotDetermined
                }
            }
            LocationAuthorization::NotDetermined => Status::NotDetermined,
            LocationAuthorization::Restricted | LocationAuthorization::Denied => Status::Denied,
        }
    }

    fn when_in_use_status(authorization: LocationAuthorization) -> Status {
        match authorization {
            LocationAuthorization::AuthorizedAlways | LocationAuthorization::AuthorizedWhenInUse => {
                Status::Authorized
            }
            LocationAuthorization::NotDetermined => Status::NotDetermined,
            LocationAuthorization::Restricted | LocationAuthorization::Denied => Status::Denied,
        }
    }
}

impl DomainResolver for LocationResolver {
    fn status(&self, domain: &Domain) -> Status {
        if !self.services.services_enabled() {
            return Status::Disabled;
        }

        let authorization = self.services.authorization();

        match domain.kind() {
            DomainKind::LocationAlways => self.always_status(authorization),
            _ => Self::when_in_use_status(authorization),
        }
    }

    fn request(&self, domain: &Domain, done: Callback) {
        match domain.kind() {
            DomainKind::LocationAlways => {
                if self.services.authorization() == LocationAuthorization::AuthorizedWhenInUse {
                    self.store
                        .set_flag(keys::REQUESTED_LOCATION_ALWAYS_WITH_WHEN_IN_USE, true);
                }

                let store = self.store.clone();
                self.services.request_always(Box::new(move |authorization| {
                    let status = match authorization {
                        LocationAuthorization::AuthorizedAlways => Status::Authorized,
                        LocationAuthorization::AuthorizedWhenInUse
                            if store.flag(keys::REQUESTED_LOCATION_ALWAYS_WITH_WHEN_IN_USE) =>
                        {
                            Status::Denied
                        }
                        // Provisional when-in-use grant; always can still be asked for later
                        LocationAuthorization::AuthorizedWhenInUse => Status::NotDetermined,
                        LocationAuthorization::NotDetermined => Status::NotDetermined,
                        LocationAuthorization::Restricted | LocationAuthorization::Denied => {
                            Status::Denied
                        }
                    };
                    done(status);
                }));
            }
            _ => {
                self.services.request_when_in_use(Box::new(move |authorization| {
                    done(Self::when_in_use_status(authorization));
                }));
            }
        }
    }
}
