//! Bluetooth resolver
//!
//! There is no bluetooth consent dialog to trigger directly. A request
//! starts observing the radio; the first state report after the request
//! resolves it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::Status;
use crate::domain::{Domain, DomainKind};
use crate::store::{keys, PreferenceStore};

use super::resolver::{Callback, DomainResolver};

/// App-level bluetooth authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BluetoothAuthorization {
    NotDetermined,
    Restricted,
    Denied,
    Allowed,
}

/// Radio state as last reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioState {
    Unknown,
    Resetting,
    Unsupported,
    Unauthorized,
    PoweredOff,
    PoweredOn,
}

/// Handler invoked on every radio state report
pub type StateHandler = Box<dyn Fn(RadioState) + Send + Sync>;

/// Platform bluetooth radio
pub trait BluetoothRadio: Send + Sync {
    fn authorization(&self) -> BluetoothAuthorization;

    fn state(&self) -> RadioState;

    /// Start observing state reports (touching the radio may show the dialog)
    fn observe(&self, handler: StateHandler);
}

/// Resolver for the bluetooth domain
pub struct BluetoothResolver {
    inner: Arc<Shared>,
}

struct Shared {
    radio: Arc<dyn BluetoothRadio>,
    store: Arc<dyn PreferenceStore>,
    pending: Mutex<Option<Callback>>,
    observing: AtomicBool,
}

impl BluetoothResolver {
    pub fn new(radio: Arc<dyn BluetoothRadio>, store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            inner: Arc::new(Shared {
                radio,
                store,
                pending: Mutex::new(None),
                observing: AtomicBool::new(false),
            }),
        }
    }
}

impl Shared {
    fn status(&self) -> Status {
        match self.radio.authorization() {
            BluetoothAuthorization::Restricted => return Status::Disabled,
            BluetoothAuthorization::Denied => return Status::Denied,
            BluetoothAuthorization::NotDetermined | BluetoothAuthorization::Allowed => {}
        }

        if !self.store.flag(keys::BLUETOOTH_STATE_DETERMINED) {
            return Status::NotDetermined;
        }

        match self.radio.state() {
            RadioState::Unsupported | RadioState::PoweredOff => Status::Disabled,
            RadioState::Unauthorized => Status::Denied,
            RadioState::PoweredOn => Status::Authorized,
            RadioState::Resetting | RadioState::Unknown => self
                .store
                .status(&keys::status(DomainKind::Bluetooth))
                .unwrap_or(Status::NotDetermined),
        }
    }

    fn state_did_update(&self, state: RadioState) {
        tracing::debug!(?state, "Bluetooth state update");

        self.store.set_flag(keys::BLUETOOTH_STATE_DETERMINED, true);
        let status = self.status();
        self.store
            .set_status(&keys::status(DomainKind::Bluetooth), status);

        let requested = keys::requested(DomainKind::Bluetooth);
        if !self.store.flag(&requested) {
            return;
        }

        let callback = self.pending.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(callback) = callback {
            self.store.set_flag(&requested, false);
            callback(status);
        }
    }
}

impl DomainResolver for BluetoothResolver {
    fn status(&self, _domain: &Domain) -> Status {
        self.inner.status()
    }

    fn request(&self, _domain: &Domain, done: Callback) {
        self.inner
            .store
            .set_flag(&keys::requested(DomainKind::Bluetooth), true);
        *self.inner.pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(done);

        // One handler serves every later request
        if self.inner.observing.swap(true, Ordering::SeqCst) {
            return;
        }

        let shared = Arc::downgrade(&self.inner);
        self.inner.radio.observe(Box::new(move |state| {
            if let Some(shared) = shared.upgrade() {
                shared.state_did_update(state);
            }
        }));
    }
}
