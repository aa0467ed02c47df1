//! Preference keys for persisted permission flags

use crate::domain::DomainKind;

const PREFIX: &str = "permission";

/// Set once this library has asked for the domain
pub fn requested(kind: DomainKind) -> String {
    format!("{}.requested{}", PREFIX, kind.key_name())
}

/// Result of the last completed request for the domain
pub fn status(kind: DomainKind) -> String {
    format!("{}.status{}", PREFIX, kind.key_name())
}

/// Location-always was asked for while when-in-use was already granted
pub const REQUESTED_LOCATION_ALWAYS_WITH_WHEN_IN_USE: &str =
    "permission.requestedLocationAlwaysWithWhenInUse";

/// The bluetooth radio has reported a state at least once
pub const BLUETOOTH_STATE_DETERMINED: &str = "permission.stateBluetoothManagerDetermined";
