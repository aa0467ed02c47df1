//! Permission status types

use serde::{Deserialize, Serialize};

/// Snapshot of a domain's consent state, as of the moment it was read
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The user granted access
    Authorized,

    /// The user (or a restriction) refused access for this app
    Denied,

    /// The capability is switched off system-wide
    Disabled,

    /// The system consent dialog has never been shown
    #[default]
    NotDetermined,
}

impl Status {
    /// All four statuses, in aggregation precedence order (most blocking first)
    pub const ALL: [Status; 4] = [
        Status::Denied,
        Status::Disabled,
        Status::NotDetermined,
        Status::Authorized,
    ];

    /// Check if access is granted
    pub fn is_authorized(&self) -> bool {
        matches!(self, Status::Authorized)
    }

    /// Check if asking the user is still possible
    pub fn is_requestable(&self) -> bool {
        matches!(self, Status::NotDetermined)
    }

    /// Check if the user has to leave the app to change this status
    pub fn requires_settings(&self) -> bool {
        matches!(self, Status::Denied | Status::Disabled)
    }

    /// Position in the aggregation precedence (0 = most blocking)
    pub(crate) fn precedence(&self) -> usize {
        match self {
            Status::Denied => 0,
            Status::Disabled => 1,
            Status::NotDetermined => 2,
            Status::Authorized => 3,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Authorized => write!(f, "authorized"),
            Status::Denied => write!(f, "denied"),
            Status::Disabled => write!(f, "disabled"),
            Status::NotDetermined => write!(f, "not determined"),
        }
    }
}
