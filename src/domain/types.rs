//! Permission domains
//!
//! A `Domain` identifies one consent subsystem and may carry configuration
//! for the request (e.g. which notification options to ask for). Identity is
//! the `DomainKind`: two domains with different payloads are the same domain.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Fieldless identity of a domain, used for equality, hashing and lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Contacts,
    LocationAlways,
    LocationWhenInUse,
    Notifications,
    Microphone,
    Camera,
    Photos,
    Reminders,
    Events,
    Calendar,
    Bluetooth,
    Motion,
    MediaLibrary,
    SpeechRecognizer,
    Siri,
    Tracking,
}

impl DomainKind {
    /// Every known domain kind
    pub const ALL: [DomainKind; 16] = [
        DomainKind::Contacts,
        DomainKind::LocationAlways,
        DomainKind::LocationWhenInUse,
        DomainKind::Notifications,
        DomainKind::Microphone,
        DomainKind::Camera,
        DomainKind::Photos,
        DomainKind::Reminders,
        DomainKind::Events,
        DomainKind::Calendar,
        DomainKind::Bluetooth,
        DomainKind::Motion,
        DomainKind::MediaLibrary,
        DomainKind::SpeechRecognizer,
        DomainKind::Siri,
        DomainKind::Tracking,
    ];

    /// Stable identifier used in persisted flag keys (e.g. `Motion`)
    pub fn key_name(&self) -> &'static str {
        match self {
            DomainKind::Contacts => "Contacts",
            DomainKind::LocationAlways => "LocationAlways",
            DomainKind::LocationWhenInUse => "LocationWhenInUse",
            DomainKind::Notifications => "Notifications",
            DomainKind::Microphone => "Microphone",
            DomainKind::Camera => "Camera",
            DomainKind::Photos => "Photos",
            DomainKind::Reminders => "Reminders",
            DomainKind::Events => "Events",
            DomainKind::Calendar => "Calendar",
            DomainKind::Bluetooth => "Bluetooth",
            DomainKind::Motion => "Motion",
            DomainKind::MediaLibrary => "MediaLibrary",
            DomainKind::SpeechRecognizer => "SpeechRecognizer",
            DomainKind::Siri => "Siri",
            DomainKind::Tracking => "Tracking",
        }
    }

    /// Human-readable name shown in alerts
    ///
    /// Both location domains read as "Location".
    pub fn display_name(&self) -> &'static str {
        match self {
            DomainKind::Contacts => "Contacts",
            DomainKind::LocationAlways | DomainKind::LocationWhenInUse => "Location",
            DomainKind::Notifications => "Notifications",
            DomainKind::Microphone => "Microphone",
            DomainKind::Camera => "Camera",
            DomainKind::Photos => "Photos",
            DomainKind::Reminders => "Reminders",
            DomainKind::Events => "Events",
            DomainKind::Calendar => "Calendar",
            DomainKind::Bluetooth => "Bluetooth",
            DomainKind::Motion => "Motion",
            DomainKind::MediaLibrary => "Media Library",
            DomainKind::SpeechRecognizer => "Speech Recognizer",
            DomainKind::Siri => "SiriKit",
            DomainKind::Tracking => "Tracking",
        }
    }

    /// App manifest key that must be declared before the system dialog may be shown
    pub fn usage_description_key(&self) -> Option<&'static str> {
        match self {
            DomainKind::Contacts => Some("NSContactsUsageDescription"),
            DomainKind::LocationAlways => Some("NSLocationAlwaysAndWhenInUseUsageDescription"),
            DomainKind::LocationWhenInUse => Some("NSLocationWhenInUseUsageDescription"),
            DomainKind::Notifications => None,
            DomainKind::Microphone => Some("NSMicrophoneUsageDescription"),
            DomainKind::Camera => Some("NSCameraUsageDescription"),
            DomainKind::Photos => Some("NSPhotoLibraryUsageDescription"),
            DomainKind::Reminders => Some("NSRemindersUsageDescription"),
            DomainKind::Events | DomainKind::Calendar => Some("NSCalendarsUsageDescription"),
            DomainKind::Bluetooth => Some("NSBluetoothAlwaysUsageDescription"),
            DomainKind::Motion => Some("NSMotionUsageDescription"),
            DomainKind::MediaLibrary => Some("NSAppleMusicUsageDescription"),
            DomainKind::SpeechRecognizer => Some("NSSpeechRecognitionUsageDescription"),
            DomainKind::Siri => Some("NSSiriUsageDescription"),
            DomainKind::Tracking => Some("NSUserTrackingUsageDescription"),
        }
    }
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key_name())
    }
}

/// Options requested along with notification permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOptions {
    #[serde(default = "default_true")]
    pub alert: bool,
    #[serde(default = "default_true")]
    pub badge: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Deliver quietly without asking first
    #[serde(default)]
    pub provisional: bool,
    /// Bypass do-not-disturb (needs an entitlement)
    #[serde(default)]
    pub critical: bool,
}

fn default_true() -> bool {
    true
}

impl NotificationOptions {
    /// Alert, badge and sound
    pub fn new() -> Self {
        Self {
            alert: true,
            badge: true,
            sound: true,
            provisional: false,
            critical: false,
        }
    }

    /// No options at all
    pub fn none() -> Self {
        Self {
            alert: false,
            badge: false,
            sound: false,
            provisional: false,
            critical: false,
        }
    }

    pub fn with_alert(mut self, alert: bool) -> Self {
        self.alert = alert;
        self
    }

    pub fn with_badge(mut self, badge: bool) -> Self {
        self.badge = badge;
        self
    }

    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_provisional(mut self, provisional: bool) -> Self {
        self.provisional = provisional;
        self
    }

    pub fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A permission domain, optionally carrying request configuration
///
/// Equality and hashing only look at [`DomainKind`]; the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    Contacts,
    LocationAlways,
    LocationWhenInUse,
    Notifications(NotificationOptions),
    Microphone,
    Camera,
    Photos,
    Reminders,
    Events,
    Calendar,
    Bluetooth,
    Motion,
    MediaLibrary,
    SpeechRecognizer,
    Siri,
    Tracking,
}

impl Domain {
    /// Notifications with the default options
    pub fn notifications() -> Self {
        Domain::Notifications(NotificationOptions::default())
    }

    /// Identity of this domain
    pub fn kind(&self) -> DomainKind {
        match self {
            Domain::Contacts => DomainKind::Contacts,
            Domain::LocationAlways => DomainKind::LocationAlways,
            Domain::LocationWhenInUse => DomainKind::LocationWhenInUse,
            Domain::Notifications(_) => DomainKind::Notifications,
            Domain::Microphone => DomainKind::Microphone,
            Domain::Camera => DomainKind::Camera,
            Domain::Photos => DomainKind::Photos,
            Domain::Reminders => DomainKind::Reminders,
            Domain::Events => DomainKind::Events,
            Domain::Calendar => DomainKind::Calendar,
            Domain::Bluetooth => DomainKind::Bluetooth,
            Domain::Motion => DomainKind::Motion,
            Domain::MediaLibrary => DomainKind::MediaLibrary,
            Domain::SpeechRecognizer => DomainKind::SpeechRecognizer,
            Domain::Siri => DomainKind::Siri,
            Domain::Tracking => DomainKind::Tracking,
        }
    }

    /// Notification options, if this is the notifications domain
    pub fn notification_options(&self) -> Option<&NotificationOptions> {
        match self {
            Domain::Notifications(options) => Some(options),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }

    pub fn usage_description_key(&self) -> Option<&'static str> {
        self.kind().usage_description_key()
    }
}

impl From<DomainKind> for Domain {
    fn from(kind: DomainKind) -> Self {
        match kind {
            DomainKind::Contacts => Domain::Contacts,
            DomainKind::LocationAlways => Domain::LocationAlways,
            DomainKind::LocationWhenInUse => Domain::LocationWhenInUse,
            DomainKind::Notifications => Domain::notifications(),
            DomainKind::Microphone => Domain::Microphone,
            DomainKind::Camera => Domain::Camera,
            DomainKind::Photos => Domain::Photos,
            DomainKind::Reminders => Domain::Reminders,
            DomainKind::Events => Domain::Events,
            DomainKind::Calendar => Domain::Calendar,
            DomainKind::Bluetooth => Domain::Bluetooth,
            DomainKind::Motion => Domain::Motion,
            DomainKind::MediaLibrary => Domain::MediaLibrary,
            DomainKind::SpeechRecognizer => Domain::SpeechRecognizer,
            DomainKind::Siri => Domain::Siri,
            DomainKind::Tracking => Domain::Tracking,
        }
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
    }
}

impl Eq for Domain {}

impl Hash for Domain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_payload_does_not_affect_equality() {
        let loud = Domain::Notifications(NotificationOptions::new());
        let quiet = Domain::Notifications(NotificationOptions::none().with_provisional(true));

        assert_eq!(loud, quiet);

        let mut set = HashSet::new();
        set.insert(loud);
        set.insert(quiet);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_kind_round_trip_covers_every_domain() {
        for kind in DomainKind::ALL {
            assert_eq!(Domain::from(kind).kind(), kind);
        }
    }

    #[test]
    fn test_location_domains_share_display_name() {
        assert_eq!(Domain::LocationAlways.display_name(), "Location");
        assert_eq!(Domain::LocationWhenInUse.display_name(), "Location");
        assert_ne!(Domain::LocationAlways, Domain::LocationWhenInUse);
    }

    #[test]
    fn test_usage_description_keys() {
        assert_eq!(
            Domain::Camera.usage_description_key(),
            Some("NSCameraUsageDescription")
        );
        assert_eq!(Domain::notifications().usage_description_key(), None);
    }

    #[test]
    fn test_domain_serde_keeps_payload() {
        let domain = Domain::Notifications(NotificationOptions::none().with_badge(true));
        let json = serde_json::to_string(&domain).unwrap();
        let parsed: Domain = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.notification_options(),
            Some(&NotificationOptions::none().with_badge(true))
        );
    }
}
