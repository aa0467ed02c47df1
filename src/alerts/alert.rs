//! Alert descriptions
//!
//! The core never builds UI. It describes an alert (copy plus actions) and
//! hands it to an `AlertPresenter`.

use serde::{Deserialize, Serialize};

use crate::core::Status;
use crate::domain::Domain;

/// Which explainer is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Shown before the system dialog, to explain why access is needed
    PrePermission,
    /// Shown when access was refused; offers a way to Settings
    Denied,
    /// Shown when the capability is off system-wide; informational only
    Disabled,
}

impl AlertKind {
    /// The explainer that belongs to a status, if any
    pub fn for_status(status: Status) -> Option<Self> {
        match status {
            Status::NotDetermined => Some(AlertKind::PrePermission),
            Status::Denied => Some(AlertKind::Denied),
            Status::Disabled => Some(AlertKind::Disabled),
            Status::Authorized => None,
        }
    }

    /// Roles offered by this kind of alert, in display order
    pub fn roles(&self) -> &'static [ActionRole] {
        match self {
            AlertKind::PrePermission => &[ActionRole::Cancel, ActionRole::Confirm],
            AlertKind::Denied => &[ActionRole::Cancel, ActionRole::Settings],
            AlertKind::Disabled => &[ActionRole::Cancel],
        }
    }

    /// Check if this alert offers a role
    pub fn offers(&self, role: ActionRole) -> bool {
        self.roles().contains(&role)
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::PrePermission => write!(f, "pre-permission"),
            AlertKind::Denied => write!(f, "denied"),
            AlertKind::Disabled => write!(f, "disabled"),
        }
    }
}

/// What an alert button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRole {
    /// Dismiss; the current status is delivered
    Cancel,
    /// Go on to the system dialog
    Confirm,
    /// Open the Settings app and re-check on return
    Settings,
}

/// One button of an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAction {
    pub title: String,
    pub role: ActionRole,
}

/// Everything a presenter needs to show an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSpec {
    pub kind: AlertKind,
    pub domain: Domain,
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

impl AlertSpec {
    /// Find the action with a role
    pub fn action(&self, role: ActionRole) -> Option<&AlertAction> {
        self.actions.iter().find(|a| a.role == role)
    }
}

/// Customizable alert text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCopy {
    /// The title of the alert
    pub title: String,

    /// Descriptive text with more details about the reason for the alert
    pub message: String,

    /// The title of the cancel action
    pub cancel: String,

    /// The title of the confirm action (pre-permission only)
    pub confirm: Option<String>,

    /// The title of the settings action (denied only)
    pub settings: Option<String>,
}

impl AlertCopy {
    /// Default copy for an alert kind
    pub fn defaults(kind: AlertKind, domain: &Domain, app_name: &str) -> Self {
        let name = domain.display_name();

        match kind {
            AlertKind::PrePermission => Self {
                title: format!("{} would like to access your {}", app_name, name),
                message: format!("Please enable access to {}.", name),
                cancel: "Cancel".to_string(),
                confirm: Some("Confirm".to_string()),
                settings: None,
            },
            AlertKind::Denied => Self {
                title: format!("Permission for {} was denied", name),
                message: format!("Please enable access to {} in the Settings app.", name),
                cancel: "Cancel".to_string(),
                confirm: None,
                settings: Some("Settings".to_string()),
            },
            AlertKind::Disabled => Self {
                title: format!("{} is currently disabled", name),
                message: format!("Please enable access to {} in the Settings app.", name),
                cancel: "OK".to_string(),
                confirm: None,
                settings: None,
            },
        }
    }

    /// Build the presentable alert
    pub fn spec(&self, kind: AlertKind, domain: &Domain) -> AlertSpec {
        let actions = kind
            .roles()
            .iter()
            .map(|role| AlertAction {
                title: match role {
                    ActionRole::Cancel => self.cancel.clone(),
                    ActionRole::Confirm => self.confirm.clone().unwrap_or_else(|| "Confirm".to_string()),
                    ActionRole::Settings => self.settings.clone().unwrap_or_else(|| "Settings".to_string()),
                },
                role: *role,
            })
            .collect();

        AlertSpec {
            kind,
            domain: domain.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            actions,
        }
    }
}
