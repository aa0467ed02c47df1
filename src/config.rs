//! Permission kit configuration
//!
//! Defaults applied to every permission the registry creates. Individual
//! permissions can still override their alert flags and copy.
//!
//! ```ignore
//! let config = KitConfig::new("Lumen")
//!     .with_pre_permission_alert(true)
//!     .with_disabled_alert(false);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alerts::AlertKind;
use crate::core::{PermissionError, PermissionResult};

/// Which alerts are shown automatically by `request`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDefaults {
    /// Explain before showing the system dialog
    #[serde(default)]
    pub pre_permission: bool,

    /// Offer a way to Settings after a refusal
    #[serde(default = "default_enabled")]
    pub denied: bool,

    /// Tell the user the capability is off system-wide
    #[serde(default = "default_enabled")]
    pub disabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl AlertDefaults {
    /// Whether an alert kind is shown by default
    pub fn presents(&self, kind: AlertKind) -> bool {
        match kind {
            AlertKind::PrePermission => self.pre_permission,
            AlertKind::Denied => self.denied,
            AlertKind::Disabled => self.disabled,
        }
    }
}

impl Default for AlertDefaults {
    fn default() -> Self {
        Self {
            pre_permission: false,
            denied: true,
            disabled: true,
        }
    }
}

/// Configuration for a `PermissionRegistry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitConfig {
    /// App name used in the pre-permission alert title
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Alert presentation defaults
    #[serde(default)]
    pub alerts: AlertDefaults,
}

fn default_app_name() -> String {
    "This app".to_string()
}

impl KitConfig {
    /// Create a configuration for an app
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            alerts: AlertDefaults::default(),
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> PermissionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> PermissionResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Check the configuration for obvious mistakes
    pub fn validate(&self) -> PermissionResult<()> {
        if self.app_name.trim().is_empty() {
            return Err(PermissionError::InvalidConfig(
                "app_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_pre_permission_alert(mut self, enabled: bool) -> Self {
        self.alerts.pre_permission = enabled;
        self
    }

    pub fn with_denied_alert(mut self, enabled: bool) -> Self {
        self.alerts.denied = enabled;
        self
    }

    pub fn with_disabled_alert(mut self, enabled: bool) -> Self {
        self.alerts.disabled = enabled;
        self
    }
}

impl Default for KitConfig {
    fn default() -> Self {
        Self::new(default_app_name())
    }
}
