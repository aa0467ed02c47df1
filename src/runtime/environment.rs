//! Collaborators shared by every permission
//!
//! Use the builder pattern to wire in the host's collaborators:
//!
//! ```ignore
//! let env = Environment::new(MainQueue::spawn())
//!     .with_presenter(Arc::new(MyAlertPresenter::new()))
//!     .with_lifecycle(center.clone())
//!     .with_settings(Arc::new(OpenSettingsUrl))
//!     .with_manifest(Arc::new(DeclaredKeys::new().with_key("NSCameraUsageDescription")));
//! ```

use std::sync::Arc;

use crate::alerts::{AlertPresenter, DismissingPresenter};
use crate::domain::{PermissiveManifest, UsageManifest};

use super::lifecycle::{LifecycleEvents, NotificationCenter};
use super::main_queue::MainQueue;

/// Opens the system Settings app on the app's page
pub trait SettingsOpener: Send + Sync {
    fn open_settings(&self);
}

/// Settings opener for hosts without a Settings app
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSettingsApp;

impl SettingsOpener for NoSettingsApp {
    fn open_settings(&self) {
        tracing::debug!("No settings app to open");
    }
}

/// Collaborators used by permissions to deliver results and talk to the user
#[derive(Clone)]
pub struct Environment {
    main_queue: MainQueue,
    presenter: Arc<dyn AlertPresenter>,
    lifecycle: Arc<dyn LifecycleEvents>,
    settings: Arc<dyn SettingsOpener>,
    manifest: Arc<dyn UsageManifest>,
}

impl Environment {
    /// Create an environment with headless defaults
    ///
    /// Alerts are dismissed, every usage key counts as declared, and
    /// lifecycle events come from a private `NotificationCenter`.
    pub fn new(main_queue: MainQueue) -> Self {
        Self {
            main_queue,
            presenter: Arc::new(DismissingPresenter),
            lifecycle: Arc::new(NotificationCenter::new()),
            settings: Arc::new(NoSettingsApp),
            manifest: Arc::new(PermissiveManifest),
        }
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn AlertPresenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: Arc<dyn LifecycleEvents>) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_settings(mut self, settings: Arc<dyn SettingsOpener>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_manifest(mut self, manifest: Arc<dyn UsageManifest>) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn main_queue(&self) -> &MainQueue {
        &self.main_queue
    }

    pub fn presenter(&self) -> &Arc<dyn AlertPresenter> {
        &self.presenter
    }

    pub fn lifecycle(&self) -> &Arc<dyn LifecycleEvents> {
        &self.lifecycle
    }

    pub fn settings(&self) -> &Arc<dyn SettingsOpener> {
        &self.settings
    }

    pub fn manifest(&self) -> &Arc<dyn UsageManifest> {
        &self.manifest
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("main_queue", &self.main_queue)
            .finish_non_exhaustive()
    }
}
