//! Permission entity
//!
//! One `Permission` exists per domain (see `PermissionRegistry`). It never
//! caches the status: every read goes to the domain's resolver. What it does
//! keep is the state of the current request:
//!
//! - a single pending callback slot (last writer wins, read-then-clear on delivery)
//! - the settings-return subscription, if the user escaped to Settings
//! - back-references to the sets that contain it
//!
//! ## Request flow
//!
//! | Status | Alert enabled | Alert disabled |
//! |--------|---------------|----------------|
//! | authorized | - | deliver |
//! | not determined | pre-permission alert, then system dialog | system dialog |
//! | denied | denied alert (Settings escape) | deliver |
//! | disabled | disabled alert | deliver |
//!
//! Delivery always happens on the main loop, followed by the "did request"
//! notification to every containing set.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};

use tokio::sync::oneshot;

use crate::alerts::{ActionRole, AlertCopy, AlertKind, AlertReply};
use crate::config::{AlertDefaults, KitConfig};
use crate::core::Status;
use crate::domain::Domain;
use crate::resolvers::{Callback, DomainResolver};
use crate::runtime::{Environment, Subscription};

/// Receives request lifecycle notifications from a permission
///
/// Both hooks run on the main loop.
pub trait PermissionObserver: Send + Sync {
    /// The permission is about to be requested
    fn will_request(&self, permission: &Arc<Permission>);

    /// A request finished and its callback has been invoked
    fn did_request(&self, permission: &Arc<Permission>);
}

/// State of the in-flight request
#[derive(Default)]
struct RequestState {
    /// Callback of the most recent `request` call
    pending: Option<Callback>,

    /// Bumped by every `request` call
    cycle: u64,

    /// Waiting for the app to come back from Settings
    settings_return: Option<Subscription>,
}

/// Alert copy (lazily created) and auto-presentation flags
struct AlertState {
    copies: HashMap<AlertKind, AlertCopy>,
    presents: AlertDefaults,
}

/// The consent lifecycle of one domain
pub struct Permission {
    domain: Domain,
    resolver: Arc<dyn DomainResolver>,
    env: Environment,
    app_name: String,
    request: Mutex<RequestState>,
    alerts: Mutex<AlertState>,
    observers: RwLock<Vec<Weak<dyn PermissionObserver>>>,
}

impl Permission {
    /// Create a permission
    ///
    /// This is typically called by `PermissionRegistry::get()`, not directly.
    pub fn new(
        domain: Domain,
        resolver: Arc<dyn DomainResolver>,
        env: Environment,
        config: &KitConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            domain,
            resolver,
            env,
            app_name: config.app_name.clone(),
            request: Mutex::new(RequestState::default()),
            alerts: Mutex::new(AlertState {
                copies: HashMap::new(),
                presents: config.alerts,
            }),
            observers: RwLock::new(Vec::new()),
        })
    }

    /// The permission domain
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The current status, read from the platform
    pub fn status(&self) -> Status {
        self.resolver.status(&self.domain)
    }

    // =========================================================================
    // Requesting
    // =========================================================================

    /// Request the permission
    ///
    /// Returns immediately. `callback` is invoked on the main loop once the
    /// request resolves, unless a later `request` replaces it first or the
    /// domain's usage description is missing (then it is never invoked).
    pub fn request<F>(self: &Arc<Self>, callback: F)
    where
        F: FnOnce(Status) + Send + 'static,
    {
        let stale_subscription = {
            let mut state = self.lock_request();
            if state.pending.is_some() {
                tracing::debug!(domain = %self.domain, "Replacing pending request callback");
            }
            state.pending = Some(Box::new(callback));
            state.cycle += 1;
            state.settings_return.take()
        };

        if let Some(subscription) = stale_subscription {
            self.env.lifecycle().unsubscribe(&subscription);
        }

        self.notify_will_request();

        let status = self.status();
        tracing::info!(domain = %self.domain, %status, "Requesting permission");

        match status {
            Status::Authorized => self.deliver(),
            Status::NotDetermined => {
                if self.presents_alert(AlertKind::PrePermission) {
                    self.present_alert(AlertKind::PrePermission);
                } else {
                    self.request_authorization();
                }
            }
            Status::Denied => {
                if self.presents_alert(AlertKind::Denied) {
                    self.present_alert(AlertKind::Denied);
                } else {
                    self.deliver();
                }
            }
            Status::Disabled => {
                if self.presents_alert(AlertKind::Disabled) {
                    self.present_alert(AlertKind::Disabled);
                } else {
                    self.deliver();
                }
            }
        }
    }

    /// Request the permission and wait for the result
    ///
    /// Resolves to `None` if the callback was replaced by a later request.
    /// Needs a running main loop.
    pub async fn request_async(self: &Arc<Self>) -> Option<Status> {
        let (tx, rx) = oneshot::channel();
        self.request(move |status| {
            // Receiver gone means the caller stopped waiting
            let _ = tx.send(status);
        });
        rx.await.ok()
    }

    /// Check if a request callback is waiting for delivery
    pub fn has_pending_request(&self) -> bool {
        self.lock_request().pending.is_some()
    }

    /// Check if the permission is waiting for the app to return from Settings
    pub fn is_awaiting_settings_return(&self) -> bool {
        self.lock_request().settings_return.is_some()
    }

    /// Show the system consent dialog through the resolver
    fn request_authorization(self: &Arc<Self>) {
        if let Some(key) = self.domain.usage_description_key() {
            if !self.env.manifest().declares(key) {
                tracing::warn!(
                    domain = %self.domain,
                    key,
                    "Usage description missing from app manifest, request skipped"
                );
                return;
            }
        }

        tracing::debug!(domain = %self.domain, "Showing system dialog");

        let this = Arc::clone(self);
        self.resolver.request(
            &self.domain,
            Box::new(move |status| {
                tracing::debug!(domain = %this.domain, %status, "System dialog finished");
                this.deliver();
            }),
        );
    }

    /// Invoke the pending callback on the main loop, then notify sets
    ///
    /// The status is read fresh when the job runs.
    fn deliver(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.env.main_queue().post("deliver", move || {
            let status = this.status();
            let callback = this.lock_request().pending.take();

            let Some(callback) = callback else {
                tracing::debug!(domain = %this.domain, %status, "No pending callback, result dropped");
                return;
            };

            tracing::info!(domain = %this.domain, %status, "Permission request finished");
            callback(status);

            for observer in this.observers() {
                observer.did_request(&this);
            }
        });
    }

    fn notify_will_request(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.env.main_queue().post("will_request", move || {
            for observer in this.observers() {
                observer.will_request(&this);
            }
        });
    }

    // =========================================================================
    // Alerts
    // =========================================================================

    /// Whether `request` shows this alert automatically
    pub fn presents_alert(&self, kind: AlertKind) -> bool {
        self.lock_alerts().presents.presents(kind)
    }

    /// Turn automatic presentation of an alert on or off
    pub fn set_presents_alert(&self, kind: AlertKind, enabled: bool) {
        let mut alerts = self.lock_alerts();
        match kind {
            AlertKind::PrePermission => alerts.presents.pre_permission = enabled,
            AlertKind::Denied => alerts.presents.denied = enabled,
            AlertKind::Disabled => alerts.presents.disabled = enabled,
        }
    }

    /// Current copy for an alert
    pub fn alert_copy(&self, kind: AlertKind) -> AlertCopy {
        let mut alerts = self.lock_alerts();
        self.copy_entry(&mut alerts, kind).clone()
    }

    /// Customize the copy of an alert
    ///
    /// ```ignore
    /// camera.configure_alert(AlertKind::Denied, |alert| {
    ///     alert.title = "No camera access".into();
    ///     alert.settings = Some("Open Settings".into());
    /// });
    /// ```
    pub fn configure_alert<F>(&self, kind: AlertKind, configure: F)
    where
        F: FnOnce(&mut AlertCopy),
    {
        let mut alerts = self.lock_alerts();
        configure(self.copy_entry(&mut alerts, kind));
    }

    fn copy_entry<'a>(&self, alerts: &'a mut AlertState, kind: AlertKind) -> &'a mut AlertCopy {
        alerts
            .copies
            .entry(kind)
            .or_insert_with(|| AlertCopy::defaults(kind, &self.domain, &self.app_name))
    }

    fn present_alert(self: &Arc<Self>, kind: AlertKind) {
        let spec = self.alert_copy(kind).spec(kind, &self.domain);
        let reply = AlertReply::new(Arc::clone(self), kind);
        let presenter = Arc::clone(self.env.presenter());

        tracing::info!(domain = %self.domain, %kind, "Presenting alert");

        self.env
            .main_queue()
            .post("present_alert", move || presenter.present(spec, reply));
    }

    /// Called by `AlertReply` when the user taps an action
    pub(crate) fn handle_alert_action(self: &Arc<Self>, kind: AlertKind, role: ActionRole) {
        tracing::debug!(domain = %self.domain, %kind, ?role, "Alert answered");

        match role {
            ActionRole::Cancel => self.deliver(),
            ActionRole::Confirm => self.request_authorization(),
            ActionRole::Settings => self.open_settings(),
        }
    }

    // =========================================================================
    // Settings escape
    // =========================================================================

    /// Open Settings and re-check once the app is foregrounded again
    fn open_settings(self: &Arc<Self>) {
        let cycle = self.lock_request().cycle;

        let weak = Arc::downgrade(self);
        let subscription = self.env.lifecycle().subscribe(Arc::new(move || {
            if let Some(permission) = weak.upgrade() {
                permission.returned_from_settings(cycle);
            }
        }));

        let previous = {
            let mut state = self.lock_request();
            if state.cycle != cycle {
                // A newer request started while we were subscribing
                drop(state);
                self.env.lifecycle().unsubscribe(&subscription);
                return;
            }
            state.settings_return.replace(subscription)
        };

        if let Some(previous) = previous {
            self.env.lifecycle().unsubscribe(&previous);
        }

        tracing::info!(domain = %self.domain, "Opening settings");
        self.env.settings().open_settings();
    }

    /// One-shot: only the first foreground event of the cycle delivers
    fn returned_from_settings(self: &Arc<Self>, cycle: u64) {
        let subscription = {
            let mut state = self.lock_request();
            if state.cycle != cycle {
                return;
            }
            state.settings_return.take()
        };

        if let Some(subscription) = subscription {
            self.env.lifecycle().unsubscribe(&subscription);
            tracing::info!(domain = %self.domain, "Returned from settings");
            self.deliver();
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register an observer for request notifications
    ///
    /// Only a weak reference is kept; dropped observers are skipped.
    pub fn add_observer(&self, observer: Weak<dyn PermissionObserver>) {
        let mut observers = self.observers.write().unwrap_or_else(|e| e.into_inner());
        observers.retain(|o| o.strong_count() > 0);
        if !observers.iter().any(|o| Weak::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Number of live observers
    pub fn observer_count(&self) -> usize {
        self.observers().len()
    }

    fn observers(&self) -> Vec<Arc<dyn PermissionObserver>> {
        self.observers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    fn lock_request(&self) -> MutexGuard<'_, RequestState> {
        self.request.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_alerts(&self) -> MutexGuard<'_, AlertState> {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.domain, self.status())
    }
}

impl std::fmt::Debug for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Permission")
            .field("domain", &self.domain)
            .field("pending", &self.has_pending_request())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeclaredKeys, DomainKind};
    use crate::permissions::PermissionRegistry;
    use crate::resolvers::{FlagPolicy, RequestFlagResolver, ResolverTable};
    use crate::runtime::{create_main_queue, MainQueue};
    use crate::store::{MemoryStore, PreferenceStore};
    use crate::testing::{Completions, Harness, ScriptedResolver};

    fn harness_with(kind: DomainKind, resolver: &ScriptedResolver) -> Harness {
        Harness::new(ResolverTable::new().with(kind, resolver.clone()))
    }

    #[test]
    fn test_authorized_delivers_without_ui() {
        for kind in [DomainKind::Camera, DomainKind::Contacts, DomainKind::Motion] {
            let resolver = ScriptedResolver::new(Status::Authorized);
            let mut h = harness_with(kind, &resolver);
            let permission = h.permission(Domain::from(kind));
            permission.set_presents_alert(AlertKind::PrePermission, true);

            let done = Completions::default();
            permission.request(done.callback());
            h.drain();

            assert_eq!(done.statuses(), vec![Status::Authorized]);
            assert_eq!(h.presenter.count(), 0);
            assert_eq!(resolver.request_count(), 0);
        }
    }

    #[test]
    fn test_camera_not_determined_goes_to_system_dialog() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let mut h = harness_with(DomainKind::Camera, &resolver);
        let camera = h.permission(Domain::Camera);

        let done = Completions::default();
        camera.request(done.callback());
        h.drain();

        assert_eq!(resolver.request_count(), 1);
        assert!(done.statuses().is_empty());

        assert!(resolver.resolve(Status::Authorized));
        // Delivery goes through the main loop
        assert!(done.statuses().is_empty());
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Authorized]);
        assert_eq!(resolver.request_count(), 1);
        assert_eq!(h.presenter.count(), 0);
        assert!(!camera.has_pending_request());
    }

    #[test]
    fn test_delivered_status_is_read_at_delivery() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let mut h = harness_with(DomainKind::Microphone, &resolver);
        let microphone = h.permission(Domain::Microphone);

        let done = Completions::default();
        microphone.request(done.callback());
        resolver.resolve(Status::Denied);
        // Platform state moves on before the main loop runs
        resolver.set_status(Status::Authorized);
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Authorized]);
    }

    #[test]
    fn test_contacts_denied_settings_escape() {
        let resolver = ScriptedResolver::new(Status::Denied);
        let mut h = harness_with(DomainKind::Contacts, &resolver);
        let contacts = h.permission(Domain::Contacts);

        let done = Completions::default();
        contacts.request(done.callback());
        assert!(done.statuses().is_empty());
        h.drain();

        let shown = h.presenter.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, AlertKind::Denied);
        assert!(shown[0].action(ActionRole::Settings).is_some());
        assert!(done.statuses().is_empty());

        h.presenter.next_reply().unwrap().respond(ActionRole::Settings);
        h.drain();
        assert_eq!(h.settings.opened(), 1);
        assert!(contacts.is_awaiting_settings_return());
        assert!(done.statuses().is_empty());

        // User flips the switch in Settings, then comes back
        resolver.set_status(Status::Authorized);
        assert_eq!(h.center.post_did_become_active(), 1);
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Authorized]);
        assert!(!contacts.is_awaiting_settings_return());

        assert_eq!(h.center.post_did_become_active(), 0);
        h.drain();
        assert_eq!(done.statuses(), vec![Status::Authorized]);
        assert_eq!(h.center.subscriber_count(), 0);
    }

    #[test]
    fn test_denied_cancel_delivers_current_status() {
        let resolver = ScriptedResolver::new(Status::Denied);
        let mut h = harness_with(DomainKind::Photos, &resolver);
        let photos = h.permission(Domain::Photos);

        let done = Completions::default();
        photos.request(done.callback());
        h.drain();

        h.presenter.next_reply().unwrap().cancel();
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Denied]);
        assert_eq!(h.settings.opened(), 0);
    }

    #[test]
    fn test_denied_without_alert_delivers_immediately() {
        let resolver = ScriptedResolver::new(Status::Denied);
        let mut h = Harness::with_config(
            ResolverTable::new().with(DomainKind::Contacts, resolver.clone()),
            KitConfig::new("Demo").with_denied_alert(false),
        );
        let contacts = h.permission(Domain::Contacts);

        let done = Completions::default();
        contacts.request(done.callback());
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Denied]);
        assert_eq!(h.presenter.count(), 0);
    }

    #[test]
    fn test_disabled_alert_is_informational() {
        let resolver = ScriptedResolver::new(Status::Disabled);
        let mut h = harness_with(DomainKind::LocationWhenInUse, &resolver);
        let location = h.permission(Domain::LocationWhenInUse);

        let done = Completions::default();
        location.request(done.callback());
        h.drain();

        let shown = h.presenter.shown();
        assert_eq!(shown[0].kind, AlertKind::Disabled);
        assert_eq!(shown[0].title, "Location is currently disabled");
        assert!(shown[0].action(ActionRole::Settings).is_none());

        // A presenter asking for Settings anyway is treated as cancel
        h.presenter.next_reply().unwrap().respond(ActionRole::Settings);
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Disabled]);
        assert_eq!(h.settings.opened(), 0);
    }

    #[test]
    fn test_disabled_without_alert() {
        let resolver = ScriptedResolver::new(Status::Disabled);
        let mut h = harness_with(DomainKind::Bluetooth, &resolver);
        let bluetooth = h.permission(Domain::Bluetooth);
        bluetooth.set_presents_alert(AlertKind::Disabled, false);

        let done = Completions::default();
        bluetooth.request(done.callback());
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Disabled]);
        assert_eq!(h.presenter.count(), 0);
    }

    #[test]
    fn test_pre_permission_confirm_then_system_dialog() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let mut h = harness_with(DomainKind::Camera, &resolver);
        let camera = h.permission(Domain::Camera);
        camera.set_presents_alert(AlertKind::PrePermission, true);

        let done = Completions::default();
        camera.request(done.callback());
        h.drain();

        assert_eq!(resolver.request_count(), 0);
        let shown = h.presenter.shown();
        assert_eq!(shown[0].kind, AlertKind::PrePermission);
        assert_eq!(shown[0].title, "Demo would like to access your Camera");

        h.presenter.next_reply().unwrap().respond(ActionRole::Confirm);
        assert_eq!(resolver.request_count(), 1);

        resolver.resolve(Status::Authorized);
        h.drain();
        assert_eq!(done.statuses(), vec![Status::Authorized]);
    }

    #[test]
    fn test_pre_permission_cancel_leaves_status_unchanged() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let mut h = Harness::with_config(
            ResolverTable::new().with(DomainKind::Camera, resolver.clone()),
            KitConfig::new("Demo").with_pre_permission_alert(true),
        );
        let camera = h.permission(Domain::Camera);

        let done = Completions::default();
        camera.request(done.callback());
        h.drain();
        h.presenter.next_reply().unwrap().cancel();
        h.drain();

        assert_eq!(done.statuses(), vec![Status::NotDetermined]);
        assert_eq!(resolver.request_count(), 0);
    }

    #[test]
    fn test_configured_alert_copy_is_presented() {
        let resolver = ScriptedResolver::new(Status::Denied);
        let mut h = harness_with(DomainKind::Contacts, &resolver);
        let contacts = h.permission(Domain::Contacts);

        contacts.configure_alert(AlertKind::Denied, |alert| {
            alert.title = "No contacts".into();
            alert.settings = Some("Fix it".into());
        });

        contacts.request(|_| {});
        h.drain();

        let shown = h.presenter.shown();
        assert_eq!(shown[0].title, "No contacts");
        assert_eq!(shown[0].action(ActionRole::Settings).unwrap().title, "Fix it");
        assert_eq!(contacts.alert_copy(AlertKind::Denied).cancel, "Cancel");
    }

    #[test]
    fn test_last_writer_wins() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let mut h = harness_with(DomainKind::Camera, &resolver);
        let camera = h.permission(Domain::Camera);

        let first = Completions::default();
        let second = Completions::default();
        camera.request(first.callback());
        camera.request(second.callback());
        h.drain();

        assert_eq!(resolver.request_count(), 2);

        resolver.resolve(Status::Authorized);
        resolver.resolve(Status::Authorized);
        h.drain();

        assert!(first.statuses().is_empty());
        assert_eq!(second.statuses(), vec![Status::Authorized]);
    }

    #[test]
    fn test_new_request_disposes_settings_subscription() {
        let resolver = ScriptedResolver::new(Status::Denied);
        let mut h = harness_with(DomainKind::Contacts, &resolver);
        let contacts = h.permission(Domain::Contacts);

        let first = Completions::default();
        contacts.request(first.callback());
        h.drain();
        h.presenter.next_reply().unwrap().respond(ActionRole::Settings);
        assert_eq!(h.center.subscriber_count(), 1);

        let second = Completions::default();
        contacts.request(second.callback());
        assert_eq!(h.center.subscriber_count(), 0);

        h.center.post_did_become_active();
        h.drain();

        assert!(first.statuses().is_empty());
        assert!(second.statuses().is_empty());
        assert_eq!(h.presenter.count(), 2);
    }

    #[test]
    fn test_status_is_read_fresh_and_idempotent() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let h = harness_with(DomainKind::Reminders, &resolver);
        let reminders = h.permission(Domain::Reminders);

        assert_eq!(reminders.status(), reminders.status());
        assert_eq!(resolver.status_reads(), 2);

        resolver.set_status(Status::Denied);
        assert_eq!(reminders.status(), Status::Denied);
        assert_eq!(resolver.request_count(), 0);
    }

    #[test]
    fn test_motion_uses_persisted_result() {
        let platform = ScriptedResolver::new(Status::NotDetermined);
        let store = Arc::new(MemoryStore::new());
        let resolvers = ResolverTable::new().with(
            DomainKind::Motion,
            RequestFlagResolver::new(platform.clone(), store.clone()),
        );
        let mut h = Harness::new(resolvers);
        let motion = h.permission(Domain::Motion);

        assert!(!store.flag("permission.requestedMotion"));
        assert_eq!(motion.status(), Status::NotDetermined);
        assert_eq!(platform.status_reads(), 0);

        let done = Completions::default();
        motion.request(done.callback());
        platform.resolve(Status::Authorized);
        h.drain();

        assert_eq!(done.statuses(), vec![Status::Authorized]);
        assert!(store.flag("permission.requestedMotion"));

        // Platform forgets; the persisted result still answers
        platform.set_status(Status::NotDetermined);
        assert_eq!(motion.status(), Status::Authorized);

        let again = Completions::default();
        motion.request(again.callback());
        h.drain();

        assert_eq!(again.statuses(), vec![Status::Authorized]);
        assert_eq!(platform.request_count(), 1);
    }

    #[test]
    fn test_query_after_request_policy() {
        let platform = ScriptedResolver::new(Status::Denied);
        let store = Arc::new(MemoryStore::new());
        let resolvers = ResolverTable::new().with(
            DomainKind::Notifications,
            RequestFlagResolver::new(platform.clone(), store)
                .with_policy(FlagPolicy::QueryAfterRequest),
        );
        let h = Harness::new(resolvers);
        let notifications = h.permission(Domain::notifications());

        assert_eq!(notifications.status(), Status::NotDetermined);
    }

    #[test]
    fn test_missing_usage_description_skips_request() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let (queue, mut main_loop) = create_main_queue();
        let env = Environment::new(queue)
            .with_manifest(Arc::new(DeclaredKeys::new().with_key("NSMicrophoneUsageDescription")));
        let registry = PermissionRegistry::new(
            ResolverTable::new()
                .with(DomainKind::Camera, resolver.clone())
                .with(DomainKind::Microphone, resolver.clone()),
            env,
        );

        let done = Completions::default();
        registry.get(&Domain::Camera).unwrap().request(done.callback());
        main_loop.drain();

        assert_eq!(resolver.request_count(), 0);
        assert!(done.statuses().is_empty());
        assert!(registry.get(&Domain::Camera).unwrap().has_pending_request());

        registry.get(&Domain::Microphone).unwrap().request(|_| {});
        assert_eq!(resolver.request_count(), 1);
    }

    #[test]
    fn test_display() {
        let resolver = ScriptedResolver::new(Status::Denied);
        let h = harness_with(DomainKind::Camera, &resolver);
        assert_eq!(h.permission(Domain::Camera).to_string(), "Camera: denied");
    }

    #[tokio::test]
    async fn test_request_async_with_spawned_loop() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let registry = PermissionRegistry::new(
            ResolverTable::new().with(DomainKind::SpeechRecognizer, resolver.clone()),
            Environment::new(MainQueue::spawn()),
        );
        let speech = registry.get(&Domain::SpeechRecognizer).unwrap();

        let waiter = {
            let speech = speech.clone();
            tokio::spawn(async move { speech.request_async().await })
        };

        while resolver.request_count() == 0 {
            tokio::task::yield_now().await;
        }
        resolver.resolve(Status::Authorized);

        assert_eq!(waiter.await.unwrap(), Some(Status::Authorized));
    }

    #[tokio::test]
    async fn test_request_async_replaced_resolves_none() {
        let resolver = ScriptedResolver::new(Status::NotDetermined);
        let registry = PermissionRegistry::new(
            ResolverTable::new().with(DomainKind::Siri, resolver.clone()),
            Environment::new(MainQueue::spawn()),
        );
        let siri = registry.get(&Domain::Siri).unwrap();

        let waiter = {
            let siri = siri.clone();
            tokio::spawn(async move { siri.request_async().await })
        };

        while resolver.request_count() == 0 {
            tokio::task::yield_now().await;
        }
        siri.request(|_| {});

        assert_eq!(waiter.await.unwrap(), None);
    }
}
