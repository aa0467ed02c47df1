//! Scripted collaborators for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::alerts::{AlertPresenter, AlertReply, AlertSpec};
use crate::config::KitConfig;
use crate::core::Status;
use crate::domain::{Domain, DomainKind};
use crate::permissions::{Permission, PermissionRegistry, PermissionSet, PermissionSetDelegate};
use crate::resolvers::{Callback, DomainResolver, ResolverTable};
use crate::runtime::{create_main_queue, Environment, MainLoop, NotificationCenter, SettingsOpener};

/// Resolver whose platform state and dialog outcome are driven by the test
#[derive(Clone)]
pub struct ScriptedResolver {
    inner: Arc<ScriptedInner>,
}

struct ScriptedInner {
    status: Mutex<Status>,
    pending: Mutex<VecDeque<Callback>>,
    requests: AtomicUsize,
    status_reads: AtomicUsize,
}

impl ScriptedResolver {
    pub fn new(status: Status) -> Self {
        Self {
            inner: Arc::new(ScriptedInner {
                status: Mutex::new(status),
                pending: Mutex::new(VecDeque::new()),
                requests: AtomicUsize::new(0),
                status_reads: AtomicUsize::new(0),
            }),
        }
    }

    /// Change the platform state behind the app's back
    pub fn set_status(&self, status: Status) {
        *self.inner.status.lock().unwrap() = status;
    }

    /// Answer the oldest open system dialog
    pub fn resolve(&self, status: Status) -> bool {
        self.set_status(status);
        let callback = self.inner.pending.lock().unwrap().pop_front();
        match callback {
            Some(callback) => {
                callback(status);
                true
            }
            None => false,
        }
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.load(Ordering::SeqCst)
    }

    pub fn status_reads(&self) -> usize {
        self.inner.status_reads.load(Ordering::SeqCst)
    }
}

impl DomainResolver for ScriptedResolver {
    fn status(&self, _domain: &Domain) -> Status {
        self.inner.status_reads.fetch_add(1, Ordering::SeqCst);
        *self.inner.status.lock().unwrap()
    }

    fn request(&self, _domain: &Domain, done: Callback) {
        self.inner.requests.fetch_add(1, Ordering::SeqCst);
        self.inner.pending.lock().unwrap().push_back(done);
    }
}

/// Presenter that keeps every alert for the test to answer
#[derive(Default)]
pub struct RecordingPresenter {
    shown: Mutex<Vec<AlertSpec>>,
    replies: Mutex<VecDeque<AlertReply>>,
}

impl RecordingPresenter {
    pub fn shown(&self) -> Vec<AlertSpec> {
        self.shown.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }

    /// Take the oldest unanswered alert
    pub fn next_reply(&self) -> Option<AlertReply> {
        self.replies.lock().unwrap().pop_front()
    }
}

impl AlertPresenter for RecordingPresenter {
    fn present(&self, alert: AlertSpec, reply: AlertReply) {
        self.shown.lock().unwrap().push(alert);
        self.replies.lock().unwrap().push_back(reply);
    }
}

#[derive(Default)]
pub struct RecordingSettings {
    opened: AtomicUsize,
}

impl RecordingSettings {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl SettingsOpener for RecordingSettings {
    fn open_settings(&self) {
        self.opened.fetch_add(1, Ordering::SeqCst);
    }
}

/// Delegate that logs every hook as ("will" | "did", domain)
#[derive(Default)]
pub struct RecordingDelegate {
    events: Mutex<Vec<(&'static str, DomainKind)>>,
}

impl RecordingDelegate {
    pub fn events(&self) -> Vec<(&'static str, DomainKind)> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, hook: &str, kind: DomainKind) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(h, k)| *h == hook && *k == kind)
            .count()
    }
}

impl PermissionSetDelegate for RecordingDelegate {
    fn will_request(&self, _set: &PermissionSet, permission: &Arc<Permission>) {
        self.events
            .lock()
            .unwrap()
            .push(("will", permission.domain().kind()));
    }

    fn did_request(&self, _set: &PermissionSet, permission: &Arc<Permission>) {
        self.events
            .lock()
            .unwrap()
            .push(("did", permission.domain().kind()));
    }
}

/// Collects every status delivered to a callback
#[derive(Clone, Default)]
pub struct Completions {
    seen: Arc<Mutex<Vec<Status>>>,
}

impl Completions {
    pub fn callback(&self) -> impl FnOnce(Status) + Send + 'static {
        let seen = self.seen.clone();
        move |status| seen.lock().unwrap().push(status)
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.seen.lock().unwrap().clone()
    }
}

/// A registry wired to recording collaborators and a hand-pumped main loop
pub struct Harness {
    pub registry: PermissionRegistry,
    pub main_loop: MainLoop,
    pub presenter: Arc<RecordingPresenter>,
    pub center: Arc<NotificationCenter>,
    pub settings: Arc<RecordingSettings>,
}

impl Harness {
    pub fn new(resolvers: ResolverTable) -> Self {
        Self::with_config(resolvers, KitConfig::new("Demo"))
    }

    pub fn with_config(resolvers: ResolverTable, config: KitConfig) -> Self {
        let (queue, main_loop) = create_main_queue();
        let presenter = Arc::new(RecordingPresenter::default());
        let center = Arc::new(NotificationCenter::new());
        let settings = Arc::new(RecordingSettings::default());

        let env = Environment::new(queue)
            .with_presenter(presenter.clone())
            .with_lifecycle(center.clone())
            .with_settings(settings.clone());

        Self {
            registry: PermissionRegistry::new(resolvers, env).with_config(config),
            main_loop,
            presenter,
            center,
            settings,
        }
    }

    /// Run everything queued on the main loop
    pub fn drain(&mut self) -> usize {
        self.main_loop.drain()
    }

    pub fn permission(&self, domain: Domain) -> Arc<Permission> {
        self.registry.get(&domain).unwrap()
    }
}
