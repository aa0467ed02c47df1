//! Settings Escape Demo
//!
//! Walks two permissions through the request flow against a simulated
//! platform:
//! - Camera starts undecided and goes through the pre-permission alert
//! - Contacts starts denied, escapes to Settings and is re-checked on return
//!
//! Run with:
//!   cargo run --example settings_escape
//!   RUST_LOG=debug cargo run --example settings_escape

use std::sync::{Arc, Mutex};

use anyhow::Result;

use permission_kit::{
    alerts::{ActionRole, AlertPresenter, AlertReply, AlertSpec},
    config::KitConfig,
    logging::init_logging,
    permissions::{PermissionRegistry, PermissionSet},
    resolvers::{Callback, DomainResolver, ResolverTable},
    runtime::{Environment, MainQueue, NotificationCenter, SettingsOpener},
    Domain, DomainKind, Status,
};

/// Platform stand-in: the dialog always grants
#[derive(Clone)]
struct SimulatedPlatform {
    status: Arc<Mutex<Status>>,
}

impl SimulatedPlatform {
    fn new(status: Status) -> Self {
        Self {
            status: Arc::new(Mutex::new(status)),
        }
    }

    fn set(&self, status: Status) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }
}

impl DomainResolver for SimulatedPlatform {
    fn status(&self, _domain: &Domain) -> Status {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn request(&self, domain: &Domain, done: Callback) {
        println!("[system] {} dialog: Allow", domain.display_name());
        self.set(Status::Authorized);
        done(Status::Authorized);
    }
}

/// Prints the alert and taps its last action
struct ConsolePresenter;

impl AlertPresenter for ConsolePresenter {
    fn present(&self, alert: AlertSpec, reply: AlertReply) {
        println!("[alert] {}", alert.title);
        println!("        {}", alert.message);

        let tapped = alert.actions.last().map(|a| a.role).unwrap_or(ActionRole::Cancel);
        if let Some(action) = alert.action(tapped) {
            println!("        tapping \"{}\"", action.title);
        }
        reply.respond(tapped);
    }
}

/// Settings app stand-in: the user flips the switch and comes back
struct SimulatedSettings {
    contacts: SimulatedPlatform,
    center: Arc<NotificationCenter>,
}

impl SettingsOpener for SimulatedSettings {
    fn open_settings(&self) {
        println!("[settings] enabling Contacts");
        self.contacts.set(Status::Authorized);
        self.center.post_did_become_active();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let camera = SimulatedPlatform::new(Status::NotDetermined);
    let contacts = SimulatedPlatform::new(Status::Denied);
    let center = Arc::new(NotificationCenter::new());

    let env = Environment::new(MainQueue::spawn())
        .with_presenter(Arc::new(ConsolePresenter))
        .with_lifecycle(center.clone())
        .with_settings(Arc::new(SimulatedSettings {
            contacts: contacts.clone(),
            center,
        }));

    let resolvers = ResolverTable::new()
        .with(DomainKind::Camera, camera)
        .with(DomainKind::Contacts, contacts);

    let registry = PermissionRegistry::new(resolvers, env)
        .with_config(KitConfig::new("Demo").with_pre_permission_alert(true));

    let set = PermissionSet::new([
        registry.get(&Domain::Camera)?,
        registry.get(&Domain::Contacts)?,
    ]);
    println!("{}\n", set);

    for domain in [Domain::Camera, Domain::Contacts] {
        let status = registry.get(&domain)?.request_async().await;
        match status {
            Some(status) => println!("{} -> {}\n", domain, status),
            None => println!("{} -> no result\n", domain),
        }
    }

    println!("{}", set);
    Ok(())
}
