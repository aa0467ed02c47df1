//! App lifecycle notifications
//!
//! The settings-escape flow waits for the app to come back to the
//! foreground. Subscriptions are explicit handles: whoever subscribes keeps
//! the handle and gives it back to unsubscribe.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

/// Handler invoked when the app returns to the foreground
pub type ForegroundHandler = Arc<dyn Fn() + Send + Sync>;

/// Handle for one foreground subscription
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: Uuid,
}

impl Subscription {
    fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Source of "app returned to foreground" events
pub trait LifecycleEvents: Send + Sync {
    /// Register a handler, returning its handle
    fn subscribe(&self, handler: ForegroundHandler) -> Subscription;

    /// Remove a handler; unknown handles are ignored
    fn unsubscribe(&self, subscription: &Subscription);
}

/// In-process lifecycle event center
///
/// The host calls [`post_did_become_active`](Self::post_did_become_active)
/// whenever the app is foregrounded.
#[derive(Default)]
pub struct NotificationCenter {
    handlers: RwLock<HashMap<Subscription, ForegroundHandler>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify every subscriber, returning how many were notified
    ///
    /// Handlers run without the registry lock held, so they may unsubscribe.
    pub fn post_did_become_active(&self) -> usize {
        let handlers: Vec<ForegroundHandler> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();

        tracing::debug!(subscribers = handlers.len(), "App did become active");

        for handler in &handlers {
            handler();
        }

        handlers.len()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl LifecycleEvents for NotificationCenter {
    fn subscribe(&self, handler: ForegroundHandler) -> Subscription {
        let subscription = Subscription::new();
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(subscription.clone(), handler);
        subscription
    }

    fn unsubscribe(&self, subscription: &Subscription) {
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(subscription);
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
