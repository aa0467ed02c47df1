//! Alert presentation
//!
//! A presenter shows an `AlertSpec` and, when the user taps a button,
//! answers through the `AlertReply` it was given. The reply is consumed by
//! answering, so an alert can resolve at most once.

use std::sync::Arc;

use crate::permissions::Permission;

use super::alert::{ActionRole, AlertKind, AlertSpec};

/// Shows alerts on behalf of permissions
///
/// Always called on the main loop.
pub trait AlertPresenter: Send + Sync {
    fn present(&self, alert: AlertSpec, reply: AlertReply);
}

/// One-shot answer channel for a presented alert
///
/// Dropping the reply without answering leaves the request unresolved.
pub struct AlertReply {
    permission: Arc<Permission>,
    kind: AlertKind,
}

impl AlertReply {
    pub(crate) fn new(permission: Arc<Permission>, kind: AlertKind) -> Self {
        Self { permission, kind }
    }

    /// The kind of alert being answered
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    /// The permission the alert was shown for
    pub fn permission(&self) -> &Arc<Permission> {
        &self.permission
    }

    /// Answer with the tapped action
    ///
    /// A role the alert does not offer is treated as cancel.
    pub fn respond(self, role: ActionRole) {
        let role = if self.kind.offers(role) {
            role
        } else {
            tracing::warn!(kind = %self.kind, ?role, "Alert does not offer this action, cancelling");
            ActionRole::Cancel
        };

        self.permission.handle_alert_action(self.kind, role);
    }

    pub fn cancel(self) {
        self.respond(ActionRole::Cancel)
    }
}

impl std::fmt::Debug for AlertReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertReply")
            .field("domain", &self.permission.domain().kind())
            .field("kind", &self.kind)
            .finish()
    }
}

/// Presenter for headless hosts: every alert is dismissed right away
#[derive(Debug, Default, Clone, Copy)]
pub struct DismissingPresenter;

impl AlertPresenter for DismissingPresenter {
    fn present(&self, alert: AlertSpec, reply: AlertReply) {
        tracing::debug!(domain = %alert.domain, kind = %alert.kind, "Dismissing alert without UI");
        reply.cancel();
    }
}
