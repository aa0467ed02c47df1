//! Permission sets
//!
//! A `PermissionSet` groups permissions behind one status. Membership is
//! fixed when the set is built. The set observes each member and forwards
//! request notifications to an optional delegate.

use std::sync::{Arc, RwLock, Weak};

use crate::core::Status;
use crate::domain::DomainKind;

use super::permission::{Permission, PermissionObserver};

/// Request notifications for the members of a set
///
/// Both hooks run on the main loop. Override only what you need.
pub trait PermissionSetDelegate: Send + Sync {
    /// A member is about to be requested
    fn will_request(&self, _set: &PermissionSet, _permission: &Arc<Permission>) {}

    /// A member's request finished and its callback ran
    fn did_request(&self, _set: &PermissionSet, _permission: &Arc<Permission>) {}
}

/// Anything backed by a permission, e.g. a permission button
pub trait Permissionable {
    fn permission(&self) -> Arc<Permission>;
}

impl Permissionable for Arc<Permission> {
    fn permission(&self) -> Arc<Permission> {
        Arc::clone(self)
    }
}

impl<T: Permissionable + ?Sized> Permissionable for &T {
    fn permission(&self) -> Arc<Permission> {
        (**self).permission()
    }
}

/// Reduce statuses to the most blocking one (`Authorized` when empty)
///
/// Denied beats disabled, disabled beats not determined, and anything
/// beats authorized.
pub fn aggregate<I>(statuses: I) -> Status
where
    I: IntoIterator<Item = Status>,
{
    statuses
        .into_iter()
        .min_by_key(Status::precedence)
        .unwrap_or(Status::Authorized)
}

/// An immutable group of permissions with one aggregate status
pub struct PermissionSet {
    permissions: Vec<Arc<Permission>>,
    delegate: RwLock<Option<Weak<dyn PermissionSetDelegate>>>,
}

impl PermissionSet {
    /// Build a set from permissions or anything wrapping one
    ///
    /// Duplicate domains are kept once, in first-seen order.
    pub fn new<I, P>(members: I) -> Arc<Self>
    where
        I: IntoIterator<Item = P>,
        P: Permissionable,
    {
        let mut permissions: Vec<Arc<Permission>> = Vec::new();
        for member in members {
            let permission = member.permission();
            let kind = permission.domain().kind();
            if permissions.iter().any(|p| p.domain().kind() == kind) {
                tracing::debug!(domain = %kind, "Duplicate domain in permission set, ignoring");
                continue;
            }
            permissions.push(permission);
        }

        let set = Arc::new(Self {
            permissions,
            delegate: RwLock::new(None),
        });

        let weak = Arc::downgrade(&set);
        let observer: Weak<dyn PermissionObserver> = weak;
        for permission in &set.permissions {
            permission.add_observer(observer.clone());
        }

        set
    }

    /// The most blocking member status, read fresh
    pub fn status(&self) -> Status {
        aggregate(self.permissions.iter().map(|p| p.status()))
    }

    pub fn permissions(&self) -> &[Arc<Permission>] {
        &self.permissions
    }

    /// Member domains in insertion order
    pub fn domains(&self) -> Vec<DomainKind> {
        self.permissions.iter().map(|p| p.domain().kind()).collect()
    }

    pub fn contains(&self, kind: DomainKind) -> bool {
        self.permissions.iter().any(|p| p.domain().kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Set the delegate (held weakly)
    pub fn set_delegate<D: PermissionSetDelegate + 'static>(&self, delegate: &Arc<D>) {
        let weak = Arc::downgrade(delegate);
        let delegate: Weak<dyn PermissionSetDelegate> = weak;
        *self.delegate.write().unwrap_or_else(|e| e.into_inner()) = Some(delegate);
    }

    pub fn clear_delegate(&self) {
        *self.delegate.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn delegate(&self) -> Option<Arc<dyn PermissionSetDelegate>> {
        self.delegate
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .and_then(Weak::upgrade)
    }
}

impl PermissionObserver for PermissionSet {
    fn will_request(&self, permission: &Arc<Permission>) {
        if let Some(delegate) = self.delegate() {
            delegate.will_request(self, permission);
        }
    }

    fn did_request(&self, permission: &Arc<Permission>) {
        if let Some(delegate) = self.delegate() {
            delegate.did_request(self, permission);
        }
    }
}

impl std::fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: [", self.status())?;
        for permission in &self.permissions {
            writeln!(f, "\t{}", permission)?;
        }
        write!(f, "]")
    }
}

impl std::fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionSet")
            .field("domains", &self.domains())
            .field("has_delegate", &self.delegate().is_some())
            .finish()
    }
}
