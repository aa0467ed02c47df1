//! Permission registry
//!
//! Holds the one `Permission` per domain. Entities are created on first
//! access and live as long as the registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::alerts::{AlertCopy, AlertKind};
use crate::config::KitConfig;
use crate::core::{PermissionResult, Status};
use crate::domain::{Domain, DomainKind};
use crate::resolvers::ResolverTable;
use crate::runtime::Environment;

use super::permission::Permission;

/// Lazily-populated table of permission entities
pub struct PermissionRegistry {
    resolvers: ResolverTable,
    env: Environment,
    config: KitConfig,
    permissions: RwLock<HashMap<DomainKind, Arc<Permission>>>,
}

impl PermissionRegistry {
    pub fn new(resolvers: ResolverTable, env: Environment) -> Self {
        Self {
            resolvers,
            env,
            config: KitConfig::default(),
            permissions: RwLock::new(HashMap::new()),
        }
    }

    /// Use `config` for permissions created from now on
    pub fn with_config(mut self, config: KitConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the permission for a domain, creating it on first access
    ///
    /// Fails with `UnsupportedDomain` when no resolver was linked in for the
    /// domain. The notification options of an existing entity are kept; a
    /// different payload on later lookups is ignored.
    pub fn get(&self, domain: &Domain) -> PermissionResult<Arc<Permission>> {
        let kind = domain.kind();

        {
            let permissions = self.permissions.read().unwrap_or_else(|e| e.into_inner());
            if let Some(permission) = permissions.get(&kind) {
                Self::check_payload(permission, domain);
                return Ok(Arc::clone(permission));
            }
        }

        let resolver = self.resolvers.get(kind)?;

        let mut permissions = self.permissions.write().unwrap_or_else(|e| e.into_inner());
        // Another thread may have won the race between the two locks
        if let Some(permission) = permissions.get(&kind) {
            Self::check_payload(permission, domain);
            return Ok(Arc::clone(permission));
        }

        tracing::debug!(domain = %kind, "Creating permission");
        let permission = Permission::new(domain.clone(), resolver, self.env.clone(), &self.config);
        permissions.insert(kind, Arc::clone(&permission));
        Ok(permission)
    }

    fn check_payload(existing: &Permission, requested: &Domain) {
        if existing.domain().notification_options() != requested.notification_options() {
            tracing::debug!(
                domain = %requested,
                "Permission already exists with different options, keeping the first"
            );
        }
    }

    /// Current status of a domain
    pub fn status(&self, domain: &Domain) -> PermissionResult<Status> {
        Ok(self.get(domain)?.status())
    }

    /// Request a domain; see `Permission::request`
    pub fn request<F>(&self, domain: &Domain, callback: F) -> PermissionResult<()>
    where
        F: FnOnce(Status) + Send + 'static,
    {
        self.get(domain)?.request(callback);
        Ok(())
    }

    /// Customize the alert a status would show for a domain
    ///
    /// Returns `false` for `Authorized`, which has no alert.
    pub fn configure_alert<F>(&self, status: Status, domain: &Domain, configure: F) -> PermissionResult<bool>
    where
        F: FnOnce(&mut AlertCopy),
    {
        let permission = self.get(domain)?;
        match AlertKind::for_status(status) {
            Some(kind) => {
                permission.configure_alert(kind, configure);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Check if the entity for a domain has been created
    pub fn contains(&self, kind: DomainKind) -> bool {
        self.permissions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&kind)
    }

    /// Number of created entities
    pub fn len(&self) -> usize {
        self.permissions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entity
    ///
    /// Permissions already handed out keep working but are no longer the
    /// registry's instance.
    pub fn reset(&self) {
        self.permissions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn resolvers(&self) -> &ResolverTable {
        &self.resolvers
    }
}

impl std::fmt::Debug for PermissionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionRegistry")
            .field("resolvers", &self.resolvers)
            .field("permissions", &self.len())
            .finish()
    }
}
