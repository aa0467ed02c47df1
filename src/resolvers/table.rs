//! Resolver table
//!
//! Maps each domain to exactly one resolver. Domains without a linked
//! resolver are reported as unsupported instead of falling through.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{PermissionError, PermissionResult};
use crate::domain::DomainKind;

use super::resolver::DomainResolver;

/// Table of linked resolvers, keyed by domain identity
#[derive(Clone, Default)]
pub struct ResolverTable {
    resolvers: HashMap<DomainKind, Arc<dyn DomainResolver>>,
}

impl ResolverTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a resolver for a domain
    ///
    /// Replaces any resolver previously linked for the same domain.
    pub fn register<R: DomainResolver + 'static>(&mut self, kind: DomainKind, resolver: R) -> &mut Self {
        self.register_arc(kind, Arc::new(resolver))
    }

    /// Link a shared resolver for a domain
    ///
    /// Use this when one resolver serves several domains.
    pub fn register_arc(&mut self, kind: DomainKind, resolver: Arc<dyn DomainResolver>) -> &mut Self {
        if self.resolvers.insert(kind, resolver).is_some() {
            tracing::debug!(domain = %kind, "Replacing linked resolver");
        } else {
            tracing::info!(domain = %kind, "Linking resolver");
        }
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<R: DomainResolver + 'static>(mut self, kind: DomainKind, resolver: R) -> Self {
        self.register(kind, resolver);
        self
    }

    /// Get the resolver for a domain
    pub fn get(&self, kind: DomainKind) -> PermissionResult<Arc<dyn DomainResolver>> {
        self.resolvers
            .get(&kind)
            .cloned()
            .ok_or_else(|| PermissionError::unsupported(kind))
    }

    /// Check if a domain has a linked resolver
    pub fn supports(&self, kind: DomainKind) -> bool {
        self.resolvers.contains_key(&kind)
    }

    /// Domains with a linked resolver, sorted
    pub fn domains(&self) -> Vec<DomainKind> {
        let mut kinds: Vec<_> = self.resolvers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl std::fmt::Debug for ResolverTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverTable")
            .field("domains", &self.domains())
            .finish()
    }
}
