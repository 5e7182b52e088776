//! Authorization engine - permission, feature and role-class queries

use crate::error::{AuthzError, ConfigError};
use crate::rbac::audit::AuditLogger;
use crate::rbac::capability::{self, CapabilityBundle};
use crate::rbac::config::RbacConfig;
use crate::rbac::guard::Visibility;
use crate::rbac::permission::Permission;
use crate::rbac::policy::PolicyTable;
use crate::rbac::role::Role;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Whether `role` holds the permission named `permission_id`.
///
/// An id outside the catalog is an error, not a denial.
pub fn has_permission(
    table: &PolicyTable,
    role: Role,
    permission_id: &str,
) -> Result<bool, AuthzError> {
    let permission: Permission = permission_id.parse().map_err(|e| {
        warn!("Permission check against unknown id '{}' for role '{}'", permission_id, role);
        e
    })?;
    Ok(table.grants(role, permission))
}

/// Identity check; never consults the policy table.
pub fn is_admin(role: Role) -> bool {
    role.is_admin()
}

/// Identity check; never consults the policy table.
pub fn is_partner(role: Role) -> bool {
    role.is_partner()
}

/// The configured permission set for `role`, verbatim.
pub fn all_permissions(table: &PolicyTable, role: Role) -> &BTreeSet<Permission> {
    table.permissions_for(role)
}

/// Owner of the current policy table.
///
/// Readers take an `Arc` snapshot; [`Authorizer::reload`] builds a complete
/// table before swapping it in, so a reader never observes a partial policy.
pub struct Authorizer {
    table: RwLock<Arc<PolicyTable>>,
    generation: AtomicU64,
    audit: Option<AuditLogger>,
}

impl Authorizer {
    /// Create an authorizer from a policy configuration.
    pub fn new(config: &RbacConfig) -> Result<Self, ConfigError> {
        let table = PolicyTable::from_config(config)?;
        Ok(Self::from_table(table))
    }

    pub fn from_table(table: PolicyTable) -> Self {
        info!("RBAC policy loaded (generation 1)");
        Self {
            table: RwLock::new(Arc::new(table)),
            generation: AtomicU64::new(1),
            audit: None,
        }
    }

    /// Send every [`Authorizer::authorize`] decision to `logger`.
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Current policy table.
    pub fn snapshot(&self) -> Arc<PolicyTable> {
        self.current().0
    }

    /// Table and generation, read under one lock.
    fn current(&self) -> (Arc<PolicyTable>, u64) {
        let guard = self.table.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        (Arc::clone(&guard), self.generation.load(Ordering::Acquire))
    }

    /// Number of tables installed so far, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Replace the policy table.
    ///
    /// On error the previous table stays active.
    pub fn reload(&self, config: &RbacConfig) -> Result<(), ConfigError> {
        let table = PolicyTable::from_config(config).map_err(|e| {
            warn!("RBAC policy reload rejected: {}", e);
            e
        })?;

        // Generation is bumped under the write lock so readers see it paired
        // with the table it describes.
        let mut guard = self.table.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(table);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        drop(guard);

        info!("RBAC policy reloaded (generation {})", generation);
        Ok(())
    }

    /// Bind the role named `role` to the current table.
    pub fn context(&self, role: &str) -> Result<AuthContext, AuthzError> {
        let role: Role = role.parse().map_err(|e| {
            warn!("Authorization context requested for unknown role '{}'", role);
            e
        })?;
        Ok(self.context_for(role))
    }

    pub fn context_for(&self, role: Role) -> AuthContext {
        AuthContext {
            role,
            table: self.snapshot(),
        }
    }

    /// Single-call boundary: does the role named `role` hold `permission_id`?
    pub fn authorize(&self, role: &str, permission_id: &str) -> Result<bool, AuthzError> {
        let role: Role = role.parse()?;
        let permission: Permission = permission_id.parse()?;

        let (table, generation) = self.current();
        let allowed = table.grants(role, permission);

        if let Some(audit) = &self.audit {
            audit.log(role, permission, allowed, generation);
        }
        Ok(allowed)
    }
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::from_table(PolicyTable::empty())
    }
}

/// Authorization state for one authenticated session.
///
/// The role and the table snapshot are fixed at creation. A role change or a
/// policy reload is picked up by creating a new context.
#[derive(Debug, Clone)]
pub struct AuthContext {
    role: Role,
    table: Arc<PolicyTable>,
}

impl AuthContext {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn has_permission(&self, permission_id: &str) -> Result<bool, AuthzError> {
        has_permission(&self.table, self.role, permission_id)
    }

    /// Typed check; cannot name a permission outside the catalog.
    pub fn allows(&self, permission: Permission) -> bool {
        let allowed = self.table.grants(self.role, permission);
        debug!("Check: role={} permission={} allowed={}", self.role, permission, allowed);
        allowed
    }

    pub fn is_admin(&self) -> bool {
        is_admin(self.role)
    }

    pub fn is_partner(&self) -> bool {
        is_partner(self.role)
    }

    pub fn all_permissions(&self) -> &BTreeSet<Permission> {
        all_permissions(&self.table, self.role)
    }

    pub fn feature_access(&self, feature: impl AsRef<str>) -> CapabilityBundle {
        capability::feature_access(&self.table, self.role, feature.as_ref())
    }

    /// One evaluation of `permission_id` for a Protected/Restricted pair.
    pub fn guard(&self, permission_id: &str) -> Result<Visibility, AuthzError> {
        self.has_permission(permission_id).map(Visibility::from_decision)
    }

    pub fn guard_for(&self, permission: Permission) -> Visibility {
        Visibility::from_decision(self.allows(permission))
    }
}
