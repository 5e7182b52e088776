//! Role policy table

use crate::error::{AuthzError, ConfigError};
use crate::rbac::config::RbacConfig;
use crate::rbac::permission::Permission;
use crate::rbac::role::Role;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Immutable mapping from every role to its granted permissions.
///
/// Total over [`Role::ALL`]: a role without grants maps to an empty set.
/// There are no mutating methods; a new policy means a new table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    grants: BTreeMap<Role, BTreeSet<Permission>>,
}

impl PolicyTable {
    /// Build a table from a validated configuration.
    pub fn from_config(config: &RbacConfig) -> Result<Self, ConfigError> {
        let mut grants = config.resolve()?;
        for role in Role::ALL {
            grants.entry(role).or_default();
        }

        for (role, permissions) in &grants {
            debug!("Policy: role={} permissions={}", role, permissions.len());
        }

        Ok(Self { grants })
    }

    /// Table in which every role has no permissions.
    pub fn empty() -> Self {
        Self {
            grants: Role::ALL.into_iter().map(|role| (role, BTreeSet::new())).collect(),
        }
    }

    /// Permissions granted to `role`.
    pub fn permissions_for(&self, role: Role) -> &BTreeSet<Permission> {
        // Every role is inserted at construction.
        static EMPTY: BTreeSet<Permission> = BTreeSet::new();
        self.grants.get(&role).unwrap_or(&EMPTY)
    }

    /// Permissions granted to the role named `role`.
    ///
    /// An unknown name is a caller contract violation, reported distinctly
    /// from a role that has no permissions.
    pub fn permissions_for_name(&self, role: &str) -> Result<&BTreeSet<Permission>, AuthzError> {
        let role: Role = role.parse()?;
        Ok(self.permissions_for(role))
    }

    pub(crate) fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for(role).contains(&permission)
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::empty()
    }
}
