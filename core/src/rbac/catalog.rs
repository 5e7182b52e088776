//! Catalog membership tests
//!
//! Pure set-membership checks. They never fail; callers use them to tell
//! "denied" apart from "misconfigured".

use crate::rbac::permission::Permission;
use crate::rbac::role::Role;

/// True iff `id` names a permission in the catalog.
pub fn is_valid_permission(id: &str) -> bool {
    Permission::lookup(id).is_some()
}

/// True iff `name` names a role in the catalog.
pub fn is_valid_role(name: &str) -> bool {
    name.parse::<Role>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_permissions() {
        assert!(is_valid_permission("projects.create"));
        assert!(is_valid_permission("billing.manage"));
        assert!(!is_valid_permission("billing.create"));
        assert!(!is_valid_permission("nonexistent.permission"));
        assert!(!is_valid_permission(""));
    }

    #[test]
    fn test_valid_roles() {
        for role in Role::ALL {
            assert!(is_valid_role(role.as_str()));
        }
        assert!(!is_valid_role("superadmin"));
        assert!(!is_valid_role("Admin"));
    }
}
