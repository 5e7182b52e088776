//! Role definitions and role classes

use crate::error::AuthzError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity class of an authenticated dashboard user.
///
/// The set is closed. Which permissions a role holds is decided by the
/// policy table, not by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Organization administrator
    Admin,
    /// External partner with delegated access
    Partner,
    /// Regular team member
    Member,
    /// Read-only observer
    Viewer,
}

/// Roles that belong to the administrator class.
const ADMIN_CLASS: &[Role] = &[Role::Admin];

/// Roles that belong to the partner class.
const PARTNER_CLASS: &[Role] = &[Role::Partner];

impl Role {
    /// Every role in the catalog.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Partner, Role::Member, Role::Viewer];

    /// Get role name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Partner => "partner",
            Role::Member => "member",
            Role::Viewer => "viewer",
        }
    }

    /// Identity check against the administrator class.
    ///
    /// Independent of the policy table: stripping every permission from
    /// `admin` does not change this answer.
    pub fn is_admin(&self) -> bool {
        ADMIN_CLASS.contains(self)
    }

    /// Identity check against the partner class.
    pub fn is_partner(&self) -> bool {
        PARTNER_CLASS.contains(self)
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("partner".parse::<Role>(), Ok(Role::Partner));
        assert_eq!("member".parse::<Role>(), Ok(Role::Member));
        assert_eq!("viewer".parse::<Role>(), Ok(Role::Viewer));
        assert_eq!(
            "superadmin".parse::<Role>(),
            Err(AuthzError::UnknownRole("superadmin".to_string()))
        );
        // Catalog membership is exact.
        assert!("ADMIN".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_classes() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Admin.is_partner());
        assert!(Role::Partner.is_partner());
        assert!(!Role::Partner.is_admin());
        assert!(!Role::Member.is_admin());
        assert!(!Role::Viewer.is_partner());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(format!("{}", Role::Admin), "admin");
        assert_eq!(Role::Viewer.to_string(), "viewer");
    }

    #[test]
    fn test_role_serde_names() {
        let json = serde_json::to_string(&Role::Partner).unwrap();
        assert_eq!(json, "\"partner\"");
        let role: Role = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(role, Role::Member);
    }
}
