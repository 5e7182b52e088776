//! RBAC configuration structures

use crate::error::ConfigError;
use crate::rbac::permission::Permission;
use crate::rbac::role::Role;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// RBAC policy configuration as read from a policy file.
///
/// Names are kept as strings until [`RbacConfig::validate`] so a bad entry is
/// reported with its location instead of a bare serde error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Role name -> granted permission ids
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: BTreeMap<String, Vec<String>>,
}

/// Role map that rejects a role named twice instead of keeping the last entry.
fn deserialize_roles<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RolesVisitor;

    impl<'de> Visitor<'de> for RolesVisitor {
        type Value = BTreeMap<String, Vec<String>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of role names to permission id lists")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut roles = BTreeMap::new();
            while let Some((role, permissions)) = map.next_entry::<String, Vec<String>>()? {
                if roles.contains_key(&role) {
                    return Err(de::Error::custom(format!(
                        "Role '{}' is configured more than once",
                        role
                    )));
                }
                roles.insert(role, permissions);
            }
            Ok(roles)
        }
    }

    deserializer.deserialize_map(RolesVisitor)
}

impl RbacConfig {
    /// Grant `permissions` to `role`, replacing any earlier grant.
    pub fn with_role<I, P>(mut self, role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.roles.insert(
            role.as_str().to_string(),
            permissions.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Validate configuration
    ///
    /// Every role name and every permission id must be in its catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Validate and convert to typed grants.
    ///
    /// Roles not named in the file are omitted here; the policy table fills
    /// them in with empty sets.
    pub fn resolve(&self) -> Result<BTreeMap<Role, BTreeSet<Permission>>, ConfigError> {
        let mut grants = BTreeMap::new();

        for (role_name, permission_ids) in &self.roles {
            let role: Role = role_name
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Role '{}' is not a valid role name", role_name)))?;

            let mut permissions = BTreeSet::new();
            for id in permission_ids {
                let permission: Permission = id.parse().map_err(|_| {
                    ConfigError::Invalid(format!(
                        "Unknown permission '{}' granted to role '{}'",
                        id, role_name
                    ))
                })?;
                permissions.insert(permission);
            }

            grants.insert(role, permissions);
        }

        Ok(grants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RbacConfig::default();
        assert!(config.roles.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = RbacConfig::default().with_role(Role::Admin, ["projects.create"]);
        assert!(config.validate().is_ok());

        let mut config = RbacConfig::default();
        config
            .roles
            .insert("superadmin".to_string(), vec!["projects.create".to_string()]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("superadmin"));

        let config = RbacConfig::default().with_role(Role::Member, ["projects.archive"]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("projects.archive"));
        assert!(err.to_string().contains("member"));
    }

    #[test]
    fn test_resolve_deduplicates() {
        let config = RbacConfig::default().with_role(
            Role::Partner,
            ["reports.view", "reports.view", "reports.export"],
        );
        let grants = config.resolve().unwrap();
        assert_eq!(
            grants[&Role::Partner],
            BTreeSet::from([Permission::ReportsView, Permission::ReportsExport])
        );
        assert!(!grants.contains_key(&Role::Viewer));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{ "roles": { "admin": ["billing.manage"], "member": [] } }"#;
        let config: RbacConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.roles["admin"], vec!["billing.manage".to_string()]);
        assert!(config.roles["member"].is_empty());

        let empty: RbacConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RbacConfig::default());
    }

    #[test]
    fn test_parse_rejects_duplicate_role() {
        let json = r#"{ "roles": { "admin": ["billing.manage"], "admin": [] } }"#;
        let err = serde_json::from_str::<RbacConfig>(json).unwrap_err();
        assert!(err.to_string().contains("Role 'admin' is configured more than once"));
    }
}
