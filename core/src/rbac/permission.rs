//! Permission catalog types
//!
//! Permissions are `<feature>.<action>` identifiers drawn from a closed set.
//! Typed code names them through [`Permission`] variants, so an unknown
//! permission cannot be written down outside of string parsing.

use crate::error::AuthzError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Dashboard area that groups related permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Projects,
    Billing,
    Customers,
    Reports,
    Settings,
    Webhooks,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Projects,
        Feature::Billing,
        Feature::Customers,
        Feature::Reports,
        Feature::Settings,
        Feature::Webhooks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Projects => "projects",
            Feature::Billing => "billing",
            Feature::Customers => "customers",
            Feature::Reports => "reports",
            Feature::Settings => "settings",
            Feature::Webhooks => "webhooks",
        }
    }

    /// Catalog permissions that belong to this feature.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        Permission::ALL
            .iter()
            .copied()
            .filter(move |permission| permission.feature() == self)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl AsRef<str> for Feature {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Verb half of a permission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Export,
    Manage,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Export,
        Action::Manage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Manage => "manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

macro_rules! permission_catalog {
    ($($variant:ident => $id:literal ($feature:ident, $action:ident)),+ $(,)?) => {
        /// A permission from the closed catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Permission {
            $($variant,)+
        }

        impl Permission {
            /// Every permission in the catalog.
            pub const ALL: &'static [Permission] = &[$(Permission::$variant,)+];

            /// Canonical `<feature>.<action>` identifier.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Permission::$variant => $id,)+
                }
            }

            pub fn feature(&self) -> Feature {
                match self {
                    $(Permission::$variant => Feature::$feature,)+
                }
            }

            pub fn action(&self) -> Action {
                match self {
                    $(Permission::$variant => Action::$action,)+
                }
            }
        }
    };
}

permission_catalog! {
    ProjectsView => "projects.view" (Projects, View),
    ProjectsCreate => "projects.create" (Projects, Create),
    ProjectsEdit => "projects.edit" (Projects, Edit),
    ProjectsDelete => "projects.delete" (Projects, Delete),
    ProjectsExport => "projects.export" (Projects, Export),
    BillingView => "billing.view" (Billing, View),
    BillingManage => "billing.manage" (Billing, Manage),
    BillingExport => "billing.export" (Billing, Export),
    CustomersView => "customers.view" (Customers, View),
    CustomersCreate => "customers.create" (Customers, Create),
    CustomersEdit => "customers.edit" (Customers, Edit),
    CustomersDelete => "customers.delete" (Customers, Delete),
    CustomersExport => "customers.export" (Customers, Export),
    ReportsView => "reports.view" (Reports, View),
    ReportsCreate => "reports.create" (Reports, Create),
    ReportsExport => "reports.export" (Reports, Export),
    SettingsView => "settings.view" (Settings, View),
    SettingsEdit => "settings.edit" (Settings, Edit),
    WebhooksView => "webhooks.view" (Webhooks, View),
    WebhooksCreate => "webhooks.create" (Webhooks, Create),
    WebhooksEdit => "webhooks.edit" (Webhooks, Edit),
    WebhooksDelete => "webhooks.delete" (Webhooks, Delete),
}

fn index() -> &'static HashMap<&'static str, Permission> {
    static INDEX: OnceLock<HashMap<&'static str, Permission>> = OnceLock::new();
    INDEX.get_or_init(|| {
        Permission::ALL
            .iter()
            .map(|permission| (permission.as_str(), *permission))
            .collect()
    })
}

impl Permission {
    /// Look up a catalog entry by identifier.
    pub fn lookup(id: &str) -> Option<Permission> {
        index().get(id).copied()
    }

    /// Compose `<feature>.<action>` and look it up.
    ///
    /// Returns `None` when the feature does not define that action.
    pub fn compose(feature: &str, action: Action) -> Option<Permission> {
        Self::lookup(&format!("{}.{}", feature, action.as_str()))
    }
}

impl FromStr for Permission {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Permission::lookup(value).ok_or_else(|| AuthzError::UnknownPermission(value.to_string()))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// Permissions travel as their identifier strings in policy files.
impl Serialize for Permission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        id.parse().map_err(serde::de::Error::custom)
    }
}
