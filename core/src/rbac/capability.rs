//! Per-feature capability bundles

use crate::rbac::permission::{Action, Permission};
use crate::rbac::policy::PolicyTable;
use crate::rbac::role::Role;
use serde::{Deserialize, Serialize};

/// Four canonical actions swept for a bundle.
const BUNDLE_ACTIONS: [Action; 4] = [Action::Create, Action::Edit, Action::Delete, Action::Export];

/// What a role may do within one feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityBundle {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_export: bool,
}

/// Derive the capability bundle of `role` for `feature`.
///
/// The feature is a free-form grouping key. A composed `<feature>.<action>`
/// that the catalog does not define counts as `false` rather than an error,
/// so an unknown feature yields an all-false bundle.
pub fn feature_access(table: &PolicyTable, role: Role, feature: &str) -> CapabilityBundle {
    let [can_create, can_edit, can_delete, can_export] = BUNDLE_ACTIONS.map(|action| {
        Permission::compose(feature, action)
            .map(|permission| table.grants(role, permission))
            .unwrap_or(false)
    });

    CapabilityBundle {
        can_create,
        can_edit,
        can_delete,
        can_export,
    }
}
