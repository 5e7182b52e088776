//! Role-Based Access Control (RBAC) engine for dashgate
//!
//! This module answers "is this allowed" for dashboard UI actions: the
//! permission catalog, the role policy table, feature capability bundles and
//! the Protected/Restricted render guards.

pub mod audit;
pub mod capability;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod guard;
pub mod permission;
pub mod policy;
pub mod role;


pub use audit::{process_audit_logs, AuditLogEntry, AuditLogger};
pub use capability::{feature_access, CapabilityBundle};
pub use catalog::{is_valid_permission, is_valid_role};
pub use config::RbacConfig;
pub use engine::{all_permissions, has_permission, is_admin, is_partner, AuthContext, Authorizer};
pub use guard::{protected, restricted, Visibility};
pub use permission::{Action, Feature, Permission};
pub use policy::PolicyTable;
pub use role::Role;
