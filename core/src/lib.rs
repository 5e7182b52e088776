//! dashgate Core Library
//!
//! Role-based access control for the dashboard front-end. Pages pass the
//! active role explicitly and ask pure questions: does this role hold a
//! permission, what can it do within a feature, and should a guarded element
//! render.
//!
//! ```
//! use dashgate_core::rbac::{Authorizer, RbacConfig, Role};
//!
//! let config = RbacConfig::default().with_role(Role::Admin, ["projects.create"]);
//! let authorizer = Authorizer::new(&config).unwrap();
//! let ctx = authorizer.context("admin").unwrap();
//!
//! assert!(ctx.has_permission("projects.create").unwrap());
//! assert!(ctx.feature_access("projects").can_create);
//! ```

pub mod config;
pub mod error;
pub mod rbac;

// Re-exports for convenience
pub use config::{
    default_policy_path, get_config_dir, load_policy_config, parse_policy_config,
    save_policy_config, POLICY_PATH_ENV,
};
pub use error::*;
pub use rbac::{AuthContext, Authorizer, CapabilityBundle, Permission, PolicyTable, RbacConfig, Role};
