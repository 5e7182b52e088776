//! Render guards
//!
//! `Protected` and `Restricted` reduce to one [`Visibility`] decision that the
//! caller branches on. Both halves read the same decision, so guarded content
//! and its "no access" counterpart can never show at the same time.

use crate::error::AuthzError;
use crate::rbac::engine::AuthContext;

/// Outcome of a single permission evaluation for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The permission is held: protected content renders.
    Granted,
    /// The permission is not held: restricted content renders.
    Denied,
}

impl Visibility {
    pub fn from_decision(allowed: bool) -> Self {
        if allowed {
            Visibility::Granted
        } else {
            Visibility::Denied
        }
    }

    pub fn is_granted(self) -> bool {
        self == Visibility::Granted
    }

    /// Content shown only when the permission is held.
    pub fn protected<T>(self, content: T) -> Option<T> {
        self.is_granted().then_some(content)
    }

    /// Content shown only when the permission is missing.
    pub fn restricted<T>(self, content: T) -> Option<T> {
        (!self.is_granted()).then_some(content)
    }

    /// Pick one of two renderings.
    pub fn select<T>(self, granted: T, denied: T) -> T {
        match self {
            Visibility::Granted => granted,
            Visibility::Denied => denied,
        }
    }
}

/// Render `content` iff the context holds `permission_id`.
///
/// An id outside the catalog is returned as an error, never as "hidden".
pub fn protected<T>(
    ctx: &AuthContext,
    permission_id: &str,
    content: T,
) -> Result<Option<T>, AuthzError> {
    Ok(ctx.guard(permission_id)?.protected(content))
}

/// Render `content` iff the context lacks `permission_id`.
pub fn restricted<T>(
    ctx: &AuthContext,
    permission_id: &str,
    content: T,
) -> Result<Option<T>, AuthzError> {
    Ok(ctx.guard(permission_id)?.restricted(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::config::RbacConfig;
    use crate::rbac::engine::Authorizer;
    use crate::rbac::role::Role;

    fn authorizer() -> Authorizer {
        let config = RbacConfig::default().with_role(Role::Admin, ["billing.manage"]);
        Authorizer::new(&config).unwrap()
    }

    #[test]
    fn test_visibility_is_exclusive() {
        for visibility in [Visibility::Granted, Visibility::Denied] {
            let shown = [
                visibility.protected(()).is_some(),
                visibility.restricted(()).is_some(),
            ];
            assert_eq!(shown.iter().filter(|s| **s).count(), 1);
        }
    }

    #[test]
    fn test_select() {
        assert_eq!(Visibility::Granted.select("edit", "read-only"), "edit");
        assert_eq!(Visibility::Denied.select("edit", "read-only"), "read-only");
    }

    #[test]
    fn test_guard_functions() {
        let authorizer = authorizer();
        let admin = authorizer.context_for(Role::Admin);
        let member = authorizer.context_for(Role::Member);

        assert_eq!(protected(&admin, "billing.manage", "btn"), Ok(Some("btn")));
        assert_eq!(restricted(&admin, "billing.manage", "msg"), Ok(None));
        assert_eq!(protected(&member, "billing.manage", "btn"), Ok(None));
        assert_eq!(restricted(&member, "billing.manage", "msg"), Ok(Some("msg")));
    }

    #[test]
    fn test_unknown_permission_is_not_hidden() {
        let authorizer = authorizer();
        let admin = authorizer.context_for(Role::Admin);
        let err = AuthzError::UnknownPermission("billing.refund".to_string());
        assert_eq!(protected(&admin, "billing.refund", "btn"), Err(err.clone()));
        assert_eq!(restricted(&admin, "billing.refund", "msg"), Err(err));
    }
}
