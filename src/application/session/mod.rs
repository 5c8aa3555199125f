//! Authenticated principal passed into every service call

use crate::domain::{DomainError, DomainResult, Role};

/// Who is making the request.
///
/// Built by the HTTP auth middleware from a verified bearer token and
/// handed explicitly to services; nothing reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub account_id: i32,
    pub name: String,
    pub role: Role,
}

impl SessionContext {
    pub fn guest(account_id: i32, name: impl Into<String>) -> Self {
        Self {
            account_id,
            name: name.into(),
            role: Role::Guest,
        }
    }

    pub fn admin(account_id: i32, name: impl Into<String>) -> Self {
        Self {
            account_id,
            name: name.into(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Guest ID of the session, or `Forbidden` for admins
    pub fn require_guest(&self) -> DomainResult<i32> {
        match self.role {
            Role::Guest => Ok(self.account_id),
            Role::Admin => Err(DomainError::Forbidden(
                "This action is only available to guests".into(),
            )),
        }
    }

    /// Admin ID of the session, or `Forbidden` for guests
    pub fn require_admin(&self) -> DomainResult<i32> {
        match self.role {
            Role::Admin => Ok(self.account_id),
            Role::Guest => Err(DomainError::Forbidden(
                "This action requires a hotel admin".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_guards() {
        let guest = SessionContext::guest(3, "ana");
        let admin = SessionContext::admin(5, "boss");

        assert_eq!(guest.require_guest().unwrap(), 3);
        assert!(matches!(guest.require_admin(), Err(DomainError::Forbidden(_))));
        assert_eq!(admin.require_admin().unwrap(), 5);
        assert!(matches!(admin.require_guest(), Err(DomainError::Forbidden(_))));
        assert!(admin.is_admin());
    }
}
