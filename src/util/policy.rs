use bson::oid::ObjectId;

use crate::model::user::UserRole;
use crate::util::error::ServiceError;
use crate::util::jwt::Claims;

/// Single authorization component consulted by middleware and services.
/// Two predicates cover the whole surface: staff/admin for review and
/// management actions, ownership for self-service actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn new() -> Self {
        AccessPolicy
    }

    pub fn is_staff_or_admin(&self, role: UserRole) -> bool {
        role.is_staff_or_admin()
    }

    pub fn is_owner(&self, claims: &Claims, owner_id: &ObjectId) -> bool {
        claims.sub == owner_id.to_hex()
    }

    /// Gate an admin action. An unknown role string in the claims is
    /// treated as not authorized, never as an error to be retried.
    pub fn require_staff_or_admin(&self, claims: &Claims) -> Result<(), ServiceError> {
        match UserRole::parse(&claims.role) {
            Some(role) if self.is_staff_or_admin(role) => Ok(()),
            _ => Err(ServiceError::Forbidden),
        }
    }

    pub fn require_owner(&self, claims: &Claims, owner_id: &ObjectId) -> Result<(), ServiceError> {
        if self.is_owner(claims, owner_id) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden)
        }
    }
}
