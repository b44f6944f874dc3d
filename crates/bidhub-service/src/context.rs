//! Per-request caller identity.

use bidhub_core::types::id::UserId;
use bidhub_entity::user::UserRole;

/// The verified identity a request acts as.
///
/// Built by the transport layer from validated token claims and passed
/// into every service call that needs authorization.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// The acting user.
    pub user_id: UserId,
    /// The acting user's role.
    pub role: UserRole,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }
}
