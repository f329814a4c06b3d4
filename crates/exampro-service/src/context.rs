//! Request context carrying the identity of the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use exampro_core::AppError;
use exampro_core::result::AppResult;
use exampro_entity::user::UserRole;

/// Context for the current request.
///
/// Built by the API layer from identity established upstream and passed
/// into service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's user id.
    pub user_id: String,
    /// The caller's role.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            request_time: Utc::now(),
        }
    }

    /// A student caller.
    pub fn student(user_id: impl Into<String>) -> Self {
        Self::new(user_id, UserRole::Student)
    }

    /// An admin caller.
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fails with `Authorization` unless the caller is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if !self.is_admin() {
            return Err(AppError::authorization("Admin access required"));
        }
        Ok(())
    }
}
