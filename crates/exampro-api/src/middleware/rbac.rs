//! Role guards for admin routes.

use exampro_core::AppError;

use crate::extractors::AuthUser;

/// Checks that the caller has the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::authorization("Admin access required"));
    }
    Ok(())
}
