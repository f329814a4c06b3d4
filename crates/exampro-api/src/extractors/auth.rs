//! `AuthUser` extractor: reads the identity headers set by the gateway.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use exampro_core::AppError;
use exampro_entity::user::UserRole;
use exampro_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extracted caller context available in handlers.
///
/// Authentication happens upstream; requests without both identity headers
/// are rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)
            .ok_or_else(|| AppError::authentication("Missing X-User-Id header"))?;

        let role: UserRole = header(parts, USER_ROLE_HEADER)
            .ok_or_else(|| AppError::authentication("Missing X-User-Role header"))?
            .parse()
            .map_err(|_| AppError::authentication("Unrecognised X-User-Role header"))?;

        Ok(AuthUser(RequestContext::new(user_id, role)))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
