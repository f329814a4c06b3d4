//! Admin notification compose handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CreateNotificationRequest;
use crate::dto::response::{ApiResponse, ComposeResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/notifications
pub async fn compose(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ComposeResponse>>), ApiError> {
    require_admin(&auth)?;
    let new = req.into_new_notification()?;

    let audited = state
        .admin_notification_service
        .compose(&auth, new)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ComposeResponse {
            notification: audited.value.into(),
            audit_id: audited.entry.map(|e| e.id.to_string()),
        })),
    ))
}
