//! Audit log handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::AuditFilter;
use crate::dto::response::{ApiResponse, AuditEntryResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/audit
pub async fn search_audit(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<AuditFilter>,
) -> Result<Json<ApiResponse<PaginatedResponse<AuditEntryResponse>>>, ApiError> {
    require_admin(&auth)?;

    let result = state
        .audit_service
        .search(
            &auth,
            filter.admin_id.as_deref(),
            filter.collection.as_deref(),
            params.into_page_request(&state.config.notifications),
        )
        .await?;

    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(
        result,
        AuditEntryResponse::from,
    ))))
}
