//! Notification handlers for the calling user.

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::dto::request::NotificationFilter;
use crate::dto::response::{ApiResponse, CountResponse, NotificationResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<NotificationFilter>,
) -> Result<Json<ApiResponse<PaginatedResponse<NotificationResponse>>>, ApiError> {
    let status = filter.status()?;
    let page = params.into_page_request(&state.config.notifications);

    let result = state
        .notification_service
        .list_for_user(&auth, status, page)
        .await?;

    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(
        result,
        NotificationResponse::from,
    ))))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let id = parse_id(&id)?;
    let notification = state.notification_service.mark_as_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification.into())))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
