//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use exampro_core::error::{AppError, ErrorKind};
use exampro_core::result::AppResult;
use exampro_core::types::{NotificationId, PageRequest, PageResponse};
use exampro_entity::notification::{
    NewNotification, Notification, NotificationReference, NotificationStatus, Provenance,
    ReadState,
};

use crate::store::NotificationStore;

/// Flat row layout of the `notifications` table.
#[derive(Debug, Clone, FromRow)]
struct NotificationRow {
    id: NotificationId,
    user_id: String,
    title: String,
    message: String,
    notification_type: String,
    reference_id: Option<String>,
    reference_type: Option<String>,
    status: String,
    read_at: Option<DateTime<Utc>>,
    action_url: Option<String>,
    is_system_generated: bool,
    created_by: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let status: NotificationStatus = row.status.parse().map_err(corrupt)?;
        let read_state = ReadState::from_columns(status, row.read_at)?;
        let reference = NotificationReference::from_columns(row.reference_id, row.reference_type)?;

        let body = NewNotification {
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            notification_type: row.notification_type.parse().map_err(corrupt)?,
            reference,
            action_url: row.action_url,
            provenance: Provenance::from_columns(row.is_system_generated, row.created_by)?,
        };

        Ok(Notification::restore(row.id, body, read_state, row.created_at))
    }
}

/// A stored value outside a closed enumeration is corruption, not bad input.
fn corrupt(err: AppError) -> AppError {
    AppError::internal(format!("Corrupt notification row: {}", err.message))
}

/// Repository for notifications backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationRepository {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        let reference = notification.reference.as_ref();
        sqlx::query(
            "INSERT INTO notifications (id, user_id, title, message, notification_type, \
             reference_id, reference_type, status, read_at, action_url, is_system_generated, \
             created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(notification.id())
        .bind(&notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(reference.map(|r| r.id.as_str()))
        .bind(reference.map(|r| r.kind.as_str()))
        .bind(notification.status().as_str())
        .bind(notification.read_at())
        .bind(notification.action_url.as_deref())
        .bind(notification.provenance.is_system_generated())
        .bind(notification.provenance.created_by())
        .bind(notification.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to create notification", e)
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to find notification", e)
            })?;

        row.map(Notification::try_from).transpose()
    }

    async fn update_read_state(&self, notification: &Notification) -> AppResult<Notification> {
        let row = match notification.read_at() {
            // COALESCE keeps the first committed read_at under concurrent writers.
            Some(read_at) => sqlx::query_as::<_, NotificationRow>(
                "UPDATE notifications SET status = 'read', read_at = COALESCE(read_at, $2) \
                 WHERE id = $1 RETURNING *",
            )
            .bind(notification.id())
            .bind(read_at)
            .fetch_optional(&self.pool)
            .await,
            None => {
                sqlx::query_as::<_, NotificationRow>("SELECT * FROM notifications WHERE id = $1")
                    .bind(notification.id())
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to mark read", e))?;

        match row {
            Some(row) => Notification::try_from(row),
            None => Err(AppError::not_found(format!(
                "Notification {} not found",
                notification.id()
            ))),
        }
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        status: Option<NotificationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let status = status.map(|s| s.as_str());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2)",
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to count notifications", e)
        })?;

        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications \
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(status)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list notifications", e))?;

        let items = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND status = 'unread'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to count unread", e))?;
        Ok(count as u64)
    }

    async fn mark_all_read(&self, user_id: &str, read_at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET status = 'read', read_at = $2 \
             WHERE user_id = $1 AND status = 'unread'",
        )
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }
}
