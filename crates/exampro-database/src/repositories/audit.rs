//! Audit log repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use exampro_core::error::{AppError, ErrorKind};
use exampro_core::result::AppResult;
use exampro_core::types::{AuditLogId, PageRequest, PageResponse};
use exampro_entity::audit::{AuditLogEntry, AuditTarget, ChangeSet, TargetId};

use crate::store::AuditLogStore;

#[derive(Debug, Clone, FromRow)]
struct AdminActionRow {
    id: AuditLogId,
    admin_id: String,
    action_type: String,
    target_collection: String,
    target_id: String,
    changes: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminActionRow> for AuditLogEntry {
    type Error = AppError;

    fn try_from(row: AdminActionRow) -> Result<Self, Self::Error> {
        Ok(AuditLogEntry {
            id: row.id,
            admin_id: row.admin_id,
            action_type: row.action_type.parse()?,
            target: AuditTarget {
                collection: row.target_collection,
                id: TargetId::from_stored(row.target_id),
            },
            changes: ChangeSet::from_json(&row.changes),
            created_at: row.created_at,
        })
    }
}

/// Repository for admin audit records backed by PostgreSQL.
///
/// Only inserts and selects; the table itself rejects updates and deletes.
#[derive(Debug, Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogStore for PgAuditLogRepository {
    async fn append(&self, entry: &AuditLogEntry) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO admin_actions (id, admin_id, action_type, target_collection, target_id, changes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(entry.id)
        .bind(&entry.admin_id)
        .bind(entry.action_type.as_str())
        .bind(&entry.target.collection)
        .bind(entry.target.id.as_stored())
        .bind(entry.changes.to_json())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to create audit entry", e))?;
        Ok(())
    }

    async fn search(
        &self,
        admin_id: Option<&str>,
        collection: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM admin_actions \
             WHERE ($1::TEXT IS NULL OR admin_id = $1) AND ($2::TEXT IS NULL OR target_collection = $2)",
        )
        .bind(admin_id)
        .bind(collection)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to count audit entries", e)
        })?;

        let rows = sqlx::query_as::<_, AdminActionRow>(
            "SELECT * FROM admin_actions \
             WHERE ($1::TEXT IS NULL OR admin_id = $1) AND ($2::TEXT IS NULL OR target_collection = $2) \
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
        )
        .bind(admin_id)
        .bind(collection)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to search audit log", e))?;

        let entries = rows
            .into_iter()
            .map(AuditLogEntry::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PageResponse::new(entries, page, total as u64))
    }
}
