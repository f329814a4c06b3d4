//! Store traits consumed by the service layer.
//!
//! Each write targets a single document by its own id; implementations must
//! apply it atomically so concurrent writers to the same id are serialised.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use exampro_core::config::DatabaseConfig;
use exampro_core::result::AppResult;
use exampro_core::types::{NotificationId, PageRequest, PageResponse};
use exampro_entity::audit::AuditLogEntry;
use exampro_entity::notification::{Notification, NotificationStatus};

use crate::connection::DatabasePool;
use crate::memory::{MemoryAuditLogStore, MemoryNotificationStore};
use crate::repositories::{PgAuditLogRepository, PgNotificationRepository};

/// Durable keyed storage for notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + Debug + 'static {
    /// Insert a freshly created notification.
    async fn insert(&self, notification: &Notification) -> AppResult<()>;

    /// Fetch a notification by id.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// Persist the read state of an existing notification and return the
    /// stored document.
    ///
    /// `read_at` is only written if the stored document has none, so the
    /// first committed writer wins and later writers never move it. A
    /// notification passed in as unread leaves the stored document untouched.
    /// Fails with `NotFound` if the id does not exist.
    async fn update_read_state(&self, notification: &Notification) -> AppResult<Notification>;

    /// Notifications owned by `user_id`, optionally filtered by status,
    /// newest first (`created_at DESC`, id as tie-breaker).
    async fn find_by_user(
        &self,
        user_id: &str,
        status: Option<NotificationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Number of unread notifications owned by `user_id`.
    async fn count_unread(&self, user_id: &str) -> AppResult<u64>;

    /// Mark every unread notification of `user_id` as read at `read_at`.
    /// Already read notifications keep their timestamp. Returns how many
    /// notifications changed state.
    async fn mark_all_read(&self, user_id: &str, read_at: DateTime<Utc>) -> AppResult<u64>;
}

/// Append-only storage for admin audit records.
#[async_trait]
pub trait AuditLogStore: Send + Sync + Debug + 'static {
    /// Append one immutable record.
    async fn append(&self, entry: &AuditLogEntry) -> AppResult<()>;

    /// Operator-facing lookup, newest first.
    async fn search(
        &self,
        admin_id: Option<&str>,
        collection: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>>;
}

/// The pair of stores selected by configuration.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Notification store.
    pub notifications: Arc<dyn NotificationStore>,
    /// Audit log store.
    pub audit: Arc<dyn AuditLogStore>,
    /// The PostgreSQL pool, when not running in memory.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// In-process stores with no durability.
    pub fn in_memory() -> Self {
        Self {
            notifications: Arc::new(MemoryNotificationStore::new()),
            audit: Arc::new(MemoryAuditLogStore::new()),
            pool: None,
        }
    }

    /// Connect the stores described by `config`.
    ///
    /// `memory://` selects the in-process stores; otherwise the URL must
    /// name a PostgreSQL database.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if config.is_memory() {
            info!("Using in-memory stores; data will not survive a restart");
            return Ok(Self::in_memory());
        }

        let pool = DatabasePool::open(config).await?;
        Ok(Self {
            notifications: Arc::new(PgNotificationRepository::new(pool.pool().clone())),
            audit: Arc::new(PgAuditLogRepository::new(pool.pool().clone())),
            pool: Some(pool),
        })
    }
}
