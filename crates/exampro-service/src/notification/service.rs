//! Notification creation, read-state transitions and listing.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use exampro_core::AppError;
use exampro_core::result::AppResult;
use exampro_core::types::{NotificationId, PageRequest, PageResponse};
use exampro_database::store::NotificationStore;
use exampro_entity::notification::{NewNotification, Notification, NotificationStatus};

use crate::context::RequestContext;

/// Manages the notification lifecycle: `unread -> read`, nothing else.
#[derive(Debug, Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new unread notification.
    ///
    /// Nothing is written when validation fails.
    pub async fn create(&self, new: NewNotification) -> AppResult<Notification> {
        let notification = Notification::create(new, Utc::now())?;
        self.store.insert(&notification).await?;

        info!(
            notification_id = %notification.id(),
            user_id = %notification.user_id,
            notification_type = %notification.notification_type,
            system_generated = notification.provenance.is_system_generated(),
            "Notification created"
        );

        Ok(notification)
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// Repeated calls are no-ops and keep the original `read_at`. A
    /// notification owned by someone else is reported as not found.
    pub async fn mark_as_read(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> AppResult<Notification> {
        let mut notification = self.find_owned(ctx, notification_id).await?;

        if !notification.mark_as_read(Utc::now()) {
            debug!(
                notification_id = %notification_id,
                read_at = ?notification.read_at(),
                "Notification already read"
            );
            return Ok(notification);
        }

        // A concurrent reader may have committed first; the store keeps its read_at.
        let stored = self.store.update_read_state(&notification).await?;

        info!(
            notification_id = %notification_id,
            user_id = %ctx.user_id,
            "Notification marked as read"
        );

        Ok(stored)
    }

    /// Lists the caller's notifications, newest first, optionally by status.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        status: Option<NotificationStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.store.find_by_user(&ctx.user_id, status, &page).await
    }

    /// Gets the caller's unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.store.count_unread(&ctx.user_id).await
    }

    /// Marks all of the caller's unread notifications as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let changed = self.store.mark_all_read(&ctx.user_id, Utc::now()).await?;
        info!(user_id = %ctx.user_id, changed, "Marked all notifications as read");
        Ok(changed)
    }

    async fn find_owned(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> AppResult<Notification> {
        self.store
            .find_by_id(notification_id)
            .await?
            .filter(|n| n.user_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found(format!("Notification {notification_id} not found")))
    }
}
