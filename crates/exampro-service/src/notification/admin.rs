//! Notifications composed by administrators.

use exampro_core::result::AppResult;
use exampro_entity::audit::{ActionType, AuditTarget, ChangeSet};
use exampro_entity::notification::{NewNotification, Notification, Provenance};

use crate::audit::{AdminAuditService, Audited};
use crate::context::RequestContext;

use super::service::NotificationService;

/// Audit collection name for notifications.
const NOTIFICATIONS_COLLECTION: &str = "notifications";

/// Admin-side notification management; every write is audited.
#[derive(Debug, Clone)]
pub struct AdminNotificationService {
    notifications: NotificationService,
    audit: AdminAuditService,
}

impl AdminNotificationService {
    /// Creates a new admin notification service.
    pub fn new(notifications: NotificationService, audit: AdminAuditService) -> Self {
        Self {
            notifications,
            audit,
        }
    }

    /// Sends a manually written notification to a user.
    ///
    /// The caller becomes `created_by` regardless of the provenance supplied.
    pub async fn compose(
        &self,
        ctx: &RequestContext,
        mut new: NewNotification,
    ) -> AppResult<Audited<Notification>> {
        ctx.require_admin()?;
        new.provenance = Provenance::Admin {
            created_by: ctx.user_id.clone(),
        };

        self.audit
            .audited(
                ctx,
                ActionType::Create,
                self.notifications.create(new),
                |n| {
                    (
                        AuditTarget::record(NOTIFICATIONS_COLLECTION, n.id().to_string()),
                        ChangeSet::new()
                            .with("user_id", &n.user_id)
                            .with("notification_type", n.notification_type)
                            .with("title", &n.title),
                    )
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use exampro_core::error::ErrorKind;
    use exampro_core::types::PageRequest;
    use exampro_database::memory::{MemoryAuditLogStore, MemoryNotificationStore};
    use exampro_database::store::AuditLogStore;
    use exampro_entity::notification::NotificationType;

    struct Fixture {
        service: AdminNotificationService,
        notifications: MemoryNotificationStore,
        audit: MemoryAuditLogStore,
    }

    fn fixture() -> Fixture {
        let notifications = MemoryNotificationStore::new();
        let audit = MemoryAuditLogStore::new();
        let service = AdminNotificationService::new(
            NotificationService::new(Arc::new(notifications.clone())),
            AdminAuditService::new(Arc::new(audit.clone())),
        );
        Fixture {
            service,
            notifications,
            audit,
        }
    }

    fn announcement() -> NewNotification {
        NewNotification::system(
            "stu-1",
            "Schedule change",
            "Mock 3 moves to Saturday.",
            NotificationType::Test,
        )
    }

    #[tokio::test]
    async fn test_compose_sets_admin_provenance_and_audits() {
        let f = fixture();
        let ctx = RequestContext::admin("admin-7");

        let audited = f.service.compose(&ctx, announcement()).await.unwrap();
        let n = &audited.value;

        assert_eq!(
            n.provenance,
            Provenance::Admin {
                created_by: "admin-7".to_string()
            }
        );
        assert!(n.is_unread());
        assert_eq!(f.notifications.len(), 1);

        let entry = audited.entry.expect("audit written");
        assert_eq!(entry.action_type, ActionType::Create);
        assert_eq!(
            entry.target,
            AuditTarget::record("notifications", n.id().to_string())
        );
        assert_eq!(entry.changes.get("user_id"), Some("stu-1"));
        assert_eq!(entry.changes.get("notification_type"), Some("test"));
        assert_eq!(entry.changes.get("title"), Some("Schedule change"));

        let logged = f
            .audit
            .search(Some("admin-7"), Some("notifications"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(logged.total_items, 1);
    }

    #[tokio::test]
    async fn test_compose_invalid_writes_nothing() {
        let f = fixture();
        let mut new = announcement();
        new.message = String::new();

        let err = f
            .service
            .compose(&RequestContext::admin("admin-7"), new)
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(f.notifications.is_empty());
        assert!(f.audit.is_empty().await);
    }

    #[tokio::test]
    async fn test_compose_requires_admin() {
        let f = fixture();
        let err = f
            .service
            .compose(&RequestContext::student("stu-1"), announcement())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(f.notifications.is_empty());
        assert!(f.audit.is_empty().await);
    }
}
