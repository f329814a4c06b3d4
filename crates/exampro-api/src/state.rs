//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use exampro_core::config::AppConfig;
use exampro_database::{DatabasePool, Stores};
use exampro_service::{AdminAuditService, AdminNotificationService, NotificationService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running on in-memory stores
    pub db_pool: Option<DatabasePool>,
    /// Notification lifecycle service
    pub notification_service: Arc<NotificationService>,
    /// Admin-composed notifications
    pub admin_notification_service: Arc<AdminNotificationService>,
    /// Admin audit log
    pub audit_service: Arc<AdminAuditService>,
}

impl AppState {
    /// Wires the services on top of the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let notification_service = NotificationService::new(Arc::clone(&stores.notifications));
        let audit_service = AdminAuditService::new(Arc::clone(&stores.audit));
        let admin_notification_service =
            AdminNotificationService::new(notification_service.clone(), audit_service.clone());

        Self {
            config: Arc::new(config),
            db_pool: stores.pool,
            notification_service: Arc::new(notification_service),
            admin_notification_service: Arc::new(admin_notification_service),
            audit_service: Arc::new(audit_service),
        }
    }
}
