//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use exampro_core::types::PageResponse;
use exampro_entity::audit::AuditLogEntry;
use exampro_entity::notification::Notification;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Maps a page of domain items into response items.
    pub fn from_page<U>(page: PageResponse<U>, f: impl FnMut(U) -> T) -> Self {
        Self {
            total: page.total_items,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
            items: page.items.into_iter().map(f).collect(),
        }
    }
}

/// A notification as clients see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    /// Notification id.
    pub id: String,
    /// Recipient.
    pub user_id: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Notification type.
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Related item id.
    pub reference_id: Option<String>,
    /// Related item kind.
    pub reference_type: Option<String>,
    /// `unread` or `read`.
    pub status: String,
    /// When it was first read.
    pub read_at: Option<DateTime<Utc>>,
    /// Client navigation hint.
    pub action_url: Option<String>,
    /// Whether a workflow produced it.
    pub is_system_generated: bool,
    /// Composing admin, for admin notifications.
    pub created_by: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        let id = n.id().to_string();
        let status = n.status().as_str().to_string();
        let read_at = n.read_at();
        let created_at = n.created_at();
        let is_system_generated = n.provenance.is_system_generated();
        let created_by = n.provenance.created_by().map(String::from);
        let (reference_id, reference_type) = match n.reference {
            Some(r) => (Some(r.id), Some(r.kind)),
            None => (None, None),
        };

        Self {
            id,
            user_id: n.user_id,
            title: n.title,
            message: n.message,
            notification_type: n.notification_type.as_str().to_string(),
            reference_id,
            reference_type,
            status,
            read_at,
            action_url: n.action_url,
            is_system_generated,
            created_by,
            created_at,
        }
    }
}

/// An audit record as operators see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntryResponse {
    /// Record id.
    pub id: String,
    /// Acting admin.
    pub admin_id: String,
    /// `create`, `update` or `delete`.
    pub action_type: String,
    /// Target collection.
    pub target_collection: String,
    /// Target record id, or `*` for collection-wide actions.
    pub target_id: String,
    /// Touched fields and their new values.
    pub changes: serde_json::Value,
    /// When the action was recorded.
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogEntry> for AuditEntryResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            admin_id: entry.admin_id,
            action_type: entry.action_type.as_str().to_string(),
            target_id: entry.target.id.as_stored().to_string(),
            target_collection: entry.target.collection,
            changes: entry.changes.to_json(),
            created_at: entry.created_at,
        }
    }
}

/// Response for an admin compose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeResponse {
    /// The created notification.
    pub notification: NotificationResponse,
    /// Id of the audit record, absent if it could not be written.
    pub audit_id: Option<String>,
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count.
    pub count: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `memory`, `connected` or `unavailable`.
    pub database: String,
}
