//! Shared test helpers for API tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use exampro_core::config::AppConfig;
use exampro_core::types::PageRequest;
use exampro_database::{AuditLogStore, NotificationStore, Stores};
use exampro_entity::notification::{NewNotification, Notification, NotificationType};
use exampro_service::NotificationService;

/// Caller identity as injected by the gateway.
pub type Identity<'a> = Option<(&'a str, &'a str)>;

/// Student `stu-1`.
pub const STUDENT: Identity<'static> = Some(("stu-1", "student"));
/// Admin `admin-1`.
pub const ADMIN: Identity<'static> = Some(("admin-1", "admin"));

/// Test application over in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The stores behind the router, for direct inspection
    pub stores: Stores,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let stores = Stores::in_memory();
        let router = exampro_api::build_app(AppConfig::default(), stores.clone());
        Self { router, stores }
    }

    /// Create a system notification directly through the service layer
    pub async fn seed(&self, user_id: &str, title: &str) -> Notification {
        NotificationService::new(self.stores.notifications.clone())
            .create(NewNotification::system(
                user_id,
                title,
                "seeded",
                NotificationType::General,
            ))
            .await
            .expect("Failed to seed notification")
    }

    /// Number of notifications stored for a user
    pub async fn stored_for(&self, user_id: &str) -> u64 {
        self.stores
            .notifications
            .find_by_user(user_id, None, &PageRequest::default())
            .await
            .expect("Failed to list notifications")
            .total_items
    }

    /// Number of audit records stored
    pub async fn audit_records(&self) -> u64 {
        self.stores
            .audit
            .search(None, None, &PageRequest::default())
            .await
            .expect("Failed to search audit log")
            .total_items
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        identity: Identity<'_>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some((user_id, role)) = identity {
            req = req.header("X-User-Id", user_id).header("X-User-Role", role);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
