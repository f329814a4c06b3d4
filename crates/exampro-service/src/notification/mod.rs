//! Notification lifecycle and admin-composed notifications.

pub mod admin;
pub mod service;

pub use admin::AdminNotificationService;
pub use service::NotificationService;
