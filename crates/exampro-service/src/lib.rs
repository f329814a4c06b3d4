//! # exampro-service
//!
//! Business logic for ExamPro. Each service wraps a store trait object and
//! implements one use-case area; dependencies are injected at construction
//! time via `Arc` references.

pub mod audit;
pub mod context;
pub mod notification;

pub use audit::{AdminAuditService, Audited};
pub use context::RequestContext;
pub use notification::{AdminNotificationService, NotificationService};
