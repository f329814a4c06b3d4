//! PostgreSQL implementations of the store traits.

pub mod audit;
pub mod notification;

pub use audit::PgAuditLogRepository;
pub use notification::PgNotificationRepository;
