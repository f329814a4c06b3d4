//! In-memory store implementations for tests and single-node development.

pub mod audit;
pub mod notification;

pub use audit::MemoryAuditLogStore;
pub use notification::MemoryNotificationStore;
