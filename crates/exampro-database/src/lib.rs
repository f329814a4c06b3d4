//! # exampro-database
//!
//! The persistence collaborator for ExamPro: the store traits the services
//! depend on, PostgreSQL repositories implementing them, and in-memory
//! stores for tests and single-node development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::{DatabaseHealth, DatabasePool};
pub use store::{AuditLogStore, NotificationStore, Stores};
