//! Admin audit logging.

pub mod service;

pub use service::{AdminAuditService, Audited};
