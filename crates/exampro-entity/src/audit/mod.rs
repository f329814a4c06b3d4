//! Admin audit log entities.

pub mod action;
pub mod changes;
pub mod model;

pub use action::ActionType;
pub use changes::ChangeSet;
pub use model::{AuditLogEntry, AuditTarget, CreateAuditLogEntry, TargetId};
