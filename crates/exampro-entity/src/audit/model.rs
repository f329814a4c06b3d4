//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use exampro_core::AppError;
use exampro_core::result::AppResult;
use exampro_core::types::AuditLogId;

use super::action::ActionType;
use super::changes::ChangeSet;

/// Stored `target_id` for actions that affect a whole collection.
pub const COLLECTION_SENTINEL: &str = "*";

/// Which record, or whole collection, an action touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetId {
    /// A single record.
    Record(String),
    /// The collection as a whole (bulk import, bulk deactivate).
    Collection,
}

impl TargetId {
    /// Value stored in the `target_id` column.
    pub fn as_stored(&self) -> &str {
        match self {
            Self::Record(id) => id,
            Self::Collection => COLLECTION_SENTINEL,
        }
    }

    /// Parse the `target_id` column.
    pub fn from_stored(value: String) -> Self {
        if value == COLLECTION_SENTINEL {
            Self::Collection
        } else {
            Self::Record(value)
        }
    }
}

/// The affected collection plus record. No referential integrity is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTarget {
    /// Name of the collection, e.g. `"users"` or `"questions"`.
    pub collection: String,
    /// The affected record.
    pub id: TargetId,
}

impl AuditTarget {
    /// A single record in a collection.
    pub fn record(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: TargetId::Record(id.into()),
        }
    }

    /// A collection-level action.
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: TargetId::Collection,
        }
    }
}

/// An immutable record of one applied admin mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: AuditLogId,
    /// The administrator who performed the action.
    pub admin_id: String,
    /// What kind of mutation was applied.
    pub action_type: ActionType,
    /// What it was applied to.
    pub target: AuditTarget,
    /// Fields touched and their new values.
    pub changes: ChangeSet,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The administrator who performed the action.
    pub admin_id: String,
    /// What kind of mutation was applied.
    pub action_type: ActionType,
    /// What it was applied to.
    pub target: AuditTarget,
    /// Fields touched and their new values.
    pub changes: ChangeSet,
}

impl CreateAuditLogEntry {
    /// Check required fields.
    pub fn validate(&self) -> AppResult<()> {
        if self.admin_id.trim().is_empty() {
            return Err(AppError::validation("admin_id must not be empty"));
        }
        if self.target.collection.trim().is_empty() {
            return Err(AppError::validation("target_collection must not be empty"));
        }
        if let TargetId::Record(id) = &self.target.id {
            if id.trim().is_empty() || id == COLLECTION_SENTINEL {
                return Err(AppError::validation(
                    "target_id must be a record id; use a collection target for collection-level actions",
                ));
            }
        }
        Ok(())
    }

    /// Turn the request into a stored entry stamped `now`.
    pub fn into_entry(self, now: DateTime<Utc>) -> AuditLogEntry {
        AuditLogEntry {
            id: AuditLogId::new(),
            admin_id: self.admin_id,
            action_type: self.action_type,
            target: self.target,
            changes: self.changes,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target: AuditTarget) -> CreateAuditLogEntry {
        CreateAuditLogEntry {
            admin_id: "admin-1".to_string(),
            action_type: ActionType::Update,
            target,
            changes: ChangeSet::new().with("phone", "9999999999"),
        }
    }

    #[test]
    fn test_collection_sentinel_roundtrip() {
        let target = AuditTarget::collection("questions");
        assert_eq!(target.id.as_stored(), COLLECTION_SENTINEL);
        assert_eq!(TargetId::from_stored("*".to_string()), TargetId::Collection);
        assert_eq!(
            TargetId::from_stored("abc".to_string()),
            TargetId::Record("abc".to_string())
        );
    }

    #[test]
    fn test_validate() {
        assert!(entry(AuditTarget::record("users", "u1")).validate().is_ok());
        assert!(entry(AuditTarget::collection("questions")).validate().is_ok());
        assert!(entry(AuditTarget::record("users", "")).validate().is_err());
        assert!(entry(AuditTarget::record("users", "*")).validate().is_err());
        assert!(entry(AuditTarget::record("", "u1")).validate().is_err());

        let mut anonymous = entry(AuditTarget::record("users", "u1"));
        anonymous.admin_id = " ".to_string();
        assert!(anonymous.validate().is_err());
    }
}
