//! In-memory append-only audit log.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use exampro_core::AppError;
use exampro_core::result::AppResult;
use exampro_core::types::{PageRequest, PageResponse};
use exampro_entity::audit::AuditLogEntry;

use crate::store::AuditLogStore;

/// In-memory audit log. Entries are only ever pushed.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLogStore {
    entries: Arc<RwLock<Vec<AuditLogEntry>>>,
}

impl MemoryAuditLogStore {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of appended entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been appended.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AuditLogStore for MemoryAuditLogStore {
    async fn append(&self, entry: &AuditLogEntry) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.id == entry.id) {
            return Err(AppError::conflict(format!(
                "Audit entry {} already exists",
                entry.id
            )));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn search(
        &self,
        admin_id: Option<&str>,
        collection: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let entries = self.entries.read().await;
        let mut matching: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|e| admin_id.is_none_or(|a| e.admin_id == a))
            .filter(|e| collection.is_none_or(|c| e.target.collection == c))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(PageResponse::from_ordered(matching, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use exampro_entity::audit::{ActionType, AuditTarget, ChangeSet, CreateAuditLogEntry};

    fn entry(admin_id: &str, collection: &str) -> AuditLogEntry {
        CreateAuditLogEntry {
            admin_id: admin_id.to_string(),
            action_type: ActionType::Delete,
            target: AuditTarget::record(collection, "rec-1"),
            changes: ChangeSet::new().with("is_active", false),
        }
        .into_entry(Utc::now())
    }

    #[tokio::test]
    async fn test_append_and_search_filters() {
        let store = MemoryAuditLogStore::new();
        store.append(&entry("admin-1", "users")).await.unwrap();
        store.append(&entry("admin-2", "users")).await.unwrap();
        store.append(&entry("admin-1", "questions")).await.unwrap();
        assert_eq!(store.len().await, 3);

        let by_admin = store
            .search(Some("admin-1"), None, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_admin.total_items, 2);

        let users = store
            .search(Some("admin-1"), Some("users"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(users.total_items, 1);
        assert_eq!(users.items[0].changes.get("is_active"), Some("false"));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryAuditLogStore::new();
        let e = entry("admin-1", "users");
        store.append(&e).await.unwrap();
        assert!(store.append(&e).await.is_err());
        assert_eq!(store.len().await, 1);
    }
}
