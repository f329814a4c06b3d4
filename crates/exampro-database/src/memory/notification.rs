//! In-memory notification store using `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use exampro_core::AppError;
use exampro_core::result::AppResult;
use exampro_core::types::{NotificationId, PageRequest, PageResponse};
use exampro_entity::notification::{Notification, NotificationStatus};

use crate::store::NotificationStore;

/// In-memory notification store.
///
/// `DashMap` locks the shard holding an entry for the duration of a write,
/// which gives per-document serialised writes. Suitable for tests and
/// single-node deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    docs: Arc<DashMap<NotificationId, Notification>>,
}

impl MemoryNotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        match self.docs.entry(notification.id()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Notification {} already exists",
                notification.id()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(notification.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.docs.get(&id).map(|doc| doc.clone()))
    }

    async fn update_read_state(&self, notification: &Notification) -> AppResult<Notification> {
        let mut stored = self.docs.get_mut(&notification.id()).ok_or_else(|| {
            AppError::not_found(format!("Notification {} not found", notification.id()))
        })?;

        if let Some(read_at) = notification.read_at() {
            stored.mark_as_read(read_at);
        }

        Ok(stored.clone())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        status: Option<NotificationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let mut matching: Vec<Notification> = self
            .docs
            .iter()
            .filter(|doc| doc.user_id == user_id)
            .filter(|doc| status.is_none_or(|s| doc.status() == s))
            .map(|doc| doc.clone())
            .collect();

        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });

        Ok(PageResponse::from_ordered(matching, page))
    }

    async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        let count = self
            .docs
            .iter()
            .filter(|doc| doc.user_id == user_id && doc.is_unread())
            .count();
        Ok(count as u64)
    }

    async fn mark_all_read(&self, user_id: &str, read_at: DateTime<Utc>) -> AppResult<u64> {
        let mut changed = 0;
        for mut doc in self.docs.iter_mut() {
            if doc.user_id == user_id && doc.mark_as_read(read_at) {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use exampro_core::error::ErrorKind;
    use exampro_entity::notification::{NewNotification, NotificationType};

    fn notification(user_id: &str, created_at: DateTime<Utc>) -> Notification {
        Notification::create(
            NewNotification::system(
                user_id,
                "Result published",
                "Mock test 3",
                NotificationType::Result,
            ),
            created_at,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryNotificationStore::new();
        let n = notification("u1", Utc::now());
        store.insert(&n).await.unwrap();

        assert_eq!(store.find_by_id(n.id()).await.unwrap(), Some(n.clone()));
        let err = store.insert(&n).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_read_state_keeps_first_writer() {
        let store = MemoryNotificationStore::new();
        let t1 = Utc::now();
        let n = notification("u1", t1);
        store.insert(&n).await.unwrap();

        let mut first = n.clone();
        first.mark_as_read(t1 + Duration::seconds(1));
        let mut second = n.clone();
        second.mark_as_read(t1 + Duration::seconds(2));

        store.update_read_state(&first).await.unwrap();
        let stored = store.update_read_state(&second).await.unwrap();
        assert_eq!(stored.read_at(), Some(t1 + Duration::seconds(1)));
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let store = MemoryNotificationStore::new();
        let err = store
            .update_read_state(&notification("u1", Utc::now()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_find_by_user_filters_and_orders() {
        let store = MemoryNotificationStore::new();
        let t0 = Utc::now();
        let older = notification("u1", t0);
        let newer = notification("u1", t0 + Duration::minutes(1));
        let other = notification("u2", t0 + Duration::minutes(2));
        for n in [&older, &newer, &other] {
            store.insert(n).await.unwrap();
        }

        let page = store
            .find_by_user("u1", None, &PageRequest::default())
            .await
            .unwrap();
        let ids: Vec<_> = page.items.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![newer.id(), older.id()]);
        assert_eq!(page.total_items, 2);

        let read = store
            .find_by_user("u1", Some(NotificationStatus::Read), &PageRequest::default())
            .await
            .unwrap();
        assert!(read.items.is_empty());
    }

    #[tokio::test]
    async fn test_mark_all_read_only_touches_unread() {
        let store = MemoryNotificationStore::new();
        let t0 = Utc::now();
        let mut already = notification("u1", t0);
        already.mark_as_read(t0);
        let fresh = notification("u1", t0);
        store.insert(&already).await.unwrap();
        store.insert(&fresh).await.unwrap();

        let later = t0 + Duration::hours(1);
        assert_eq!(store.mark_all_read("u1", later).await.unwrap(), 1);
        assert_eq!(store.count_unread("u1").await.unwrap(), 0);

        let kept = store.find_by_id(already.id()).await.unwrap().unwrap();
        assert_eq!(kept.read_at(), Some(t0));
    }
}
