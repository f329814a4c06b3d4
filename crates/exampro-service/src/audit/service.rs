//! Admin audit logging: one append-only record per applied admin mutation.
//!
//! The mutation commits first and the audit record is written after it.
//! There is no two-phase commit: if the process dies, or the audit append
//! fails, between the two writes, the mutation stays applied and is left
//! unaudited. Such gaps are logged at `error` with the full record so they
//! can be reconciled by hand.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use exampro_core::result::AppResult;
use exampro_core::types::{PageRequest, PageResponse};
use exampro_database::store::AuditLogStore;
use exampro_entity::audit::{
    ActionType, AuditLogEntry, AuditTarget, ChangeSet, CreateAuditLogEntry,
};

use crate::context::RequestContext;

/// Result of an audited mutation.
#[derive(Debug, Clone)]
pub struct Audited<T> {
    /// What the mutation returned.
    pub value: T,
    /// The audit record, or `None` if the append failed after the mutation
    /// was applied.
    pub entry: Option<AuditLogEntry>,
}

/// Records administrative mutations.
#[derive(Debug, Clone)]
pub struct AdminAuditService {
    store: Arc<dyn AuditLogStore>,
}

impl AdminAuditService {
    /// Creates a new audit service.
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Appends one immutable audit record.
    ///
    /// Call this only after the mutation it describes has been applied.
    pub async fn record(&self, data: CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        data.validate()?;
        let entry = data.into_entry(Utc::now());
        self.store.append(&entry).await?;

        info!(
            audit_id = %entry.id,
            admin_id = %entry.admin_id,
            action = %entry.action_type,
            collection = %entry.target.collection,
            target_id = %entry.target.id.as_stored(),
            fields = entry.changes.len(),
            "Admin action recorded"
        );

        Ok(entry)
    }

    /// Runs an admin mutation and audits it.
    ///
    /// If `mutation` fails its error is returned and nothing is recorded.
    /// If it succeeds, `describe` names the target and the touched fields and
    /// exactly one record is appended. A failing append does not fail the
    /// already applied mutation; it is logged and reported through
    /// [`Audited::entry`] being `None`.
    pub async fn audited<T, F, D>(
        &self,
        ctx: &RequestContext,
        action_type: ActionType,
        mutation: F,
        describe: D,
    ) -> AppResult<Audited<T>>
    where
        F: Future<Output = AppResult<T>>,
        D: FnOnce(&T) -> (AuditTarget, ChangeSet),
    {
        ctx.require_admin()?;

        let value = match mutation.await {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    admin_id = %ctx.user_id,
                    action = %action_type,
                    error = %e,
                    "Admin mutation failed; nothing audited"
                );
                return Err(e);
            }
        };

        let (target, changes) = describe(&value);
        let data = CreateAuditLogEntry {
            admin_id: ctx.user_id.clone(),
            action_type,
            target,
            changes,
        };

        let entry = match self.record(data.clone()).await {
            Ok(entry) => Some(entry),
            Err(e) => {
                error!(
                    admin_id = %data.admin_id,
                    action = %data.action_type,
                    collection = %data.target.collection,
                    target_id = %data.target.id.as_stored(),
                    changes = %data.changes.to_json(),
                    error = %e,
                    "Admin mutation applied but audit record could not be written"
                );
                None
            }
        };

        Ok(Audited { value, entry })
    }

    /// Searches the audit log. Admin only.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        admin_id: Option<&str>,
        collection: Option<&str>,
        page: PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        ctx.require_admin()?;
        self.store.search(admin_id, collection, &page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use exampro_core::AppError;
    use exampro_core::error::ErrorKind;
    use exampro_database::memory::MemoryAuditLogStore;

    /// Audit store whose appends always fail.
    #[derive(Debug)]
    struct BrokenAuditStore;

    #[async_trait]
    impl AuditLogStore for BrokenAuditStore {
        async fn append(&self, _entry: &AuditLogEntry) -> AppResult<()> {
            Err(AppError::storage("connection reset"))
        }

        async fn search(
            &self,
            _admin_id: Option<&str>,
            _collection: Option<&str>,
            page: &PageRequest,
        ) -> AppResult<PageResponse<AuditLogEntry>> {
            Ok(PageResponse::from_ordered(Vec::new(), page))
        }
    }

    fn service() -> (AdminAuditService, MemoryAuditLogStore) {
        let store = MemoryAuditLogStore::new();
        (AdminAuditService::new(Arc::new(store.clone())), store)
    }

    fn deactivate(student_id: &str) -> (AuditTarget, ChangeSet) {
        (
            AuditTarget::record("users", student_id),
            ChangeSet::new().with("is_active", false),
        )
    }

    #[tokio::test]
    async fn test_successful_mutation_writes_exactly_one_record() {
        let (service, store) = service();
        let ctx = RequestContext::admin("admin-1");

        let audited = service
            .audited(&ctx, ActionType::Delete, async { Ok("stu-9".to_string()) }, |id| {
                deactivate(id)
            })
            .await
            .unwrap();

        assert_eq!(audited.value, "stu-9");
        let entry = audited.entry.expect("audit written");
        assert_eq!(entry.admin_id, "admin-1");
        assert_eq!(entry.action_type, ActionType::Delete);
        assert_eq!(entry.target, AuditTarget::record("users", "stu-9"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_failed_mutation_writes_nothing() {
        let (service, store) = service();
        let ctx = RequestContext::admin("admin-1");

        let err = service
            .audited(
                &ctx,
                ActionType::Update,
                async { Err::<String, _>(AppError::not_found("Student not found")) },
                |id| deactivate(id),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_fail_mutation() {
        let service = AdminAuditService::new(Arc::new(BrokenAuditStore));
        let ctx = RequestContext::admin("admin-1");

        let audited = service
            .audited(&ctx, ActionType::Delete, async { Ok("stu-9".to_string()) }, |id| {
                deactivate(id)
            })
            .await
            .unwrap();

        assert_eq!(audited.value, "stu-9");
        assert!(audited.entry.is_none());
    }

    #[tokio::test]
    async fn test_non_admin_cannot_run_audited_mutation() {
        let (service, store) = service();
        let ctx = RequestContext::student("u1");
        let mut ran = false;

        let err = service
            .audited(
                &ctx,
                ActionType::Create,
                async {
                    ran = true;
                    Ok(())
                },
                |_| (AuditTarget::collection("questions"), ChangeSet::new()),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(!ran);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_record_collection_level_import() {
        let (service, _) = service();
        let entry = service
            .record(CreateAuditLogEntry {
                admin_id: "admin-1".to_string(),
                action_type: ActionType::Create,
                target: AuditTarget::collection("questions"),
                changes: ChangeSet::new()
                    .with("action", "questions_uploaded")
                    .with("count", 40)
                    .with("section", "Physics"),
            })
            .await
            .unwrap();

        assert_eq!(entry.target.id.as_stored(), "*");
        assert_eq!(entry.changes.get("count"), Some("40"));
    }

    #[tokio::test]
    async fn test_record_rejects_missing_admin() {
        let (service, store) = service();
        let err = service
            .record(CreateAuditLogEntry {
                admin_id: String::new(),
                action_type: ActionType::Update,
                target: AuditTarget::record("users", "u1"),
                changes: ChangeSet::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_search_requires_admin() {
        let (service, _) = service();
        let err = service
            .search(&RequestContext::student("u1"), None, None, PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
