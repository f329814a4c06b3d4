//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use exampro_core::AppError;
use exampro_core::result::AppResult;
use exampro_core::types::NotificationId;

use super::kind::NotificationType;
use super::provenance::Provenance;
use super::status::{NotificationStatus, ReadState};

/// Loose pointer to the platform entity a notification is about.
///
/// Never checked against the referenced collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReference {
    /// Id of the related item (course, test, payment, ...).
    pub id: String,
    /// Kind of the related item, e.g. `"course"`.
    pub kind: String,
}

impl NotificationReference {
    /// Create a reference.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }

    /// Rebuild a reference from the `reference_id` and `reference_type`
    /// columns, which are either both set or both empty.
    pub fn from_columns(id: Option<String>, kind: Option<String>) -> AppResult<Option<Self>> {
        match (id, kind) {
            (Some(id), Some(kind)) => Ok(Some(Self { id, kind })),
            (None, None) => Ok(None),
            (id, kind) => Err(AppError::internal(format!(
                "Stored notification reference is incomplete: id={id:?}, type={kind:?}"
            ))),
        }
    }
}

/// Everything a producer supplies to create a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification type.
    pub notification_type: NotificationType,
    /// Related entity, if any.
    pub reference: Option<NotificationReference>,
    /// Client navigation hint; opaque here.
    pub action_url: Option<String>,
    /// Who produced the notification.
    pub provenance: Provenance,
}

impl NewNotification {
    /// A system-generated notification.
    pub fn system(
        user_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            message: message.into(),
            notification_type,
            reference: None,
            action_url: None,
            provenance: Provenance::System,
        }
    }

    /// A notification composed by an administrator.
    pub fn by_admin(
        admin_id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        Self {
            provenance: Provenance::Admin {
                created_by: admin_id.into(),
            },
            ..Self::system(user_id, title, message, notification_type)
        }
    }

    /// Attach a reference to a related entity.
    pub fn with_reference(mut self, id: impl Into<String>, kind: impl Into<String>) -> Self {
        self.reference = Some(NotificationReference::new(id, kind));
        self
    }

    /// Attach a client navigation hint.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// Check required fields before anything is written.
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("user_id", &self.user_id)?;
        require_non_empty("title", &self.title)?;
        require_non_empty("message", &self.message)?;

        if let Some(reference) = &self.reference {
            require_non_empty("reference_id", &reference.id)?;
            require_non_empty("reference_type", &reference.kind)?;
        }

        if let Provenance::Admin { created_by } = &self.provenance {
            require_non_empty("created_by", created_by)?;
        }

        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// A user-addressed notification.
///
/// Identity, creation time and read state are private: the id and
/// `created_at` never change after construction, and the read state only
/// moves through [`Notification::mark_as_read`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    /// The recipient user.
    pub user_id: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification type.
    pub notification_type: NotificationType,
    /// Related entity, if any.
    pub reference: Option<NotificationReference>,
    /// Client navigation hint.
    pub action_url: Option<String>,
    /// Who produced the notification.
    pub provenance: Provenance,
    read_state: ReadState,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Validate the input and create an unread notification stamped `now`.
    pub fn create(new: NewNotification, now: DateTime<Utc>) -> AppResult<Self> {
        new.validate()?;
        Ok(Self::from_parts(
            NotificationId::new(),
            new,
            ReadState::Unread,
            now,
        ))
    }

    /// Rebuild a notification that was already persisted.
    pub fn restore(
        id: NotificationId,
        body: NewNotification,
        read_state: ReadState,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::from_parts(id, body, read_state, created_at)
    }

    fn from_parts(
        id: NotificationId,
        body: NewNotification,
        read_state: ReadState,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: body.user_id,
            title: body.title,
            message: body.message,
            notification_type: body.notification_type,
            reference: body.reference,
            action_url: body.action_url,
            provenance: body.provenance,
            read_state,
            created_at,
        }
    }

    /// Transition `unread -> read`, stamping `read_at = now`.
    ///
    /// Idempotent: on an already read notification this does nothing and
    /// `read_at` keeps the value from the first call. Returns whether the
    /// state changed.
    pub fn mark_as_read(&mut self, now: DateTime<Utc>) -> bool {
        match self.read_state {
            ReadState::Unread => {
                self.read_state = ReadState::Read { read_at: now };
                true
            }
            ReadState::Read { .. } => false,
        }
    }

    /// Unique notification identifier.
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Current read state.
    pub fn read_state(&self) -> ReadState {
        self.read_state
    }

    /// Current status.
    pub fn status(&self) -> NotificationStatus {
        self.read_state.status()
    }

    /// When the notification was first marked read.
    pub fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_state.read_at()
    }

    /// Whether the notification is still unread.
    pub fn is_unread(&self) -> bool {
        self.status() == NotificationStatus::Unread
    }

    /// When the notification was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use exampro_core::error::ErrorKind;

    fn payment_received() -> NewNotification {
        NewNotification::system(
            "u1",
            "Payment received",
            "We received your payment for NEET Crash Course.",
            NotificationType::Payment,
        )
    }

    #[test]
    fn test_create_starts_unread() {
        let now = Utc::now();
        let n = Notification::create(payment_received(), now).unwrap();
        assert_eq!(n.status(), NotificationStatus::Unread);
        assert_eq!(n.read_at(), None);
        assert_eq!(n.created_at(), now);
        assert!(n.provenance.is_system_generated());
    }

    #[test]
    fn test_mark_as_read_sets_read_at() {
        let t1 = Utc::now();
        let mut n = Notification::create(payment_received(), t1).unwrap();
        assert!(n.mark_as_read(t1));
        assert_eq!(n.status(), NotificationStatus::Read);
        assert_eq!(n.read_at(), Some(t1));
    }

    #[test]
    fn test_mark_as_read_twice_keeps_first_read_at() {
        let t1 = Utc::now();
        let t2 = t1 + Duration::minutes(5);
        let mut n = Notification::create(payment_received(), t1).unwrap();

        assert!(n.mark_as_read(t1));
        assert!(!n.mark_as_read(t2));

        assert_eq!(n.status(), NotificationStatus::Read);
        assert_eq!(n.read_at(), Some(t1));
    }

    #[test]
    fn test_reference_from_columns() {
        assert_eq!(NotificationReference::from_columns(None, None).unwrap(), None);
        assert_eq!(
            NotificationReference::from_columns(Some("c-1".into()), Some("course".into()))
                .unwrap(),
            Some(NotificationReference::new("c-1", "course"))
        );

        for (id, kind) in [(Some("c-1"), None), (None, Some("course"))] {
            let err = NotificationReference::from_columns(
                id.map(str::to_string),
                kind.map(str::to_string),
            )
            .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Internal);
        }
    }

    #[test]
    fn test_required_fields() {
        for new in [
            NewNotification::system("", "t", "m", NotificationType::General),
            NewNotification::system("u1", "  ", "m", NotificationType::General),
            NewNotification::system("u1", "t", "", NotificationType::General),
            NewNotification::system("u1", "t", "m", NotificationType::Course)
                .with_reference("", "course"),
            NewNotification::by_admin("", "u1", "t", "m", NotificationType::General),
        ] {
            let err = Notification::create(new, Utc::now()).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[test]
    fn test_admin_provenance_and_reference() {
        let new = NewNotification::by_admin(
            "admin-7",
            "u1",
            "Batch timing changed",
            "Physics moves to 6pm.",
            NotificationType::Course,
        )
        .with_reference("course-42", "course")
        .with_action_url("/courses/course-42");

        let n = Notification::create(new, Utc::now()).unwrap();
        assert!(!n.provenance.is_system_generated());
        assert_eq!(n.provenance.created_by(), Some("admin-7"));
        assert_eq!(n.reference.as_ref().map(|r| r.kind.as_str()), Some("course"));
        assert_eq!(n.action_url.as_deref(), Some("/courses/course-42"));
    }
}
