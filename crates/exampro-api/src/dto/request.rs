//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use exampro_core::AppError;
use exampro_entity::notification::{NewNotification, NotificationStatus, NotificationType};

/// Admin compose request body.
///
/// `notification_type` is kept as a string so an unknown value surfaces as a
/// validation error instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Recipient user id.
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
    /// Title.
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    /// Body text.
    #[validate(length(min = 1, max = 2000, message = "message must be 1-2000 characters"))]
    pub message: String,
    /// One of `general`, `course`, `test`, `payment`, `result`.
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Id of the related item.
    pub reference_id: Option<String>,
    /// Kind of the related item.
    pub reference_type: Option<String>,
    /// Client navigation hint.
    pub action_url: Option<String>,
}

impl CreateNotificationRequest {
    /// Validates the body and converts it into a new notification.
    ///
    /// Provenance is left as system; the admin service stamps the caller.
    pub fn into_new_notification(self) -> Result<NewNotification, AppError> {
        self.validate()
            .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;

        let notification_type: NotificationType = self.notification_type.parse()?;

        let mut new = NewNotification::system(
            self.user_id,
            self.title,
            self.message,
            notification_type,
        );
        new = match (self.reference_id, self.reference_type) {
            (Some(id), Some(kind)) => new.with_reference(id, kind),
            (None, None) => new,
            _ => {
                return Err(AppError::validation(
                    "reference_id and reference_type must be given together",
                ));
            }
        };
        if let Some(url) = self.action_url {
            new = new.with_action_url(url);
        }
        Ok(new)
    }
}

/// Query filters for listing notifications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// `unread` or `read`.
    pub status: Option<String>,
}

impl NotificationFilter {
    /// Parses the status filter, if any.
    pub fn status(&self) -> Result<Option<NotificationStatus>, AppError> {
        self.status
            .as_deref()
            .map(|s| s.parse::<NotificationStatus>())
            .transpose()
    }
}

/// Query filters for the audit log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditFilter {
    /// Only records written by this admin.
    pub admin_id: Option<String>,
    /// Only records targeting this collection.
    pub collection: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use exampro_core::error::ErrorKind;

    fn request(notification_type: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            user_id: "stu-1".to_string(),
            title: "Result published".to_string(),
            message: "Mock 2 results are out.".to_string(),
            notification_type: notification_type.to_string(),
            reference_id: Some("test-2".to_string()),
            reference_type: Some("test".to_string()),
            action_url: Some("/results/test-2".to_string()),
        }
    }

    #[test]
    fn test_into_new_notification() {
        let new = request("Result").into_new_notification().unwrap();
        assert_eq!(new.notification_type, NotificationType::Result);
        assert_eq!(new.reference.unwrap().kind, "test");
        assert_eq!(new.action_url.as_deref(), Some("/results/test-2"));
    }

    #[test]
    fn test_unknown_type_is_validation_error() {
        let err = request("bogus").into_new_notification().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_empty_title_is_validation_error() {
        let mut req = request("general");
        req.title = String::new();
        assert_eq!(
            req.into_new_notification().unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_half_reference_is_rejected() {
        let mut req = request("general");
        req.reference_type = None;
        assert_eq!(
            req.into_new_notification().unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_status_filter() {
        let filter = NotificationFilter {
            status: Some("unread".to_string()),
        };
        assert_eq!(filter.status().unwrap(), Some(NotificationStatus::Unread));
        assert_eq!(NotificationFilter::default().status().unwrap(), None);

        let filter = NotificationFilter {
            status: Some("archived".to_string()),
        };
        assert!(filter.status().is_err());
    }
}
