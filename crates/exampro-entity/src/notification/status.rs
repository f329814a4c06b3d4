//! Read status of a notification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use exampro_core::AppError;

/// Stored status value; `unread` is always the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Not yet seen by the user.
    Unread,
    /// Marked as read.
    Read,
}

impl NotificationStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            _ => Err(AppError::validation(format!(
                "Invalid notification status: '{s}'. Expected one of: unread, read"
            ))),
        }
    }
}

/// Read state of a notification.
///
/// Carrying the timestamp inside the `Read` variant makes "`read_at` is set
/// if and only if the status is `read`" hold by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReadState {
    /// Not yet read.
    #[default]
    Unread,
    /// Read at the given instant. Never cleared or moved once set.
    Read {
        /// When the first successful mark-as-read happened.
        read_at: DateTime<Utc>,
    },
}

impl ReadState {
    /// Rebuild the state from the two stored columns.
    pub fn from_columns(
        status: NotificationStatus,
        read_at: Option<DateTime<Utc>>,
    ) -> Result<Self, AppError> {
        match (status, read_at) {
            (NotificationStatus::Unread, None) => Ok(Self::Unread),
            (NotificationStatus::Read, Some(read_at)) => Ok(Self::Read { read_at }),
            (NotificationStatus::Unread, Some(_)) => Err(AppError::internal(
                "Stored notification is unread but has read_at set",
            )),
            (NotificationStatus::Read, None) => Err(AppError::internal(
                "Stored notification is read but has no read_at",
            )),
        }
    }

    /// The status column value.
    pub fn status(&self) -> NotificationStatus {
        match self {
            Self::Unread => NotificationStatus::Unread,
            Self::Read { .. } => NotificationStatus::Read,
        }
    }

    /// The `read_at` column value.
    pub fn read_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unread => None,
            Self::Read { read_at } => Some(*read_at),
        }
    }
}
