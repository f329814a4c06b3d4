//! Notification type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use exampro_core::AppError;

/// What kind of platform event a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Anything not tied to a specific workflow.
    General,
    /// Course enrollment and course content updates.
    Course,
    /// Test series and mock test events.
    Test,
    /// Payment confirmations and failures.
    Payment,
    /// Result publication.
    Result,
}

impl NotificationType {
    /// Every accepted type, in declaration order.
    pub const ALL: [NotificationType; 5] = [
        Self::General,
        Self::Course,
        Self::Test,
        Self::Payment,
        Self::Result,
    ];

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Course => "course",
            Self::Test => "test",
            Self::Payment => "payment",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "course" => Ok(Self::Course),
            "test" => Ok(Self::Test),
            "payment" => Ok(Self::Payment),
            "result" => Ok(Self::Result),
            _ => Err(AppError::validation(format!(
                "Invalid notification type: '{s}'. Expected one of: general, course, test, payment, result"
            ))),
        }
    }
}
