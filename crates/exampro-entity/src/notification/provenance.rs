//! Who produced a notification.

use serde::{Deserialize, Serialize};

use exampro_core::AppError;

/// Whether a notification was generated by a platform workflow or written
/// by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Provenance {
    /// Produced by an enrollment, payment, test or result workflow.
    #[default]
    System,
    /// Composed manually by an administrator.
    Admin {
        /// The administrator's id.
        created_by: String,
    },
}

impl Provenance {
    /// The `is_system_generated` column value.
    pub fn is_system_generated(&self) -> bool {
        matches!(self, Self::System)
    }

    /// The `created_by` column value.
    pub fn created_by(&self) -> Option<&str> {
        match self {
            Self::System => None,
            Self::Admin { created_by } => Some(created_by),
        }
    }

    /// Rebuild provenance from the two stored columns.
    pub fn from_columns(
        is_system_generated: bool,
        created_by: Option<String>,
    ) -> Result<Self, AppError> {
        match (is_system_generated, created_by) {
            (true, None) => Ok(Self::System),
            (true, Some(created_by)) => Err(AppError::internal(format!(
                "Stored system notification has created_by {created_by}"
            ))),
            (false, Some(created_by)) if !created_by.is_empty() => Ok(Self::Admin { created_by }),
            (false, _) => Err(AppError::internal(
                "Stored admin notification has no created_by",
            )),
        }
    }
}
