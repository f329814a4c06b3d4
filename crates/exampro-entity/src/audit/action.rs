//! Admin action type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use exampro_core::AppError;

/// The kind of mutation an administrator applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// A record was created.
    Create,
    /// A record was modified.
    Update,
    /// A record was removed or deactivated.
    Delete,
}

impl ActionType {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::validation(format!(
                "Invalid action type: '{s}'. Expected one of: create, update, delete"
            ))),
        }
    }
}
