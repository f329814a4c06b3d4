//! Notification listing configuration.

use serde::{Deserialize, Serialize};

/// Limits applied when listing notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Page size used when the client does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound on the page size a client may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}
