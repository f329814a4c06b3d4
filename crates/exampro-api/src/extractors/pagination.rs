//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use exampro_core::config::NotificationConfig;
use exampro_core::types::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default and maximum come from configuration).
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest` within the configured bounds.
    pub fn into_page_request(self, config: &NotificationConfig) -> PageRequest {
        PageRequest::bounded(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(config.default_page_size),
            config.max_page_size,
        )
    }
}
