//! This module defines the common functionality for paging data.

use serde::Deserialize;

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum records to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// The paging parameters a client may supply in a query string.
#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct PaginationParams {
    /// The one-based page number to return.
    pub page: Option<u64>,
    /// The number of records per page.
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Resolve the client-supplied parameters against `config`, returning
    /// `(page, limit)`.
    ///
    /// Zero values are clamped to one so that the page window and page count
    /// are always well defined.
    pub fn resolve(&self, config: &PaginationConfig) -> (u64, u64) {
        let page = self.page.unwrap_or(config.default_page).max(1);
        let limit = self.limit.unwrap_or(config.default_page_size).max(1);

        (page, limit)
    }
}

/// The number of pages needed to show `total` records at `limit` records per page.
pub(crate) fn total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit)
}

#[cfg(test)]
mod pagination_tests {
    use crate::pagination::{PaginationConfig, PaginationParams, total_pages};

    #[test]
    fn resolve_uses_defaults_when_unset() {
        let params = PaginationParams::default();

        let (page, limit) = params.resolve(&PaginationConfig::default());

        assert_eq!((page, limit), (1, 10));
    }

    #[test]
    fn resolve_prefers_client_values() {
        let params = PaginationParams {
            page: Some(3),
            limit: Some(25),
        };

        let (page, limit) = params.resolve(&PaginationConfig::default());

        assert_eq!((page, limit), (3, 25));
    }

    #[test]
    fn resolve_clamps_zero_values() {
        let params = PaginationParams {
            page: Some(0),
            limit: Some(0),
        };

        let (page, limit) = params.resolve(&PaginationConfig::default());

        assert_eq!((page, limit), (1, 1));
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn page_count_of_exact_multiple() {
        assert_eq!(total_pages(30, 10), 3);
    }

    #[test]
    fn page_count_of_empty_set_is_zero() {
        assert_eq!(total_pages(0, 10), 0);
    }
}
