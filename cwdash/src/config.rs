use std::time::Duration;

use crate::pagination::PaginationLimits;

pub const DEFAULT_BASE_URL: &str = "https://suporte.amssergipe.com.br";
pub const DEFAULT_ACCOUNT_ID: u64 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_MAX_PAGES: u32 = 500;
pub const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(300);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the dashboard needs to reach the helpdesk, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Helpdesk host, without the `/api/v1` suffix.
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header. Empty disables fetching.
    pub credential: String,
    /// Tenant whose conversations are listed.
    pub account_id: u64,
    pub per_page: u32,
    /// Hard ceiling on requests issued by one fetch.
    pub max_pages: u32,
    /// Hard ceiling on the wall-clock time of one fetch.
    pub max_elapsed: Duration,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential: String::new(),
            account_id: DEFAULT_ACCOUNT_ID,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            max_elapsed: DEFAULT_MAX_ELAPSED,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl DashboardConfig {
    /// Any non-empty token counts, whitespace included.
    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }

    pub fn limits(&self) -> PaginationLimits {
        PaginationLimits {
            per_page: self.per_page,
            max_pages: self.max_pages,
            max_elapsed: self.max_elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_credential_is_missing() {
        let mut config = DashboardConfig::default();
        assert!(!config.has_credential());

        config.credential = " ".to_string();
        assert!(config.has_credential());

        config.credential = "secret".to_string();
        assert!(config.has_credential());
    }
}
