use std::time::Duration;

use log::{debug, trace};

use crate::api::chatwoot::ChatwootApi;
use crate::config::{DEFAULT_MAX_ELAPSED, DEFAULT_MAX_PAGES, DEFAULT_PER_PAGE};
use crate::error::FetchError;
use crate::models::{Conversation, PageMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
    pub per_page: u32,
    pub max_pages: u32,
    pub max_elapsed: Duration,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            max_elapsed: DEFAULT_MAX_ELAPSED,
        }
    }
}

/// Fetches every page of the account's conversation listing.
///
/// Pages are requested one after another, starting at 1, until the server
/// reports `current_page >= total_pages`. The result is all-or-nothing: any
/// failing page, the page ceiling or the elapsed-time ceiling discards what
/// was gathered so far.
pub async fn fetch_all_conversations<A>(
    api: &A,
    account_id: u64,
    limits: &PaginationLimits,
) -> Result<Vec<Conversation>, FetchError>
where
    A: ChatwootApi + ?Sized,
{
    fetch_all_conversations_with_progress(api, account_id, limits, |_, _| {}).await
}

/// Same as [`fetch_all_conversations`], calling `on_page` with the metadata
/// and record count of every page received.
pub async fn fetch_all_conversations_with_progress<A, F>(
    api: &A,
    account_id: u64,
    limits: &PaginationLimits,
    on_page: F,
) -> Result<Vec<Conversation>, FetchError>
where
    A: ChatwootApi + ?Sized,
    F: FnMut(&PageMeta, usize),
{
    tokio::time::timeout(
        limits.max_elapsed,
        collect_pages(api, account_id, limits, on_page),
    )
    .await
    .unwrap_or_else(|_| Err(FetchError::Timeout(limits.max_elapsed)))
}

async fn collect_pages<A, F>(
    api: &A,
    account_id: u64,
    limits: &PaginationLimits,
    mut on_page: F,
) -> Result<Vec<Conversation>, FetchError>
where
    A: ChatwootApi + ?Sized,
    F: FnMut(&PageMeta, usize),
{
    let mut conversations = Vec::new();
    let mut page = 1;

    loop {
        if page > limits.max_pages {
            return Err(FetchError::PageLimit {
                max_pages: limits.max_pages,
            });
        }

        let response = api
            .list_conversations(account_id, page, limits.per_page)
            .await
            .map_err(|source| FetchError::Page { page, source })?;

        debug!(
            "page {}/{} returned {} conversations",
            response.meta.current_page,
            response.meta.total_pages,
            response.payload.len()
        );
        on_page(&response.meta, response.payload.len());

        if page == 1 && response.payload.is_empty() {
            trace!("first page is empty, nothing more to fetch");
            return Ok(conversations);
        }

        conversations.extend(response.payload);

        if !response.meta.has_more() {
            return Ok(conversations);
        }

        page += 1;
    }
}
