use std::time::Duration;

use reqwest::{StatusCode, header::InvalidHeaderValue};
use thiserror::Error;

/// Failure of a single request against the helpdesk API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("API token cannot be used as a header value")]
    InvalidCredential(#[from] InvalidHeaderValue),
}

/// Failure of a whole pagination run. Records fetched before the failure are dropped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot fetch page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: ApiError,
    },

    #[error("stopped after {max_pages} pages while the server still reports more")]
    PageLimit { max_pages: u32 },

    #[error("listing did not finish within {0:?}")]
    Timeout(Duration),
}
