use std::time::Duration;
use thiserror::Error;

/// Failures that end a whole traversal.
///
/// Per-node problems (non-200 responses, exhausted retries, undecodable
/// bodies) never show up here: they only mean the node contributes nothing.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Traversal did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Traversal was interrupted before completion")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, CrawlError>;
