//! Error types for the extraction pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PressboxError>;

/// Errors that can occur while fetching and extracting articles
#[derive(Error, Debug)]
pub enum PressboxError {
    /// Network or HTTP failure retrieving the feed or an article page
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Malformed HTML or feed content
    #[error("failed to parse content: {0}")]
    Parse(String),

    /// Empty or unusable text passed to the summarizer
    #[error("summarization failed: {0}")]
    Summarization(String),

    /// General error
    #[error("{0}")]
    Other(String),
}
