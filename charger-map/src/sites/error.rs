//! Site directory error types.

/// Errors that can occur when fetching the site directory.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Directory returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
