//! Error types for octoget-api.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub API operations.
///
/// Rate-limit exhaustion is not represented here: the fetch loop recovers
/// from it by sleeping until the reported reset and retrying, so callers
/// never observe it as an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No token available - neither passed explicitly nor found in the
    /// `GITHUB_PAT` environment variable.
    #[error("no GitHub token found - set GITHUB_PAT or pass a token explicitly")]
    MissingCredential,

    /// A header value (token or API version) contains characters that
    /// cannot appear in an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Non-success response status (other than a recoverable rate limit).
    #[error("GitHub API error ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    /// Transport-level failure, including request timeouts.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}
