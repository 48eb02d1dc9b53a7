//! Transport-level errors shared by the backend and inference clients.

/// Failure talking to an HTTP service.
///
/// Covers the three failure classes the client distinguishes: the server
/// could not be reached, it answered with a non-success status (with the
/// message from its `{error}` payload when present), or it answered with
/// something we could not read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to connect to the server at {0}")]
    Connection(String),
    #[error("Request timed out")]
    Timeout,
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("Unexpected response: {0}")]
    ResponseParsing(String),
}

impl ApiError {
    /// Whether the server was never reached.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout | Self::HttpClient(_))
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_connect() {
            Self::Connection(base_url.to_string())
        } else if err.is_timeout() {
            Self::Timeout
        } else {
            Self::HttpClient(err.to_string())
        }
    }
}
