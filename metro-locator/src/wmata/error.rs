//! WMATA client error types.

/// Errors from the WMATA HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum WmataError {
    /// HTTP request failed (connection refused, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),

    /// Invalid API key
    #[error("unauthorized: check WMATA_API_KEY")]
    Unauthorized,

    /// API key cannot be sent as a header value
    #[error("invalid API key: must be printable ASCII")]
    InvalidApiKey,

    /// Rate limited by the API
    #[error("rate limited by WMATA API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<reqwest::Error> for WmataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WmataError::Timeout(err)
        } else {
            WmataError::Http(err)
        }
    }
}
