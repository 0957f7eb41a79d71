//! Geocoding error types.

/// Errors resolving an address to coordinates.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The geocoder returned no match for the address
    #[error("unable to geocode address {0:?}")]
    NoMatch(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("geocoding request timed out: {0}")]
    Timeout(reqwest::Error),

    /// Geocoder returned an error status
    #[error("geocoder error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeocodeError::Timeout(err)
        } else {
            GeocodeError::Http(err)
        }
    }
}
