//! Pulse.eco client error types.

/// Errors from talking to the Pulse.eco API.
///
/// Every variant means the upstream service was unusable for this call.
/// Setup surfaces these to the operator; refreshes log and skip them.
#[derive(Debug, thiserror::Error)]
pub enum PulseEcoError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// First 500 characters of the offending body, if any.
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Credentials were rejected
    #[error("unauthorized: check username and password")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by Pulse.eco API")]
    RateLimited,

    /// Client could not be built from the given settings
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PulseEcoError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized: check username and password");

        let err = PulseEcoError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = PulseEcoError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = PulseEcoError::InvalidConfig("city must not be empty".into());
        assert_eq!(err.to_string(), "invalid configuration: city must not be empty");
    }
}
