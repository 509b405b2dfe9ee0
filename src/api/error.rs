use thiserror::Error;

/// Failures surfaced by [`QueryClient`](super::QueryClient) calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("API Error: {status} {status_text}")]
    RequestFailed { status: u16, status_text: String },

    /// The call could not complete (connection refused, timeout, ...)
    #[error("Request to {url} could not complete")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP client could not be configured (e.g. an invalid user agent)
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status for `RequestFailed`, `None` for every other kind
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message() {
        let err = ApiError::RequestFailed {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API Error: 404 Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_encode_has_no_status() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(source);
        assert_eq!(err.status(), None);
    }
}
