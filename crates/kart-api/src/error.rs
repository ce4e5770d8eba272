//! HTTP client errors.

use kart_store::SourceError;
use thiserror::Error;

/// Errors from talking to the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connect, timeout, TLS, body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status other than 404.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body didn't match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base URL is not an absolute http(s) URL with a host.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<ApiError> for SourceError {
    fn from(err: ApiError) -> Self {
        SourceError::Unavailable(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_map_to_unavailable() {
        let err: SourceError = ApiError::Status {
            status: 500,
            url: "http://localhost:3333/stock/1".to_string(),
        }
        .into();

        assert_eq!(
            err,
            SourceError::Unavailable(
                "Unexpected status 500 from http://localhost:3333/stock/1".to_string()
            )
        );
    }
}
