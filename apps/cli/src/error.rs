//! # App Error Type
//!
//! Startup failures for the `kart` binary.
//!
//! Cart operations never fail from the caller's point of view (the shopper
//! is notified instead), so everything here happens before or around the
//! store: reading config, opening storage, building the HTTP client,
//! printing output.
//!
//! ```text
//! kart: error [CONFIG_ERROR]: api.timeout_secs must be greater than 0
//!              ─────────────   ──────────────────────────────────────
//!              ErrorCode       message
//! ```

use std::fmt;

use kart_api::ApiError;
use kart_store::StoreError;
use thiserror::Error;

/// Error returned from [`run`](crate::run).
#[derive(Debug, Clone, Error)]
#[error("error [{code}]: {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, one per failing subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Config file unreadable, unparsable or invalid
    ConfigError,

    /// Snapshot storage couldn't be opened
    StorageError,

    /// Stock/catalog source couldn't be set up or queried
    SourceError,

    /// Output encoding failed
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::SourceError => "SOURCE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("Invalid config file: {}", err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::new(ErrorCode::SourceError, err.to_string())
    }
}

impl From<kart_store::SourceError> for AppError {
    fn from(err: kart_store::SourceError) -> Self {
        AppError::new(ErrorCode::SourceError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Failed to encode output: {}", err))
    }
}

/// Result type for the binary.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = AppError::config("storage.key must not be empty");
        assert_eq!(
            err.to_string(),
            "error [CONFIG_ERROR]: storage.key must not be empty"
        );
    }
}
