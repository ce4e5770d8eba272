//! # Store Error Types
//!
//! Error types for the collaborators the Cart Store talks to.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP / in-memory lookup          File / memory storage                │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  SourceError                      StoreError                            │
//! │  ├── NotFound ──────────┐         └── Io / Serialization / Corrupted   │
//! │  └── Unavailable ───┐   │                      │                        │
//! │                     ▼   ▼                      ▼                        │
//! │              CartError::SourceUnavailable / NotFound / Persistence     │
//! │                                │                                        │
//! │                                ▼                                        │
//! │               one generic notification per operation                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kart_core::CartError;
use thiserror::Error;

// =============================================================================
// Source Error
// =============================================================================

/// Stock or catalog lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source has no entry for the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The source could not be reached or answered with garbage.
    ///
    /// ## When This Occurs
    /// - Connection refused, DNS failure, timeout
    /// - Unexpected HTTP status
    /// - Response body that doesn't decode
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        SourceError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        SourceError::Unavailable(reason.into())
    }
}

impl From<SourceError> for CartError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound { entity, id } => CartError::NotFound { entity, id },
            SourceError::Unavailable(reason) => CartError::SourceUnavailable(reason),
        }
    }
}

/// Result type for source lookups.
pub type SourceResult<T> = Result<T, SourceError>;

// =============================================================================
// Store Error
// =============================================================================

/// Snapshot storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The key-value map could not be encoded.
    #[error("Storage serialization failed: {0}")]
    Serialization(String),

    /// The backing file exists but isn't a valid key-value map.
    #[error("Storage is corrupted: {0}")]
    Corrupted(String),
}

impl From<StoreError> for CartError {
    fn from(err: StoreError) -> Self {
        CartError::Persistence(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
