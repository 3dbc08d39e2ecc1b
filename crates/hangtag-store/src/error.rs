//! # Store Error Types
//!
//! Error types for key-value store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure (io::Error, quota, serde_json::Error)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key and failure class             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TrackerError (boundary) ← Rendered as a transient Notice              │
//! │                                                                         │
//! │  A failed WRITE surfaces to the caller; the in-memory ledger remains   │
//! │  the source of truth for the session. A failed READ at startup is      │
//! │  absorbed: the ledger starts empty (see blobs.rs).                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Key-value store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store backend cannot be opened at all.
    ///
    /// ## When This Occurs
    /// - The data directory cannot be created
    /// - File permissions forbid access
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Reading a blob failed for a reason other than absence.
    ///
    /// Absence is not an error: `get` returns `Ok(None)` for a missing key.
    #[error("Failed to read blob '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    /// Writing a blob failed.
    ///
    /// ## When This Occurs
    /// - Disk full or file system error
    /// - The temp-file rename failed
    #[error("Failed to write blob '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    /// The store refused the write because its quota is exhausted.
    ///
    /// The browser's local store throws on quota; [`crate::MemoryStore`]
    /// models the same failure for tests.
    #[error("Store quota exceeded")]
    QuotaExceeded,

    /// Serializing a blob to its stored text form failed.
    #[error("Failed to encode blob '{key}': {reason}")]
    Encode { key: String, reason: String },
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::WriteFailed {
            key: "inventory".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to write blob 'inventory': disk full");

        assert_eq!(StoreError::QuotaExceeded.to_string(), "Store quota exceeded");
    }
}
