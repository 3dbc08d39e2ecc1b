//! # Notification Boundary
//!
//! Unified error type for ledger operations, and the transient `Notice`
//! every outcome is rendered as.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Hangtag                                │
//! │                                                                         │
//! │  Frontend                    Rust Engine                                │
//! │  ────────                    ───────────                                │
//! │                                                                         │
//! │  add-stock form / scan                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Ledger operation                                                │  │
//! │  │  Result<T, TrackerError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ├── CoreError   (unknown SKU, no stock, bad input) ──┐  │  │
//! │  │         ├── StoreError  (write failed, quota)  ── error! ────┤  │  │
//! │  │         └── ScanError   (camera unavailable)  ───────────────┤  │  │
//! │  │                                                              ▼  │  │
//! │  │  Success ─────────────────────────────────────────────► Notice  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Notice { severity, message } → shown ~3s, auto-dismissed              │
//! │                                                                         │
//! │  No error is fatal: the in-memory ledger keeps operating after any     │
//! │  single failed operation.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use hangtag_core::CoreError;
use hangtag_store::StoreError;

use crate::scanner::ScanError;

/// How long the view keeps a notice on screen before auto-dismissing.
pub const NOTICE_DISMISS_MS: u64 = 3000;

// =============================================================================
// Tracker Error
// =============================================================================

/// Any failure a ledger-facing operation can produce.
///
/// Wraps the lower layers so callers handle one type; the boundary turns
/// every variant into a [`Notice`].
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Business rule violation or bad input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The key-value store failed. The in-memory mutation stands; only
    /// the write was lost.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The scan device failed to start or stop.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Convenience type alias for Results with TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;

// =============================================================================
// Notice
// =============================================================================

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Success,
    Error,
}

/// A transient user-visible notification.
///
/// ## Serialization
/// This is what the frontend receives for every operation outcome:
/// ```json
/// {
///   "severity": "success",
///   "message": "1 piece deducted: 100-SHIRT-RED-M"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    /// Creates a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Notice for a successful restock entry.
    pub fn added(sku: &str, pieces: u32) -> Self {
        Notice::success(format!("Added {pieces} pieces for {sku}"))
    }

    /// Notice for a successful scan-driven sale.
    pub fn deducted(sku: &str) -> Self {
        Notice::success(format!("1 piece deducted: {sku}"))
    }
}

/// Converts operation failures to notices.
///
/// Store failures are additionally logged: the user sees a short message,
/// the log keeps the cause.
impl From<&TrackerError> for Notice {
    fn from(err: &TrackerError) -> Self {
        match err {
            TrackerError::Core(e) => Notice::error(e.to_string()),
            TrackerError::Store(e) => {
                tracing::error!(error = %e, "Persisting ledger state failed");
                Notice::error(format!("Saving failed: {e}"))
            }
            TrackerError::Scan(e) => Notice::error(e.to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
