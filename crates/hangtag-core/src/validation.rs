//! # Validation Module
//!
//! Input validation utilities for Hangtag.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (browser form)                                      │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger entry point (Rust)                                    │
//! │  └── THIS MODULE: identity fields, pieces, search query                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  └── u32 counts cannot go negative by construction                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed validation happens before any mutation: the ledger state and
//! the persisted blobs are untouched.

use crate::error::ValidationError;
use crate::sku::SKU_SEPARATOR;
use crate::{MAX_FIELD_LEN, MAX_RESTOCK_PIECES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a search query.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates one SKU identity field (design, style, color, or size).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_FIELD_LEN`] characters
/// - Must not contain the `-` separator (it would shift the decoded columns)
///
/// ## Returns
/// The trimmed field value.
///
/// ## Example
/// ```rust
/// use hangtag_core::validation::validate_identity_field;
///
/// assert_eq!(validate_identity_field("design", " 100 ").unwrap(), "100");
/// assert!(validate_identity_field("design", "").is_err());
/// assert!(validate_identity_field("design", "10-0").is_err());
/// ```
pub fn validate_identity_field(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LEN,
        });
    }

    if value.contains(SKU_SEPARATOR) {
        return Err(ValidationError::ContainsSeparator {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (an empty filter matches everything)
/// - Maximum [`MAX_QUERY_LEN`] characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a restock piece count.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_RESTOCK_PIECES`]
pub fn validate_pieces(pieces: u32) -> ValidationResult<()> {
    if pieces == 0 {
        return Err(ValidationError::MustBePositive {
            field: "pieces".to_string(),
        });
    }

    if pieces > MAX_RESTOCK_PIECES {
        return Err(ValidationError::OutOfRange {
            field: "pieces".to_string(),
            min: 1,
            max: MAX_RESTOCK_PIECES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
