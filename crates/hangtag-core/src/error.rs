//! # Error Types
//!
//! Domain-specific error types for hangtag-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hangtag-core errors (this file)                                       │
//! │  ├── CoreError        - Ledger/domain errors (unknown SKU, no stock)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  hangtag-store errors (separate crate)                                 │
//! │  └── StoreError       - Key-value store read/write failures            │
//! │                                                                         │
//! │  hangtag-tracker errors (boundary)                                     │
//! │  └── TrackerError     - What the frontend sees (as a Notice)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → TrackerError → Notice → Frontend │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the SKU, the field, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught at the boundary and translated to user-friendly
/// notifications; none of them is fatal to the session.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Scanned code does not exist in the inventory.
    ///
    /// ## When This Occurs
    /// - A QR code from another shop (or a mistyped code) is scanned
    /// - The inventory blob was edited externally and the key vanished
    #[error("Unrecognized SKU: {0}")]
    UnknownSku(String),

    /// SKU exists but its stock is already zero.
    ///
    /// ## When This Occurs
    /// - Scanning a sale for a variant whose last piece was already sold
    ///
    /// The decrement is refused, not clamped: no event is recorded and
    /// stock stays at zero.
    #[error("No stock left for {sku}")]
    OutOfStock { sku: String },

    /// Stored SKU string does not decode into exactly four fields.
    ///
    /// ## When This Occurs
    /// - The inventory blob was edited externally
    /// - A pre-Hangtag key with a different shape survived in the store
    ///
    /// Decoding is checked: a key like `A-B-C` or `A-B-C-D-E` fails here
    /// instead of silently misaligning the design/style/color/size columns.
    #[error("Malformed SKU '{sku}': expected DESIGN-STYLE-COLOR-SIZE, found {fields} fields")]
    MalformedSku { sku: String, fields: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field value contains the SKU separator character.
    ///
    /// Identity fields are joined with `-` to build the SKU, so a `-`
    /// inside a field would shift every column after it on decode.
    #[error("{field} must not contain '-'")]
    ContainsSeparator { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
