//! # hangtag-core: Pure Business Logic for Hangtag
//!
//! This crate is the **heart** of Hangtag, a small-retail garment inventory
//! tracker. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Hangtag Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser)                           │   │
//! │  │    Add-Stock Form ──► Inventory Table ──► Scanner ──► Charts   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 hangtag-tracker (Ledger, devices)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hangtag-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    sku    │  │   types   │  │ analytics │  │ validation│  │   │
//! │  │   │  assemble │  │ SalesEvent│  │ trend     │  │   rules   │  │   │
//! │  │   │  decode   │  │  ItemRow  │  │ forecast  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO DEVICES • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sku`] - Composite SKU assembly and checked decoding
//! - [`types`] - Domain types (SalesEvent, ItemRow, SortKey, etc.)
//! - [`analytics`] - Pure, total analytics over ledger snapshots
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Store, device, and file system access is FORBIDDEN here
//! 3. **Integer Counts**: Stock and sold quantities are unsigned integers;
//!    analytics use integer arithmetic (no floating point!)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod error;
pub mod sku;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use hangtag_core::Sku` instead of
// `use hangtag_core::sku::Sku`

pub use error::{CoreError, ValidationError};
pub use sku::{Sku, SkuParts};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level strictly below which an item is flagged as "low stock".
///
/// ## Business Reason
/// A rack with fewer than 5 pieces of a variant is due for a restock order.
/// Can be made configurable per store in future versions.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Default number of entries in the fast-selling ranking.
pub const DEFAULT_TOP_SELLERS: usize = 10;

/// Maximum length of a single SKU identity field (design, style, color, size).
///
/// ## Business Reason
/// Keeps assembled SKUs short enough to stay readable on a printed hang tag
/// and dense enough to scan reliably as a QR code.
pub const MAX_FIELD_LEN: usize = 40;

/// Maximum pieces accepted by a single restock entry.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 10000 instead of 10).
pub const MAX_RESTOCK_PIECES: u32 = 9999;
