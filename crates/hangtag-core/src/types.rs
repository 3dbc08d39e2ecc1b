//! # Domain Types
//!
//! Core domain types used throughout Hangtag.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SalesEvent    │   │    ItemRow      │   │ SkuAnalysisRow  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  sku            │   │  sku + fields   │   │  sku            │       │
//! │  │  date (UTC)     │   │  stock          │   │  sold / stock   │       │
//! │  └─────────────────┘   └─────────────────┘   │  low_stock      │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐                                                   │
//! │  │    SortKey      │   Design (default) / Style / Color / Size         │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Counting Convention
//! Stock levels and sold counts are `u32`: non-negative by construction,
//! which is exactly the ledger invariant. Totals across SKUs are `u64`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::sku::Sku;

// =============================================================================
// Sales Event
// =============================================================================

/// An immutable record of one unit sold.
///
/// Appended to the sales log whenever a scan successfully decrements stock;
/// never mutated or truncated afterwards. The log is the sole source of
/// "units sold" analytics - the stock level alone cannot reconstruct sales
/// volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesEvent {
    /// The variant that was sold.
    pub sku: Sku,

    /// When the sale was recorded (ISO-8601 in the persisted blob).
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl SalesEvent {
    /// Creates an event for `sku` at the given instant.
    pub fn new(sku: Sku, date: DateTime<Utc>) -> Self {
        SalesEvent { sku, date }
    }
}

// =============================================================================
// Item Row
// =============================================================================

/// A decoded inventory listing row: the SKU split back into its identity
/// fields plus the current stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemRow {
    pub sku: Sku,
    pub design: String,
    pub style: String,
    pub color: String,
    pub size: String,
    pub stock: u32,
}

// =============================================================================
// Sort Key
// =============================================================================

/// Which identity field the inventory listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortKey {
    Design,
    Style,
    Color,
    Size,
}

impl SortKey {
    /// Extracts the field this key sorts by from a listing row.
    pub fn field<'a>(&self, row: &'a ItemRow) -> &'a str {
        match self {
            SortKey::Design => &row.design,
            SortKey::Style => &row.style,
            SortKey::Color => &row.color,
            SortKey::Size => &row.size,
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Design
    }
}

// =============================================================================
// SKU Analysis Row
// =============================================================================

/// One row of the per-SKU analysis table: units sold, current stock, and
/// the low-stock flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SkuAnalysisRow {
    pub sku: Sku,
    pub sold: u32,
    pub stock: u32,
    pub low_stock: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
