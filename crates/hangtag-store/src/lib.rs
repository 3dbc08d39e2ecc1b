//! # hangtag-store: Persistence Layer for Hangtag
//!
//! This crate provides persistence for the Hangtag ledger. State lives in a
//! flat key-value store holding two named blobs of structured text, the way
//! the browser's local store holds them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Hangtag Data Flow                                │
//! │                                                                         │
//! │  Ledger mutation (add_stock / record_sale)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    hangtag-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    KvStore    │    │  Blob Codec   │    │  FileStore   │  │   │
//! │  │   │   (kv.rs)     │    │  (blobs.rs)   │    │  (file.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ get/set blobs │◄───│ load_stock    │    │ <key>.json   │  │   │
//! │  │   │ MemoryStore   │    │ load_sales    │    │ temp+rename  │  │   │
//! │  │   │               │    │ save_ledger   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Two named blobs:                                                       │
//! │    inventory    = {"100-SHIRT-RED-M": 20, ...}                         │
//! │    salesHistory = [{"sku": "...", "date": "2024-03-15T12:30:00Z"}]     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `KvStore` trait and the in-memory store
//! - [`file`] - File-backed store (one JSON file per key)
//! - [`blobs`] - Lenient blob (de)serialization for the ledger pair
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use hangtag_store::{blobs, MemoryStore};
//!
//! let store = MemoryStore::new();
//!
//! // A fresh (or corrupt) store loads as empty state, never an error
//! let stock = blobs::load_stock(&store);
//! let sales = blobs::load_sales(&store);
//! assert!(stock.is_empty());
//! assert!(sales.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blobs;
pub mod error;
pub mod file;
pub mod kv;

// =============================================================================
// Re-exports
// =============================================================================

pub use blobs::{INVENTORY_KEY, SALES_HISTORY_KEY};
pub use error::StoreError;
pub use file::FileStore;
pub use kv::{KvStore, MemoryStore};
