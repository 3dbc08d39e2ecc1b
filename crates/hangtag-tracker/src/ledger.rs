//! # Inventory Ledger
//!
//! The system's sole mutable state: the stock map, the append-only sales
//! log, and the decrement protocol driven by scanned tokens.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  Frontend Action          Ledger Call             State Change          │
//! │  ───────────────          ───────────             ────────────          │
//! │                                                                         │
//! │  Submit Add Form ────────► add_stock() ─────────► stock[sku] += n      │
//! │                                                                         │
//! │  QR Decoded ─────────────► record_sale() ───────► stock[sku] -= 1      │
//! │                                                    sales.push(event)    │
//! │                                                                         │
//! │  Type in Search ─────────► list_items() ────────► (read only)          │
//! │                                                                         │
//! │  Render Footer ──────────► total_pieces() ──────► (read only)          │
//! │                                                                         │
//! │  NOTE: Every write operation persists BOTH blobs before returning.     │
//! │        A failed write surfaces as an error; the in-memory mutation     │
//! │        stands as the session's source of truth.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Stock counts are `u32`: never below zero by construction; a decrement
//!   at zero is refused, not clamped
//! - The sales log is append-only and never truncated
//! - No operation removes a SKU from the stock map
//! - Failed operations mutate nothing and append nothing (persistence
//!   failures excepted: the write is lost, the memory state stands)

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use hangtag_core::validation::{validate_pieces, validate_search_query};
use hangtag_core::{CoreError, ItemRow, SalesEvent, Sku, SortKey};
use hangtag_store::{blobs, KvStore, StoreError};

use crate::notify::TrackerResult;

// =============================================================================
// Ledger
// =============================================================================

/// In-memory stock map + append-only sales log, persisted through a
/// [`KvStore`].
#[derive(Debug)]
pub struct Ledger<S: KvStore> {
    store: S,
    stock: BTreeMap<Sku, u32>,
    sales: Vec<SalesEvent>,
}

impl<S: KvStore> Ledger<S> {
    /// Opens the ledger, loading both blobs from the store.
    ///
    /// Loading is lenient: absent or corrupt blobs yield an empty ledger,
    /// never a startup failure.
    pub fn open(store: S) -> Self {
        let stock = blobs::load_stock(&store);
        let sales = blobs::load_sales(&store);

        info!(skus = stock.len(), events = sales.len(), "Ledger opened");
        Ledger { store, stock, sales }
    }

    /// Records a restock entry and returns the assembled SKU.
    ///
    /// ## Behavior
    /// - Validates all four identity fields and the piece count *before*
    ///   any mutation: a failed validation leaves no partial state
    /// - Increments the SKU's stock, creating the key at `pieces` if absent
    /// - Persists both blobs before returning
    ///
    /// The returned SKU is what the caller renders as a QR code for the
    /// new hang tags.
    pub fn add_stock(
        &mut self,
        design: &str,
        style: &str,
        color: &str,
        size: &str,
        pieces: u32,
    ) -> TrackerResult<Sku> {
        validate_pieces(pieces).map_err(CoreError::from)?;
        let sku = Sku::assemble(design, style, color, size).map_err(CoreError::from)?;

        *self.stock.entry(sku.clone()).or_insert(0) += pieces;
        debug!(sku = %sku, pieces, "Stock added");

        self.persist()?;
        Ok(sku)
    }

    /// Records one sale for a scanned token.
    ///
    /// ## Decrement Protocol
    /// - Token not in the stock map → [`CoreError::UnknownSku`], no mutation
    /// - Stock already zero → [`CoreError::OutOfStock`], no mutation
    /// - Otherwise → decrement by exactly 1, append exactly one event,
    ///   persist, return the event
    ///
    /// Each call is independent: rapid repeats of the same token decrement
    /// repeatedly. De-duplicating frames of one physical scan is the scan
    /// device's concern, not the ledger's.
    pub fn record_sale(&mut self, token: &str) -> TrackerResult<SalesEvent> {
        let event = match self.stock.get_mut(token) {
            None => return Err(CoreError::UnknownSku(token.to_string()).into()),
            Some(0) => {
                return Err(CoreError::OutOfStock {
                    sku: token.to_string(),
                }
                .into())
            }
            Some(level) => {
                *level -= 1;
                SalesEvent::new(Sku::from_scan(token), Utc::now())
            }
        };

        self.sales.push(event.clone());
        debug!(sku = %event.sku, "Sale recorded");

        self.persist()?;
        Ok(event)
    }

    /// Lists the inventory as decoded rows, filtered and sorted.
    ///
    /// ## Behavior
    /// - `filter` matches case-insensitively as a substring of the SKU
    /// - Rows are ordered by the chosen identity field; ties are broken by
    ///   the full SKU so the order is stable across runs
    /// - A stored key that does not decode into four fields fails with
    ///   [`CoreError::MalformedSku`]
    pub fn list_items(&self, sort: SortKey, filter: &str) -> TrackerResult<Vec<ItemRow>> {
        let query = validate_search_query(filter)
            .map_err(CoreError::from)?
            .to_lowercase();

        let mut rows = Vec::with_capacity(self.stock.len());
        for (sku, &stock) in &self.stock {
            if !query.is_empty() && !sku.as_str().to_lowercase().contains(&query) {
                continue;
            }

            let parts = sku.parts()?;
            rows.push(ItemRow {
                sku: sku.clone(),
                design: parts.design.to_string(),
                style: parts.style.to_string(),
                color: parts.color.to_string(),
                size: parts.size.to_string(),
                stock,
            });
        }

        rows.sort_by(|a, b| {
            sort.field(a)
                .cmp(sort.field(b))
                .then_with(|| a.sku.cmp(&b.sku))
        });

        Ok(rows)
    }

    /// Sum of all stock values. Recomputed on every call, never cached.
    pub fn total_pieces(&self) -> u64 {
        self.stock.values().map(|&v| u64::from(v)).sum()
    }

    /// Read-only view of the stock map, for analytics.
    pub fn stock(&self) -> &BTreeMap<Sku, u32> {
        &self.stock
    }

    /// Read-only view of the sales log, for analytics.
    pub fn sales(&self) -> &[SalesEvent] {
        &self.sales
    }

    /// Read-only view of the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes the snapshot and the log as a pair.
    fn persist(&mut self) -> Result<(), StoreError> {
        blobs::save_ledger(&mut self.store, &self.stock, &self.sales)
    }
}

// =============================================================================
// Ledger State
// =============================================================================

/// Shared ledger handle.
///
/// ## Thread Safety
/// The host event loop never overlaps two mutations, but the scan device
/// delivers tokens from its own context; `Arc<Mutex<_>>` makes the
/// ledger's non-reentrant contract explicit rather than assumed.
///
/// ## Why Not RwLock?
/// Ledger operations are quick and most of them write. A RwLock would add
/// complexity with minimal benefit.
#[derive(Debug)]
pub struct LedgerState<S: KvStore> {
    inner: Arc<Mutex<Ledger<S>>>,
}

impl<S: KvStore> LedgerState<S> {
    /// Wraps a ledger for shared access.
    pub fn new(ledger: Ledger<S>) -> Self {
        LedgerState {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = state.with_ledger(|l| l.total_pieces());
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger<S>) -> R,
    {
        let ledger = self.inner.lock().expect("Ledger mutex poisoned");
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let sku = state.with_ledger_mut(|l| l.add_stock("100", "SHIRT", "RED", "M", 20))?;
    /// ```
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger<S>) -> R,
    {
        let mut ledger = self.inner.lock().expect("Ledger mutex poisoned");
        f(&mut ledger)
    }
}

impl<S: KvStore> Clone for LedgerState<S> {
    fn clone(&self) -> Self {
        LedgerState {
            inner: Arc::clone(&self.inner),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
