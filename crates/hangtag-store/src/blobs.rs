//! # Blob Codec
//!
//! (De)serialization of the two persisted ledger blobs.
//!
//! ## Persisted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persisted State                                    │
//! │                                                                         │
//! │  Key: "inventory"                                                       │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │ { "100-SHIRT-RED-M": 20,                     │  SKU → stock count   │
//! │  │   "205-KURTA-BLUE-L": 4 }                    │  (non-negative)      │
//! │  └──────────────────────────────────────────────┘                      │
//! │                                                                         │
//! │  Key: "salesHistory"                                                    │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │ [ { "sku": "100-SHIRT-RED-M",                │  append-only,        │
//! │  │     "date": "2024-03-15T12:30:00Z" }, ... ]  │  ISO-8601 dates      │
//! │  └──────────────────────────────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Leniency
//! Loading is forgiving: an absent, unreadable, or unparsable blob yields
//! empty state with a `warn!`, never a startup failure. Saving is strict:
//! both blobs are written as a pair and the first failure surfaces to the
//! caller.

use std::collections::BTreeMap;

use tracing::warn;

use hangtag_core::{SalesEvent, Sku};

use crate::error::StoreResult;
use crate::kv::KvStore;

/// Store key of the stock snapshot blob.
pub const INVENTORY_KEY: &str = "inventory";

/// Store key of the sales log blob.
pub const SALES_HISTORY_KEY: &str = "salesHistory";

// =============================================================================
// Loading (lenient)
// =============================================================================

/// Loads the stock snapshot, treating absent or corrupt data as empty.
pub fn load_stock<S: KvStore>(store: &S) -> BTreeMap<Sku, u32> {
    load_lenient(store, INVENTORY_KEY).unwrap_or_default()
}

/// Loads the sales log, treating absent or corrupt data as empty.
pub fn load_sales<S: KvStore>(store: &S) -> Vec<SalesEvent> {
    load_lenient(store, SALES_HISTORY_KEY).unwrap_or_default()
}

/// Reads and parses one blob; `None` means "start empty".
fn load_lenient<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KvStore,
    T: serde::de::DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key = %key, error = %e, "Blob unreadable, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Blob unparsable, starting empty");
            None
        }
    }
}

// =============================================================================
// Saving (strict)
// =============================================================================

/// Writes the stock snapshot and the sales log as a pair.
///
/// Both blobs are serialized up front, then written snapshot-first; the
/// first failed write surfaces as an error. The caller's in-memory state
/// remains the source of truth for the session when a write fails.
pub fn save_ledger<S: KvStore>(
    store: &mut S,
    stock: &BTreeMap<Sku, u32>,
    sales: &[SalesEvent],
) -> StoreResult<()> {
    let snapshot = encode(INVENTORY_KEY, stock)?;
    let log = encode(SALES_HISTORY_KEY, sales)?;

    store.set(INVENTORY_KEY, &snapshot)?;
    store.set(SALES_HISTORY_KEY, &log)?;
    Ok(())
}

fn encode<T: serde::Serialize + ?Sized>(key: &str, value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|e| crate::error::StoreError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn sample_state() -> (BTreeMap<Sku, u32>, Vec<SalesEvent>) {
        let sku = Sku::assemble("100", "SHIRT", "RED", "M").unwrap();
        let mut stock = BTreeMap::new();
        stock.insert(sku.clone(), 19);
        let sales = vec![SalesEvent::new(
            sku,
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap(),
        )];
        (stock, sales)
    }

    #[test]
    fn test_empty_store_loads_empty_state() {
        let store = MemoryStore::new();
        assert!(load_stock(&store).is_empty());
        assert!(load_sales(&store).is_empty());
    }

    #[test]
    fn test_corrupt_blobs_load_empty_not_crash() {
        let mut store = MemoryStore::new();
        store.set(INVENTORY_KEY, "not json at all").unwrap();
        store.set(SALES_HISTORY_KEY, "{\"wrong\": \"shape\"}").unwrap();

        assert!(load_stock(&store).is_empty());
        assert!(load_sales(&store).is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let (stock, sales) = sample_state();

        save_ledger(&mut store, &stock, &sales).unwrap();

        assert_eq!(load_stock(&store), stock);
        assert_eq!(load_sales(&store), sales);
    }

    #[test]
    fn test_persisted_shapes_match_contract() {
        let mut store = MemoryStore::new();
        let (stock, sales) = sample_state();

        save_ledger(&mut store, &stock, &sales).unwrap();

        let inventory = store.get(INVENTORY_KEY).unwrap().unwrap();
        assert_eq!(inventory, r#"{"100-SHIRT-RED-M":19}"#);

        let history = store.get(SALES_HISTORY_KEY).unwrap().unwrap();
        assert_eq!(
            history,
            r#"[{"sku":"100-SHIRT-RED-M","date":"2024-03-15T12:30:00Z"}]"#
        );
    }

    #[test]
    fn test_save_surfaces_quota_failure() {
        let mut store = MemoryStore::with_quota(8);
        let (stock, sales) = sample_state();

        let err = save_ledger(&mut store, &stock, &sales).unwrap_err();
        assert!(matches!(err, crate::error::StoreError::QuotaExceeded));
    }
}
