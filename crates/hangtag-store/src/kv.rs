//! # Key-Value Store Trait
//!
//! The store contract the ledger persists through, plus the in-memory
//! implementation used by tests and ephemeral sessions.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         KvStore Contract                                │
//! │                                                                         │
//! │  get(key) ──► Ok(Some(raw)) │ Ok(None) when absent │ Err on failure    │
//! │  set(key, raw) ──► Ok(())   │ Err(QuotaExceeded / WriteFailed)         │
//! │                                                                         │
//! │  • Synchronous and blocking from the caller's perspective              │
//! │  • No transactions: a blob is replaced whole on every write            │
//! │  • Values are opaque structured text (JSON); the store never parses    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// KvStore Trait
// =============================================================================

/// Synchronous get/set of named text blobs.
///
/// Implemented by [`MemoryStore`] and [`crate::FileStore`]; the ledger is
/// generic over this trait so tests can swap a scripted store under it.
pub trait KvStore {
    /// Reads the blob stored under `key`; `Ok(None)` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Store
// =============================================================================

/// An in-memory [`KvStore`].
///
/// ## Usage
/// Ephemeral sessions and tests. [`MemoryStore::with_quota`] caps the total
/// stored bytes so tests can exercise the quota-exceeded write path the
/// browser store exhibits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty, unbounded store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates an empty store that refuses writes once the total size of
    /// keys and values would exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        MemoryStore {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently stored (keys + values).
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn would_exceed_quota(&self, key: &str, value: &str) -> bool {
        let Some(quota) = self.quota_bytes else {
            return false;
        };

        let replaced = self.entries.get(key).map_or(0, |v| key.len() + v.len());
        let after = self.used_bytes() - replaced + key.len() + value.len();
        after > quota
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.would_exceed_quota(key, value) {
            return Err(StoreError::QuotaExceeded);
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("inventory").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let mut store = MemoryStore::new();
        store.set("inventory", "{}").unwrap();
        assert_eq!(store.get("inventory").unwrap().as_deref(), Some("{}"));

        // A second set replaces the blob whole
        store.set("inventory", r#"{"A-B-C-D":1}"#).unwrap();
        assert_eq!(
            store.get("inventory").unwrap().as_deref(),
            Some(r#"{"A-B-C-D":1}"#)
        );
    }

    #[test]
    fn test_quota_refuses_oversized_write() {
        let mut store = MemoryStore::with_quota(16);
        store.set("k", "12345").unwrap();

        let err = store.set("big", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded));

        // The failed write left the store untouched
        assert_eq!(store.get("big").unwrap(), None);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_quota_accounts_for_replaced_value() {
        let mut store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();

        // Replacing the value with one of the same size still fits
        store.set("k", "987654321").unwrap();
    }
}
