//! # File Store
//!
//! A [`KvStore`] backed by one JSON file per key under a root directory.
//!
//! ## Layout
//! ```text
//! <data dir>/
//! ├── inventory.json      ← the stock snapshot blob
//! └── salesHistory.json   ← the sales log blob
//! ```
//!
//! Writes go through a temp file and an atomic rename, so a crash mid-write
//! leaves the previous blob intact rather than a torn file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;

/// A file-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", root.display())))?;

        debug!(root = %root.display(), "Opened file store");
        Ok(FileStore { root })
    }

    /// Opens a store in the platform's data directory for Hangtag
    /// (e.g. `~/.local/share/hangtag` on Linux).
    pub fn open_default() -> StoreResult<Self> {
        let dirs = ProjectDirs::from("com", "hangtag", "hangtag")
            .ok_or_else(|| StoreError::Unavailable("no home directory".to_string()))?;

        FileStore::open(dirs.data_dir())
    }

    /// The directory this store reads and writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));

        let write_failed = |e: std::io::Error| StoreError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        };

        fs::write(&tmp, value).map_err(write_failed)?;
        fs::rename(&tmp, &path).map_err(write_failed)?;

        debug!(key = %key, bytes = value.len(), "Wrote blob");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
