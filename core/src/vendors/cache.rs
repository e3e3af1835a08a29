//! Durable OUI → vendor store.
//!
//! One JSON document, rewritten atomically. A missing negative answer (`None`)
//! is remembered just like a name so that dead prefixes are not re-queried on
//! every pass.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use netgrid_common::network::mac::OuiPrefix;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode vendor cache: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// `None` records that the prefix was looked up and nothing was found.
    pub vendor_name: Option<String>,
    pub resolved_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(vendor_name: Option<String>, resolved_at: DateTime<Utc>) -> Self {
        Self {
            vendor_name,
            resolved_at,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.vendor_name.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
}

#[derive(Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: BTreeMap<OuiPrefix, CacheEntry>,
}

/// A snapshot taken by [`VendorCache::take_pending`], written with blocking I/O.
pub struct PendingWrite {
    path: PathBuf,
    document: CacheFile,
}

impl PendingWrite {
    pub fn write(self) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;

        let encoded = serde_json::to_vec_pretty(&self.document)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;
        tmp.write_all(&encoded)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|source| CacheError::Io {
                path: tmp.path().to_path_buf(),
                source,
            })?;
        tmp.persist(&self.path).map_err(|e| CacheError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!(
            "Flushed {} vendor cache entries to {}",
            self.document.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[derive(Debug)]
pub struct VendorCache {
    path: PathBuf,
    entries: BTreeMap<OuiPrefix, CacheEntry>,
    dirty: bool,
}

impl VendorCache {
    /// Loads the cache at `path`. Anything short of a valid document yields an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<CacheFile>(&bytes) {
                Ok(file) if file.version == FORMAT_VERSION => file.entries,
                Ok(file) => {
                    warn!(
                        "Ignoring vendor cache {} with unsupported version {}",
                        path.display(),
                        file.version
                    );
                    BTreeMap::new()
                }
                Err(e) => {
                    warn!("Vendor cache {} is corrupt, starting empty: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Vendor cache {} unreadable, starting empty: {e}", path.display());
                BTreeMap::new()
            }
        };

        debug!("Loaded {} vendor cache entries from {}", entries.len(), path.display());
        Self {
            path,
            entries,
            dirty: false,
        }
    }

    pub fn get(&self, oui: &OuiPrefix) -> Option<&CacheEntry> {
        self.entries.get(oui)
    }

    /// Records a lookup outcome stamped with the current time.
    pub fn put(&mut self, oui: OuiPrefix, vendor_name: Option<String>) {
        self.insert(oui, CacheEntry::new(vendor_name, Utc::now()));
    }

    pub fn insert(&mut self, oui: OuiPrefix, entry: CacheEntry) {
        self.entries.insert(oui, entry);
        self.dirty = true;
    }

    /// Entries resolved in the future (clock skew) count as fresh.
    pub fn is_stale(entry: &CacheEntry, max_age: Duration) -> bool {
        let Ok(age) = Utc::now().signed_duration_since(entry.resolved_at).to_std() else {
            return false;
        };
        age > max_age
    }

    /// Writes the cache through a sibling temp file and renames it into place.
    /// Does nothing when nothing changed since the last load or flush.
    pub fn flush(&mut self) -> Result<(), CacheError> {
        let Some(pending) = self.take_pending() else {
            return Ok(());
        };
        pending.write().inspect_err(|_| self.dirty = true)
    }

    /// Snapshots the entries for writing elsewhere and marks the cache clean.
    /// `None` when nothing changed since the last load or flush.
    pub fn take_pending(&mut self) -> Option<PendingWrite> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(PendingWrite {
            path: self.path.clone(),
            document: CacheFile {
                version: FORMAT_VERSION,
                entries: self.entries.clone(),
            },
        })
    }

    /// Puts a snapshot whose write failed back on the books.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.dirty = true;
        }
    }

    pub fn stats(&self) -> CacheStats {
        let negative = self.entries.values().filter(|e| e.is_negative()).count();
        CacheStats {
            total: self.entries.len(),
            positive: self.entries.len() - negative,
            negative,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
