//! Parsed-record cache keyed on the backing file's fingerprint
//!
//! Off by default. When on, the store stats the file on every call and only
//! re-parses when the modification time or size moved. There is no TTL: an
//! unchanged file is never considered stale.

use crate::record::PropertyRecord;
use crate::store::{Records, StoreError};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;
use tracing::{debug, info};

/// Identity of one version of the backing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFingerprint {
    pub modified: SystemTime,
    pub len: u64,
}

impl FileFingerprint {
    pub fn of(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            modified: metadata.modified()?,
            len: metadata.len(),
        })
    }
}

struct CachedRecords {
    fingerprint: FileFingerprint,
    records: Records,
}

/// Single-slot cache holding the last parsed version of the file
pub struct RecordCache {
    slot: Mutex<Option<CachedRecords>>,
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return cached records for `fingerprint`, or run `load` and keep its result
    ///
    /// A failed load leaves the previous entry in place.
    pub fn get_or_load<F>(
        &self,
        fingerprint: FileFingerprint,
        load: F,
    ) -> Result<Records, StoreError>
    where
        F: FnOnce() -> Result<Vec<PropertyRecord>, StoreError>,
    {
        // A panic mid-reload leaves either the old entry or nothing; both are usable
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = slot.as_ref() {
            if cached.fingerprint == fingerprint {
                debug!("Record cache hit ({} records)", cached.records.len());
                return Ok(Arc::clone(&cached.records));
            }
        }

        let records = Arc::new(load()?);
        info!("Record cache refreshed ({} records)", records.len());

        *slot = Some(CachedRecords {
            fingerprint,
            records: Arc::clone(&records),
        });

        Ok(records)
    }

    /// Drop the cached entry so the next call reloads
    pub fn invalidate(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
