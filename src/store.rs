//! Record store backed by a CSV file
//!
//! Every [`RecordStore::load_all`] call reads the whole file again unless
//! the mtime cache is switched on. Rows that fail validation are skipped
//! and logged; a file that cannot be read, or that lacks a required column,
//! fails the load as a whole.

use crate::cache::{FileFingerprint, RecordCache};
use crate::config::CacheMode;
use crate::record::{PropertyRecord, RawRecord, RecordError, REQUIRED_COLUMNS};
use fs2::FileExt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column '{0}'")]
    MissingColumn(String),
}

/// Records from one read of the backing file
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<PropertyRecord>,
    pub quarantined: usize,
}

/// Shared view of the loaded records
pub type Records = Arc<Vec<PropertyRecord>>;

pub struct RecordStore {
    path: PathBuf,
    cache: Option<RecordCache>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, cache_mode: CacheMode) -> Self {
        let cache = match cache_mode {
            CacheMode::Off => None,
            CacheMode::Mtime => Some(RecordCache::new()),
        };

        Self {
            path: path.into(),
            cache,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every valid record in file order
    pub fn load_all(&self) -> Result<Records, StoreError> {
        let Some(cache) = &self.cache else {
            return Ok(Arc::new(read_records(&self.path)?.records));
        };

        let fingerprint = match FileFingerprint::of(&self.path) {
            Ok(fingerprint) => fingerprint,
            Err(source) => {
                cache.invalidate();
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        cache.get_or_load(fingerprint, || Ok(read_records(&self.path)?.records))
    }
}

/// Read and validate the whole file under a shared lock
pub fn read_records(path: &Path) -> Result<LoadedRecords, StoreError> {
    let io_error = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;

    // Best effort: some filesystems have no advisory locks
    let locked = match FileExt::lock_shared(&file) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not lock {} for reading: {}", path.display(), e);
            false
        }
    };

    let result = parse_records(&file);

    if locked {
        let _ = FileExt::unlock(&file);
    }

    let loaded = result?;
    debug!(
        "Loaded {} records from {} ({} quarantined)",
        loaded.records.len(),
        path.display(),
        loaded.quarantined
    );
    Ok(loaded)
}

/// Decode CSV text into validated records
pub fn parse_records<R: Read>(input: R) -> Result<LoadedRecords, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(StoreError::MissingColumn(missing.to_string()));
    }

    let mut loaded = LoadedRecords::default();

    for row in reader.deserialize::<RawRecord>() {
        let validated = match row {
            Ok(raw) => PropertyRecord::try_from(raw),
            // A broken read is not a bad row
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => Err(RecordError::Undecodable(e.to_string())),
        };

        match validated {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                loaded.quarantined += 1;
                warn!("Skipping row {}: {}", loaded.records.len() + loaded.quarantined, e);
            }
        }
    }

    Ok(loaded)
}
