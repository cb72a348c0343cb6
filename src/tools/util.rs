//! Utility functions for tools

use crate::error::AppError;
use crate::store::{RecordStore, Records};
use std::sync::Arc;

/// Load records on the blocking pool so async workers never wait on disk
pub async fn load_records(store: &Arc<RecordStore>) -> Result<Records, AppError> {
    let store = Arc::clone(store);
    let records = tokio::task::spawn_blocking(move || store.load_all()).await??;
    Ok(records)
}

/// Placeholder for blank fields in human-readable output
pub fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}
