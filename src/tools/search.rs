//! Criteria search tool
//!
//! Implements the `search(propertyType, district, areaType, regDateFrom, regDateTo)` query

use crate::cli::SearchArgs;
use crate::error::AppError;
use crate::record::PropertyRecord;
use crate::search::{SearchCriteria, SearchEngine};
use crate::store::RecordStore;
use crate::tools::util::load_records;
use std::sync::Arc;
use tracing::{debug, info};

/// Execute search; criteria are validated before the file is read
pub async fn execute_search(
    store: &Arc<RecordStore>,
    args: SearchArgs,
) -> Result<Vec<PropertyRecord>, AppError> {
    let criteria = SearchCriteria::from_args(&args)?;
    debug!("Search request: {:?}", criteria);

    let records = load_records(store).await?;
    let results = SearchEngine::new().search(&criteria, &records);

    info!(
        "Search returned {} of {} records",
        results.len(),
        records.len()
    );

    Ok(results.into_iter().map(|r| r.item.clone()).collect())
}
