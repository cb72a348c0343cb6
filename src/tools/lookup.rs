//! Exact lookup tool
//!
//! Implements the `lookup(propertyId, registrationNumber)` query

use crate::cli::LookupArgs;
use crate::error::{validate_identifier, AppError};
use crate::record::PropertyRecord;
use crate::search::find_exact;
use crate::store::RecordStore;
use crate::tools::util::load_records;
use std::sync::Arc;
use tracing::{debug, info};

/// Execute lookup with validated identifiers
pub async fn execute_lookup(
    store: &Arc<RecordStore>,
    args: LookupArgs,
) -> Result<PropertyRecord, AppError> {
    let property_id = validate_identifier("propertyId", args.property_id.as_deref())?;
    let registration_number =
        validate_identifier("registrationNumber", args.registration_number.as_deref())?;

    debug!(
        "Lookup request for property {} / registration {}",
        property_id, registration_number
    );

    let records = load_records(store).await?;

    match find_exact(&records, property_id, registration_number) {
        Some(record) => {
            info!("Lookup matched property {}", record.property_number);
            Ok(record.clone())
        }
        None => {
            debug!("No record for property {}", property_id);
            Err(AppError::property_not_found())
        }
    }
}
