//! Exact property lookup

use crate::error::normalize_text;
use crate::record::PropertyRecord;

/// Comparison key for case-insensitive text: NFKC, trimmed, Unicode lowercase
pub fn match_key(value: &str) -> String {
    normalize_text(value).to_lowercase()
}

/// First record whose property and registration numbers both match
///
/// Blank inputs never match, even against records with blank fields.
pub fn find_exact<'a>(
    records: &'a [PropertyRecord],
    property_id: &str,
    registration_number: &str,
) -> Option<&'a PropertyRecord> {
    let property_key = match_key(property_id);
    let registration_key = match_key(registration_number);

    if property_key.is_empty() || registration_key.is_empty() {
        return None;
    }

    records.iter().find(|record| {
        match_key(&record.property_number) == property_key
            && match_key(&record.registration_number) == registration_key
    })
}
