//! Markdown rendering for CLI output
//!
//! One card per record: a heading with the property number, then a short
//! list of labelled fields. Blank fields print as `N/A`.

use crate::record::PropertyRecord;
use crate::tools::util::or_na;
use chrono::NaiveDate;

/// Shown when a search has no survivors
pub const NO_RESULTS: &str = "No properties available for the selected criteria.";

/// Render one record as a markdown card
pub fn format_record(record: &PropertyRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!("## {}\n\n", record.property_number));
    out.push_str(&format!("- **Registration:** {}\n", record.registration_number));
    out.push_str(&format!("- **Owner:** {}\n", or_na(&record.owner_name)));
    out.push_str(&format!("- **Location:** {}\n", location(record)));
    out.push_str(&format!(
        "- **Type:** {} ({})\n",
        or_na(&record.property_type),
        or_na(&record.area_type)
    ));
    out.push_str(&format!("- **Status:** {}\n", legality(record)));
    out.push_str(&format!("- **Issued:** {}\n", format_date(record.date_issued)));
    out.push_str(&format!("- **Expires:** {}\n", format_date(record.date_expired)));

    out
}

/// Render search results, or the empty-state message
pub fn format_results(records: &[PropertyRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    records
        .iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n")
}

fn location(record: &PropertyRecord) -> String {
    let parts: Vec<&str> = [
        record.sub_district.as_str(),
        record.district.as_str(),
        record.state.as_str(),
    ]
    .into_iter()
    .filter(|p| !p.trim().is_empty())
    .collect();

    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(", ")
    }
}

fn legality(record: &PropertyRecord) -> String {
    let label = match record.legality.legal {
        Some(true) => "Legal",
        Some(false) => "Illegal",
        None => return or_na(&record.status).to_string(),
    };

    match &record.legality.reason {
        Some(reason) => format!("{} ({})", label, reason),
        None => label.to_string(),
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
