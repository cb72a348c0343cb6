//! Property record schema
//!
//! Rows of the backing CSV decode into [`RawRecord`] (every column as text)
//! and are validated into [`PropertyRecord`] before anything else sees them.
//! Serialization keeps the CSV column names so the JSON shape matches the
//! file the browser UI was built against.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

pub const PROPERTY_NUMBER: &str = "Property Number";
pub const REGISTRATION_NUMBER: &str = "Registration Number";
pub const OWNER_NAME: &str = "Owner Name";
pub const STATE: &str = "State";
pub const DISTRICT: &str = "District";
pub const SUB_DISTRICT: &str = "Sub-District";
pub const PROPERTY_TYPE: &str = "Property Type";
pub const AREA_TYPE: &str = "Area Type";
pub const DATE_ISSUED: &str = "Date Issued";
pub const DATE_EXPIRED: &str = "Date Expired";
pub const STATUS: &str = "Status";

/// Columns a backing file must carry to be accepted at all
pub const REQUIRED_COLUMNS: &[&str] = &[
    PROPERTY_NUMBER,
    REGISTRATION_NUMBER,
    OWNER_NAME,
    STATE,
    DISTRICT,
    SUB_DISTRICT,
    PROPERTY_TYPE,
    AREA_TYPE,
    DATE_ISSUED,
    DATE_EXPIRED,
    STATUS,
];

/// Accepted date layouts, canonical first
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Reasons a row is quarantined instead of loaded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid {field} '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("undecodable row: {0}")]
    Undecodable(String),
}

/// One CSV row exactly as decoded, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Property Number")]
    pub property_number: String,
    #[serde(rename = "Registration Number")]
    pub registration_number: String,
    #[serde(rename = "Owner Name")]
    pub owner_name: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Sub-District")]
    pub sub_district: String,
    #[serde(rename = "Property Type")]
    pub property_type: String,
    #[serde(rename = "Area Type")]
    pub area_type: String,
    #[serde(rename = "Date Issued")]
    pub date_issued: String,
    #[serde(rename = "Date Expired")]
    pub date_expired: String,
    #[serde(rename = "Status")]
    pub status: String,
}

/// Legality derived from the free-text status column
///
/// `LEGAL` and `ILLEGAL (<reason>)` are recognised case-insensitively.
/// Anything else leaves `legal` unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Legality {
    #[serde(rename = "Legal")]
    pub legal: Option<bool>,
    #[serde(rename = "Status Reason")]
    pub reason: Option<String>,
}

impl Legality {
    pub fn parse(status: &str) -> Self {
        static STATUS_PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = STATUS_PATTERN.get_or_init(|| {
            Regex::new(r"(?i)^(LEGAL|ILLEGAL)(?:\s*\((.+)\))?$").expect("status pattern is valid")
        });

        let Some(caps) = pattern.captures(status.trim()) else {
            return Self::default();
        };

        let legal = caps[1].eq_ignore_ascii_case("LEGAL");
        let reason = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|r| !r.is_empty());

        Self {
            legal: Some(legal),
            reason,
        }
    }
}

/// A validated property record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRecord {
    #[serde(rename = "Property Number")]
    pub property_number: String,
    #[serde(rename = "Registration Number")]
    pub registration_number: String,
    #[serde(rename = "Owner Name")]
    pub owner_name: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Sub-District")]
    pub sub_district: String,
    #[serde(rename = "Property Type")]
    pub property_type: String,
    #[serde(rename = "Area Type")]
    pub area_type: String,
    #[serde(rename = "Date Issued")]
    pub date_issued: Option<NaiveDate>,
    #[serde(rename = "Date Expired")]
    pub date_expired: Option<NaiveDate>,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(flatten)]
    pub legality: Legality,
}

impl PropertyRecord {
    /// Month number (1-12) of the issue date, if known
    pub fn issued_month(&self) -> Option<u32> {
        self.date_issued.map(|d| d.month())
    }
}

impl TryFrom<RawRecord> for PropertyRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let property_number = required(PROPERTY_NUMBER, raw.property_number)?;
        let registration_number = required(REGISTRATION_NUMBER, raw.registration_number)?;
        let date_issued = parse_date(DATE_ISSUED, &raw.date_issued)?;
        let date_expired = parse_date(DATE_EXPIRED, &raw.date_expired)?;
        let status = raw.status.trim().to_string();
        let legality = Legality::parse(&status);

        Ok(Self {
            property_number,
            registration_number,
            owner_name: raw.owner_name.trim().to_string(),
            state: raw.state.trim().to_string(),
            district: raw.district.trim().to_string(),
            sub_district: raw.sub_district.trim().to_string(),
            property_type: raw.property_type.trim().to_string(),
            area_type: raw.area_type.trim().to_string(),
            date_issued,
            date_expired,
            status,
            legality,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, RecordError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RecordError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Parse a record date; blank means absent
pub fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, RecordError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .map(Some)
        .ok_or_else(|| RecordError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
