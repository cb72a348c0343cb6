//! Ranking & Scoring
//!
//! A surviving record earns one point per matched signal: district,
//! area type, and issue month equal to the month of `regDateFrom`.

use super::criteria::SearchCriteria;
use super::lookup::match_key;
use crate::record::PropertyRecord;

/// Which ranking signals a record satisfied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchScore {
    /// District text equal to the requested district
    pub district: bool,
    /// Area type equal to the requested area type (never true for `both`)
    pub area_type: bool,
    /// Issue month equal to the month of `regDateFrom`
    pub registration_month: bool,
}

impl MatchScore {
    pub fn calculate(record: &PropertyRecord, criteria: &SearchCriteria) -> Self {
        let district = criteria
            .district
            .as_deref()
            .is_some_and(|d| record.district == d);

        let area_type = criteria
            .area_type
            .is_some_and(|a| match_key(&record.area_type) == a.as_str());

        let registration_month = match (criteria.reg_date_from, record.issued_month()) {
            (Some(from), Some(month)) => from.month() == month,
            _ => false,
        };

        Self {
            district,
            area_type,
            registration_month,
        }
    }

    /// Number of signals matched, 0 to 3
    pub fn total(&self) -> u8 {
        self.district as u8 + self.area_type as u8 + self.registration_month as u8
    }
}
