//! Search Engine
//!
//! Ties criteria filtering and ranking together: every supplied criterion is
//! an AND filter over the full record set, survivors are ranked by
//! [`MatchScore`], and the top results are returned.

use super::criteria::{AreaType, SearchCriteria};
use super::lookup::match_key;
use super::ranking::MatchScore;
use crate::record::PropertyRecord;
use tracing::debug;

/// Most results a single search returns
pub const MAX_RESULTS: usize = 6;

/// Ranked search hit
#[derive(Debug, Clone)]
pub struct SearchResult<T> {
    /// The matched item
    pub item: T,
    /// Match score
    pub score: MatchScore,
}

/// Filters and ranks records against search criteria
pub struct SearchEngine {
    max_results: usize,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            max_results: MAX_RESULTS,
        }
    }

    /// Search records with validated criteria
    ///
    /// Returns results sorted by score (highest first); ties keep file order.
    pub fn search<'a>(
        &self,
        criteria: &SearchCriteria,
        records: &'a [PropertyRecord],
    ) -> Vec<SearchResult<&'a PropertyRecord>> {
        let mut results: Vec<_> = records
            .iter()
            .filter(|record| Self::matches(criteria, record))
            .map(|record| SearchResult {
                item: record,
                score: MatchScore::calculate(record, criteria),
            })
            .collect();

        debug!(
            "{} of {} records matched search criteria",
            results.len(),
            records.len()
        );

        // sort_by is stable, so equal scores stay in file order
        results.sort_by(|a, b| b.score.total().cmp(&a.score.total()));
        results.truncate(self.max_results);

        results
    }

    /// Whether a record passes every supplied criterion
    pub fn matches(criteria: &SearchCriteria, record: &PropertyRecord) -> bool {
        if let Some((from, to)) = criteria.date_range() {
            match record.date_issued {
                Some(issued) if issued >= from && issued <= to => {}
                _ => return false,
            }
        }

        if let Some(district) = &criteria.district {
            if match_key(&record.district) != match_key(district) {
                return false;
            }
        }

        match criteria.area_type {
            None | Some(AreaType::Both) => {}
            Some(area) => {
                if match_key(&record.area_type) != area.as_str() {
                    return false;
                }
            }
        }

        if let Some(property_type) = &criteria.property_type {
            if match_key(&record.property_type) != match_key(property_type) {
                return false;
            }
        }

        true
    }
}
