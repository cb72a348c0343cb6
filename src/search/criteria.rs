//! Search criteria parsing & validation
//!
//! Turns the raw optional strings of an advanced search into typed
//! criteria. Blank strings count as absent.

use crate::cli::SearchArgs;
use crate::error::AppError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Requested area type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaType {
    Urban,
    Rural,
    Both,
}

impl AreaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::Urban => "urban",
            AreaType::Rural => "rural",
            AreaType::Both => "both",
        }
    }
}

impl FromStr for AreaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(AreaType::Urban),
            "rural" => Ok(AreaType::Rural),
            "both" => Ok(AreaType::Both),
            _ => Err(AppError::InvalidInput(format!(
                "areaType must be urban, rural or both, got '{}'",
                s.trim()
            ))),
        }
    }
}

/// Calendar month in `YYYY-MM` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Real last day of the month, leap years included
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidInput(format!("expected YYYY-MM, got '{}'", s.trim()));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Validated advanced-search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub property_type: Option<String>,
    pub district: Option<String>,
    pub area_type: Option<AreaType>,
    pub reg_date_from: Option<YearMonth>,
    pub reg_date_to: Option<YearMonth>,
}

impl SearchCriteria {
    /// Parse and validate raw arguments
    ///
    /// Fails when every criterion is blank, when a value is malformed, or
    /// when the date range is inverted. `areaType=both` counts as supplied.
    pub fn from_args(args: &SearchArgs) -> Result<Self, AppError> {
        let criteria = Self {
            property_type: non_blank(args.property_type.as_deref()),
            district: non_blank(args.district.as_deref()),
            area_type: non_blank(args.area_type.as_deref())
                .map(|v| v.parse::<AreaType>())
                .transpose()?,
            reg_date_from: parse_month("regDateFrom", args.reg_date_from.as_deref())?,
            reg_date_to: parse_month("regDateTo", args.reg_date_to.as_deref())?,
        };

        if criteria.is_empty() {
            return Err(AppError::InvalidInput(
                "Please provide at least one search criterion".to_string(),
            ));
        }

        if let (Some(from), Some(to)) = (criteria.reg_date_from, criteria.reg_date_to) {
            if from > to {
                return Err(AppError::InvalidInput(format!(
                    "regDateFrom {} is after regDateTo {}",
                    from, to
                )));
            }
        }

        Ok(criteria)
    }

    /// True when no criterion was supplied
    pub fn is_empty(&self) -> bool {
        self.property_type.is_none()
            && self.district.is_none()
            && self.area_type.is_none()
            && self.reg_date_from.is_none()
            && self.reg_date_to.is_none()
    }

    /// Inclusive issue-date window, only when both endpoints are set
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.reg_date_from, self.reg_date_to) {
            (Some(from), Some(to)) => Some((from.first_day(), to.last_day())),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_month(name: &str, value: Option<&str>) -> Result<Option<YearMonth>, AppError> {
    non_blank(value)
        .map(|v| {
            v.parse::<YearMonth>().map_err(|e| {
                AppError::InvalidInput(format!("{}: {}", name, e.detail()))
            })
        })
        .transpose()
}
