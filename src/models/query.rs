use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Optional constraints narrowing a property query
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive lower price bound
    pub price_min: Option<f64>,
    /// Inclusive upper price bound
    pub price_max: Option<f64>,
    /// Exact bedroom count
    pub bedrooms: Option<u32>,
    /// Exact bathroom count
    pub bathrooms: Option<f64>,
    /// Exact city name
    pub city: Option<String>,
}

/// Offset pagination over an ordered result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub skip: usize,
    pub limit: usize,
}

impl Pagination {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Inclusive calendar-date window, open on any omitted side
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.start.map_or(true, |start| day >= start) && self.end.map_or(true, |end| day <= end)
    }
}
