//! Month data presence lookup injected into the year grid
//!
//! The year grid only asks "does (year, month) have any records". Hosts answer
//! with a closure, a [`MonthDataMap`] built from their own records, or
//! [`NoMonthData`].

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::{Result, YearGridError};

/// Answers whether a host data source has records for a month
pub trait MonthDataLookup {
    fn has_data(&self, year: i32, month: u32) -> Result<bool>;
}

impl<F> MonthDataLookup for F
where
    F: Fn(i32, u32) -> bool,
{
    fn has_data(&self, year: i32, month: u32) -> Result<bool> {
        Ok(self(year, month))
    }
}

/// Lookup for hosts without a data source
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMonthData;

impl MonthDataLookup for NoMonthData {
    fn has_data(&self, _year: i32, _month: u32) -> Result<bool> {
        Ok(false)
    }
}

/// Reference-counted lookup, for hosts that query the same source outside the grid
#[derive(Clone)]
pub struct SharedLookup(Rc<dyn MonthDataLookup>);

impl SharedLookup {
    pub fn new(lookup: impl MonthDataLookup + 'static) -> Self {
        Self(Rc::new(lookup))
    }
}

impl MonthDataLookup for SharedLookup {
    fn has_data(&self, year: i32, month: u32) -> Result<bool> {
        self.0.has_data(year, month)
    }
}

/// Year -> months with data. Serialized as `{"2024": [1, 3]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthDataMap {
    months: BTreeMap<i32, BTreeSet<u32>>,
}

impl MonthDataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the distinct months touched by `dates`
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut map = Self::new();
        for date in dates {
            map.months
                .entry(date.year())
                .or_default()
                .insert(date.month());
        }
        map
    }

    /// Record a month as having data. Months outside 1..=12 are rejected.
    pub fn insert(&mut self, year: i32, month: u32) -> Result<()> {
        if !(1..=12).contains(&month) {
            return Err(YearGridError::InvalidArgument(format!(
                "month must be in 1..=12, got {}",
                month
            )));
        }
        self.months.entry(year).or_default().insert(month);
        Ok(())
    }

    pub fn contains(&self, year: i32, month: u32) -> bool {
        self.months
            .get(&year)
            .is_some_and(|months| months.contains(&month))
    }

    pub fn is_empty(&self) -> bool {
        self.months.values().all(BTreeSet::is_empty)
    }

    /// Load from a JSON file
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let map = Self::from_json(&content)?;
        debug!(years = map.months.len(), "loaded month data map");
        Ok(map)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let map: Self = serde_json::from_str(content)
            .map_err(|e| YearGridError::Parse(format!("invalid month data: {}", e)))?;

        for (year, months) in &map.months {
            if let Some(bad) = months.iter().find(|m| !(1..=12).contains(*m)) {
                return Err(YearGridError::Parse(format!(
                    "year {} lists month {} outside 1..=12",
                    year, bad
                )));
            }
        }
        Ok(map)
    }
}

impl MonthDataLookup for MonthDataMap {
    fn has_data(&self, year: i32, month: u32) -> Result<bool> {
        Ok(self.contains(year, month))
    }
}
