//! Month identity and per-month view-model types

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::Result;
use crate::calendar::{days_in_month, leading_offset};

/// Number of month cells in a year grid
pub const MONTHS_PER_YEAR: usize = 12;

/// A (year, month) pair. Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Inclusive range check against `[min, max]`
    pub fn is_within(self, min: YearMonth, max: YearMonth) -> bool {
        min <= self && self <= max
    }

    /// Next month, rolling over into January of the following year
    pub fn succ(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Previous month, rolling back into December of the preceding year
    pub fn pred(self) -> Self {
        if self.month <= 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// View-model for one month inside a year grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCell {
    pub year: i32,
    pub month: u32,
    pub day_count: u32,
    /// Blank cells before day 1 (0..=6)
    pub leading_offset: u32,
    pub has_data: bool,
    pub is_selected: bool,
}

impl MonthCell {
    /// Unselected cell without data for `month` of `year`, laid out for `week_start`
    pub fn new(year: i32, month: u32, week_start: Weekday) -> Result<Self> {
        Ok(Self {
            year,
            month,
            day_count: days_in_month(year, month)?,
            leading_offset: leading_offset(year, month, week_start)?,
            has_data: false,
            is_selected: false,
        })
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }

    /// Rows the mini day-grid needs for this month
    pub fn week_rows(&self) -> u32 {
        (self.leading_offset + self.day_count).div_ceil(7)
    }
}

/// Pixel (or terminal-cell) size shared by every month cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(leading_offset: u32, day_count: u32) -> MonthCell {
        MonthCell {
            year: 2024,
            month: 2,
            day_count,
            leading_offset,
            has_data: false,
            is_selected: false,
        }
    }

    #[test]
    fn test_year_month_ordering_is_year_first() {
        assert!(YearMonth::new(2019, 12) < YearMonth::new(2020, 1));
        assert!(YearMonth::new(2020, 3) < YearMonth::new(2020, 4));
        assert_eq!(YearMonth::new(2020, 3), YearMonth::new(2020, 3));
    }

    #[test]
    fn test_is_within_inclusive_bounds() {
        let min = YearMonth::new(2020, 1);
        let max = YearMonth::new(2020, 6);
        assert!(YearMonth::new(2020, 1).is_within(min, max));
        assert!(YearMonth::new(2020, 6).is_within(min, max));
        assert!(!YearMonth::new(2020, 7).is_within(min, max));
        assert!(!YearMonth::new(2019, 12).is_within(min, max));
    }

    #[test]
    fn test_succ_pred_roll_over_year() {
        assert_eq!(YearMonth::new(2023, 12).succ(), YearMonth::new(2024, 1));
        assert_eq!(YearMonth::new(2024, 1).pred(), YearMonth::new(2023, 12));
        assert_eq!(YearMonth::new(2024, 5).succ(), YearMonth::new(2024, 6));
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(YearMonth::new(2024, 3).to_string(), "2024-03");
    }

    #[test]
    fn test_new_cell_layout() {
        // 2015-02-01 is a Sunday
        let cell = MonthCell::new(2015, 2, Weekday::Sun).unwrap();
        assert_eq!(cell.day_count, 28);
        assert_eq!(cell.leading_offset, 0);
        assert_eq!(cell.week_rows(), 4);
        assert!(!cell.has_data);
        assert!(!cell.is_selected);
        assert!(MonthCell::new(2015, 13, Weekday::Sun).is_err());
    }

    #[test]
    fn test_week_rows() {
        // Feb 2015 starting on Sunday with a Sunday week start: exactly 4 rows
        assert_eq!(cell(0, 28).week_rows(), 4);
        assert_eq!(cell(6, 31).week_rows(), 6);
        assert_eq!(cell(4, 29).week_rows(), 5);
    }
}
