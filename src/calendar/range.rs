//! Selectable-range predicate

use crate::types::YearMonth;

/// Whether `(year, month)` lies inside `[(min_year, min_month), (max_year, max_month)]`
pub fn is_month_in_range(
    year: i32,
    month: u32,
    min_year: i32,
    min_month: u32,
    max_year: i32,
    max_month: u32,
) -> bool {
    YearMonth::new(year, month).is_within(
        YearMonth::new(min_year, min_month),
        YearMonth::new(max_year, max_month),
    )
}
