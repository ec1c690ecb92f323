//! Calendar arithmetic and range checks

pub mod math;
pub mod range;

pub use math::{
    days_in_month, is_leap_year, leading_offset, weekday_from_index, weekday_headers,
    weekday_index,
};
pub use range::is_month_in_range;
