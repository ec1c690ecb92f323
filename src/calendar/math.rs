//! Gregorian month arithmetic for month day-grids

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::{Result, YearGridError};

/// Years in one full Gregorian cycle; weekdays repeat with this period
const GREGORIAN_CYCLE_YEARS: i32 = 400;

/// Days in each month of a common year
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn check_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(YearGridError::InvalidArgument(format!(
            "month must be in 1..=12, got {}",
            month
        )))
    }
}

/// Gregorian leap year: divisible by 4, not by 100 unless also by 400
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    check_month(month)?;
    if month == 2 && is_leap_year(year) {
        return Ok(29);
    }
    Ok(DAYS_IN_MONTH[(month - 1) as usize])
}

/// Blank cells before day 1 in a grid whose column 0 is `week_start`.
///
/// Any `i32` year works: the weekday is read from the equivalent year of the
/// 400-year cycle, which chrono can always represent.
pub fn leading_offset(year: i32, month: u32, week_start: Weekday) -> Result<u32> {
    check_month(month)?;
    let cycle_year = 2000 + year.rem_euclid(GREGORIAN_CYCLE_YEARS);
    let first = NaiveDate::from_ymd_opt(cycle_year, month, 1).ok_or_else(|| {
        YearGridError::InvalidArgument(format!("no first day for {}-{:02}", year, month))
    })?;
    let weekday_of_first = first.weekday().num_days_from_sunday();
    Ok((weekday_of_first + 7 - week_start.num_days_from_sunday()) % 7)
}

/// Week-start index as stored in configuration: 0 = Sunday .. 6 = Saturday
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(YearGridError::InvalidArgument(format!(
            "week start must be in 0..=6, got {}",
            index
        ))),
    }
}

/// Inverse of [`weekday_from_index`]
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Two-letter weekday headers starting from `week_start`
pub fn weekday_headers(week_start: Weekday) -> [&'static str; 7] {
    const NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
    let start = week_start.num_days_from_sunday() as usize;
    std::array::from_fn(|i| NAMES[(start + i) % 7])
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== is_leap_year / days_in_month tests ==========

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(4));
        assert!(!is_leap_year(1));
    }

    #[test]
    fn test_february_day_counts() {
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
    }

    #[test]
    fn test_february_matches_leap_rule_across_years() {
        for year in 1..=2400 {
            let expected = if is_leap_year(year) { 29 } else { 28 };
            assert_eq!(days_in_month(year, 2).unwrap(), expected, "year {}", year);
        }
    }

    #[test]
    fn test_days_in_month_common_year() {
        let counts: Vec<u32> = (1..=12).map(|m| days_in_month(2023, m).unwrap()).collect();
        assert_eq!(counts, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        assert_eq!(counts.iter().sum::<u32>(), 365);
    }

    #[test]
    fn test_days_in_month_rejects_invalid_month() {
        assert!(matches!(
            days_in_month(2024, 0),
            Err(YearGridError::InvalidArgument(_))
        ));
        assert!(matches!(
            days_in_month(2024, 13),
            Err(YearGridError::InvalidArgument(_))
        ));
    }

    // ========== leading_offset tests ==========

    #[test]
    fn test_leading_offset_known_months() {
        // 2024-01-01 is a Monday
        assert_eq!(leading_offset(2024, 1, Weekday::Sun).unwrap(), 1);
        assert_eq!(leading_offset(2024, 1, Weekday::Mon).unwrap(), 0);
        assert_eq!(leading_offset(2024, 1, Weekday::Sat).unwrap(), 2);
        // 2023-10-01 is a Sunday
        assert_eq!(leading_offset(2023, 10, Weekday::Sun).unwrap(), 0);
        assert_eq!(leading_offset(2023, 10, Weekday::Mon).unwrap(), 6);
    }

    #[test]
    fn test_leading_offset_year_one() {
        // 0001-01-01 is a Monday in the proleptic Gregorian calendar
        assert_eq!(leading_offset(1, 1, Weekday::Mon).unwrap(), 0);
    }

    #[test]
    fn test_leading_offset_always_in_week() {
        let starts = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        for year in [1, 1582, 1900, 2000, 2024, 9999] {
            for month in 1..=12 {
                for start in starts {
                    let offset = leading_offset(year, month, start).unwrap();
                    assert!(offset <= 6);
                    assert_eq!(offset, leading_offset(year, month, start).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_leading_offset_rejects_invalid_month() {
        assert!(matches!(
            leading_offset(2024, 13, Weekday::Sun),
            Err(YearGridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_leading_offset_beyond_chrono_range() {
        // 300_000 = 2000 + 745 * 400
        for month in 1..=12 {
            for start in [Weekday::Sun, Weekday::Mon, Weekday::Sat] {
                assert_eq!(
                    leading_offset(300_000, month, start).unwrap(),
                    leading_offset(2000, month, start).unwrap()
                );
            }
        }
        assert_eq!(
            leading_offset(i32::MAX, 1, Weekday::Sun).unwrap(),
            leading_offset(2000 + i32::MAX.rem_euclid(400), 1, Weekday::Sun).unwrap()
        );
        // Proleptic years before 1 follow the same cycle
        assert_eq!(
            leading_offset(-400, 3, Weekday::Sun).unwrap(),
            leading_offset(0, 3, Weekday::Sun).unwrap()
        );
    }

    // ========== week start index tests ==========

    #[test]
    fn test_weekday_index_round_trip() {
        for index in 0..7u8 {
            assert_eq!(weekday_index(weekday_from_index(index).unwrap()), index);
        }
        assert_eq!(weekday_from_index(0).unwrap(), Weekday::Sun);
        assert!(weekday_from_index(7).is_err());
    }

    #[test]
    fn test_weekday_headers_rotate() {
        assert_eq!(weekday_headers(Weekday::Sun)[0], "Su");
        assert_eq!(weekday_headers(Weekday::Mon)[0], "Mo");
        assert_eq!(weekday_headers(Weekday::Mon)[6], "Su");
    }
}
