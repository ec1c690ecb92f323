//! Shared calendar configuration read by the year grid and its siblings

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::types::YearMonth;

/// Year view paddings and per-month-cell margins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YearViewStyle {
    pub padding_left: i32,
    pub padding_right: i32,
    pub month_margin_left: i32,
    pub month_margin_right: i32,
    pub month_margin_top: i32,
    pub month_margin_bottom: i32,
}

/// Calendar state shared by the year grid and sibling views.
///
/// The year grid only reads it. Sibling views (a month or day view) may move
/// the selection, after which the year grid must be told to `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDelegate {
    week_start: Weekday,
    selected: YearMonth,
    min: YearMonth,
    max: YearMonth,
    style: YearViewStyle,
}

/// Single-threaded shared handle to a [`CalendarDelegate`]
pub type SharedDelegate = Rc<RefCell<CalendarDelegate>>;

impl CalendarDelegate {
    pub fn new(
        week_start: Weekday,
        selected: YearMonth,
        min: YearMonth,
        max: YearMonth,
        style: YearViewStyle,
    ) -> Self {
        Self {
            week_start,
            selected,
            min,
            max,
            style,
        }
    }

    pub fn into_shared(self) -> SharedDelegate {
        Rc::new(RefCell::new(self))
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn selected(&self) -> YearMonth {
        self.selected
    }

    pub fn min(&self) -> YearMonth {
        self.min
    }

    pub fn max(&self) -> YearMonth {
        self.max
    }

    pub fn style(&self) -> YearViewStyle {
        self.style
    }

    /// Move the selection. Range is not enforced here; the year grid gates its own clicks.
    pub fn select_month(&mut self, month: YearMonth) {
        self.selected = month;
    }

    pub fn set_week_start(&mut self, week_start: Weekday) {
        self.week_start = week_start;
    }

    pub fn set_style(&mut self, style: YearViewStyle) {
        self.style = style;
    }

    pub fn is_selectable(&self, month: YearMonth) -> bool {
        month.is_within(self.min, self.max)
    }
}
