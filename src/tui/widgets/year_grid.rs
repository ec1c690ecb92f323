//! 4x3 year grid widget

use chrono::Weekday;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::Widget,
};

use super::month_grid::MonthGrid;
use crate::services::delegate::YearViewStyle;
use crate::services::year_grid::GRID_COLUMNS;
use crate::tui::theme::Theme;
use crate::types::{CellSize, MonthCell, YearMonth, MONTHS_PER_YEAR};

fn to_u16(value: i32) -> u16 {
    value.clamp(0, u16::MAX as i32) as u16
}

/// Screen rectangle of grid position `index` inside `area`.
///
/// Follows the same box model as the controller's size derivation: the
/// container paddings apply once, the month margins around every cell.
pub fn cell_rect(area: Rect, index: usize, size: CellSize, style: YearViewStyle) -> Rect {
    let col = index as i32 % GRID_COLUMNS;
    let row = index as i32 / GRID_COLUMNS;
    let slot_width = size
        .width
        .saturating_add(style.month_margin_left)
        .saturating_add(style.month_margin_right);
    let slot_height = size
        .height
        .saturating_add(style.month_margin_top)
        .saturating_add(style.month_margin_bottom);

    let x = (area.x as i32)
        .saturating_add(style.padding_left)
        .saturating_add(col.saturating_mul(slot_width))
        .saturating_add(style.month_margin_left);
    let y = (area.y as i32)
        .saturating_add(row.saturating_mul(slot_height))
        .saturating_add(style.month_margin_top);
    Rect::new(to_u16(x), to_u16(y), to_u16(size.width), to_u16(size.height)).intersection(area)
}

/// Grid position under the terminal cell `(column, row)`, if any
pub fn hit_test(
    area: Rect,
    size: CellSize,
    style: YearViewStyle,
    column: u16,
    row: u16,
) -> Option<usize> {
    let position = Position::new(column, row);
    (0..MONTHS_PER_YEAR).find(|&index| cell_rect(area, index, size, style).contains(position))
}

/// Twelve month cells laid out by the controller's cell size
pub struct YearGridView<'a> {
    cells: &'a [MonthCell],
    size: CellSize,
    style: YearViewStyle,
    week_start: Weekday,
    range: (YearMonth, YearMonth),
    cursor: Option<usize>,
    theme: Theme,
}

impl<'a> YearGridView<'a> {
    pub fn new(
        cells: &'a [MonthCell],
        size: CellSize,
        style: YearViewStyle,
        week_start: Weekday,
        range: (YearMonth, YearMonth),
        theme: Theme,
    ) -> Self {
        Self {
            cells,
            size,
            style,
            week_start,
            range,
            cursor: None,
            theme,
        }
    }

    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

impl Widget for YearGridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (min, max) = self.range;
        for (index, cell) in self.cells.iter().enumerate() {
            let rect = cell_rect(area, index, self.size, self.style);
            if rect.is_empty() {
                continue;
            }
            MonthGrid::new(cell, self.week_start, self.theme)
                .focused(self.cursor == Some(index))
                .selectable(cell.year_month().is_within(min, max))
                .render(rect, buf);
        }
    }
}
