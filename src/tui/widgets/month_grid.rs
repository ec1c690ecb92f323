//! Single-month day grid widget

use chrono::Weekday;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::calendar::weekday_headers;
use crate::tui::theme::{MonthTone, Theme};
use crate::types::MonthCell;

/// Short month labels, indexed by month number
pub const MONTH_NAMES: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Marker appended to the title of months with data
const DATA_MARKER: &str = "•";

/// Narrowest day column: two digits
const MIN_COLUMN_WIDTH: u16 = 2;

/// Bordered mini calendar for one month: weekday header plus day numbers
pub struct MonthGrid<'a> {
    cell: &'a MonthCell,
    week_start: Weekday,
    theme: Theme,
    focused: bool,
    selectable: bool,
    title_with_year: bool,
}

impl<'a> MonthGrid<'a> {
    pub fn new(cell: &'a MonthCell, week_start: Weekday, theme: Theme) -> Self {
        Self {
            cell,
            week_start,
            theme,
            focused: false,
            selectable: true,
            title_with_year: false,
        }
    }

    /// Draw the keyboard cursor on this month
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Months outside the selectable range are drawn muted
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Show "Mar 2024" instead of "Mar"
    pub fn title_with_year(mut self, with_year: bool) -> Self {
        self.title_with_year = with_year;
        self
    }

    fn label(&self) -> String {
        let name = MONTH_NAMES[self.cell.month as usize];
        if self.title_with_year {
            format!(" {} {} ", name, self.cell.year)
        } else {
            format!(" {} ", name)
        }
    }

    /// Month label, followed by the data marker when the month has data
    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(self.label(), self.title_style())];
        if self.cell.has_data {
            spans.push(Span::styled(
                format!("{} ", DATA_MARKER),
                Style::default().fg(self.theme.data_marker()),
            ));
        }
        Line::from(spans)
    }

    fn tone(&self) -> MonthTone {
        MonthTone::new(self.cell.is_selected, self.selectable)
    }

    fn title_style(&self) -> Style {
        let tone = self.tone();
        let mut style = Style::default().fg(self.theme.month_title(tone));
        if tone == MonthTone::Selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        if self.focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn border_style(&self) -> Style {
        Style::default().fg(self.theme.month_border(self.tone(), self.focused))
    }

    /// Column width for an inner area of `width`
    pub fn column_width(width: u16) -> u16 {
        (width / 7).max(MIN_COLUMN_WIDTH)
    }

    /// Grid position (row, column) of `day` (1-based)
    pub fn day_position(cell: &MonthCell, day: u32) -> (u32, u32) {
        let slot = cell.leading_offset + day - 1;
        (slot / 7, slot % 7)
    }
}

impl Widget for MonthGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style())
            .title(self.title())
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < MIN_COLUMN_WIDTH || inner.height == 0 {
            return;
        }

        let column_width = Self::column_width(inner.width);
        // Two-character labels sit centered in their column, leaning right
        let pad = (column_width - MIN_COLUMN_WIDTH).div_ceil(2);
        let fits = |col: u32| {
            let x = inner.x + col as u16 * column_width + pad;
            (x + MIN_COLUMN_WIDTH <= inner.right()).then_some(x)
        };

        let header_style = Style::default().fg(self.theme.muted());
        for (col, label) in weekday_headers(self.week_start).iter().enumerate() {
            if let Some(x) = fits(col as u32) {
                buf.set_string(x, inner.y, label, header_style);
            }
        }

        let day_style = Style::default().fg(self.theme.day(self.tone()));
        for day in 1..=self.cell.day_count {
            let (row, col) = Self::day_position(self.cell, day);
            let y = inner.y + 1 + row as u16;
            if y >= inner.bottom() {
                break;
            }
            if let Some(x) = fits(col) {
                buf.set_string(x, y, format!("{:>2}", day), day_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2024() -> MonthCell {
        // 2024-03-01 is a Friday
        MonthCell::new(2024, 3, Weekday::Sun).unwrap()
    }

    fn render(grid: MonthGrid, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        grid.render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn test_day_position_uses_offset() {
        let cell = march_2024();
        assert_eq!(cell.leading_offset, 5);
        assert_eq!(MonthGrid::day_position(&cell, 1), (0, 5));
        assert_eq!(MonthGrid::day_position(&cell, 3), (1, 0));
        assert_eq!(MonthGrid::day_position(&cell, 31), (5, 0));
    }

    #[test]
    fn test_column_width() {
        assert_eq!(MonthGrid::column_width(21), 3);
        assert_eq!(MonthGrid::column_width(10), 2);
        assert_eq!(MonthGrid::column_width(70), 10);
    }

    #[test]
    fn test_render_title_and_header() {
        let cell = march_2024();
        // 21 inner columns: 3 chars per day
        let buf = render(MonthGrid::new(&cell, Weekday::Sun, Theme::Dark), 23, 9);

        assert!(row_text(&buf, 0).contains("Mar"));
        assert!(row_text(&buf, 1).starts_with("│ Su Mo Tu"));
    }

    #[test]
    fn test_render_first_day_after_offset() {
        let cell = march_2024();
        let buf = render(MonthGrid::new(&cell, Weekday::Sun, Theme::Dark), 23, 9);

        // Friday column starts at x = 1 + 5 * 3 + 1
        assert_eq!(row_text(&buf, 2), format!("│{}1  2│", " ".repeat(17)));
        assert!(row_text(&buf, 3).starts_with("│  3  4  5"));
    }

    #[test]
    fn test_render_clips_rows_that_do_not_fit() {
        let cell = march_2024();
        // Room for header + 2 week rows only
        let buf = render(MonthGrid::new(&cell, Weekday::Sun, Theme::Dark), 23, 5);
        assert!(row_text(&buf, 3).contains(" 9"));
        assert!(row_text(&buf, 4).starts_with("└"));
    }

    #[test]
    fn test_title_marks_data_and_year() {
        let mut cell = march_2024();
        cell.has_data = true;
        let grid = MonthGrid::new(&cell, Weekday::Sun, Theme::Dark).title_with_year(true);
        assert_eq!(grid.title().to_string(), " Mar 2024 • ");
        assert_eq!(
            grid.title().spans[1].style.fg,
            Some(Theme::Dark.data_marker())
        );

        cell.has_data = false;
        let grid = MonthGrid::new(&cell, Weekday::Sun, Theme::Dark);
        assert_eq!(grid.title().to_string(), " Mar ");
    }

    #[test]
    fn test_selected_title_is_accented() {
        let mut cell = march_2024();
        cell.is_selected = true;
        let grid = MonthGrid::new(&cell, Weekday::Sun, Theme::Dark);
        assert_eq!(grid.title_style().fg, Some(Theme::Dark.accent()));

        let grid = MonthGrid::new(&cell, Weekday::Sun, Theme::Dark).selectable(false);
        assert_eq!(grid.title_style().fg, Some(Theme::Dark.muted()));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let cell = march_2024();
        render(MonthGrid::new(&cell, Weekday::Sun, Theme::Dark), 3, 2);
        render(MonthGrid::new(&cell, Weekday::Sun, Theme::Dark), 1, 1);
    }
}
