//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 19;

const YEAR_KEYS: [(&str, &str); 5] = [
    ("Arrows / h j k l", "Move cursor"),
    ("Enter / Space", "Select month"),
    ("[ / ]", "Previous / next year"),
    ("w", "Cycle week start"),
    ("t", "Toggle theme"),
];

const MONTH_KEYS: [(&str, &str); 2] = [
    ("Left / Right", "Previous / next month"),
    ("Esc / y", "Back to year view"),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, title: &str) {
        let header = Line::from(vec![Span::styled(
            title.to_string(),
            Style::default()
                .fg(self.theme.title())
                .add_modifier(Modifier::BOLD),
        )]);
        Paragraph::new(header)
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" yeargrid v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Year view header
            Constraint::Length(5), // [2] Year view keys
            Constraint::Length(1), // [3] Padding
            Constraint::Length(1), // [4] Month view header
            Constraint::Length(2), // [5] Month view keys
            Constraint::Length(1), // [6] Padding
            Constraint::Length(1), // [7] General header
            Constraint::Length(2), // [8] q / ?
            Constraint::Length(1), // [9] Close hint
            Constraint::Min(0),    // Remaining
        ])
        .split(inner);

        self.render_header(chunks[1], buf, "Year view");
        for (i, (key, desc)) in YEAR_KEYS.iter().enumerate() {
            render_keybinding(row(chunks[2], i), buf, key, desc, self.theme);
        }

        self.render_header(chunks[4], buf, "Month view");
        for (i, (key, desc)) in MONTH_KEYS.iter().enumerate() {
            render_keybinding(row(chunks[5], i), buf, key, desc, self.theme);
        }

        self.render_header(chunks[7], buf, "General");
        render_keybinding(row(chunks[8], 0), buf, "q", "Quit", self.theme);
        render_keybinding(row(chunks[8], 1), buf, "?", "Toggle help", self.theme);

        let hint = Line::from(vec![Span::styled(
            "Press ? to close",
            Style::default().fg(self.theme.muted()),
        )]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[9], buf);
    }
}

/// The `i`-th single-line row of `area` (empty once past the bottom)
fn row(area: Rect, i: usize) -> Rect {
    Rect {
        y: area.y + i as u16,
        height: 1,
        ..area
    }
    .intersection(area)
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    if area.is_empty() {
        return;
    }
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<20}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_popup_centered_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, POPUP_WIDTH);
        assert_eq!(popup_area.height, POPUP_HEIGHT);
        assert_eq!(popup_area.x, (100 - POPUP_WIDTH) / 2);
        assert_eq!(popup_area.y, (50 - POPUP_HEIGHT) / 2);
    }

    #[test]
    fn test_help_popup_small_terminal() {
        // Terminal smaller than popup
        let area = Rect::new(0, 0, 30, 10);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, 30);
        assert_eq!(popup_area.height, 10);
    }

    #[test]
    fn test_help_popup_lists_keys() {
        let area = HelpPopup::centered_area(Rect::new(0, 0, 60, 30));
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 30));
        HelpPopup::default().render(area, &mut buf);

        let text: String = (0..30u16)
            .flat_map(|y| (0..60u16).map(move |x| (x, y)))
            .map(|pos| buf.cell(pos).unwrap().symbol().to_string())
            .collect();
        assert!(text.contains("Cycle week start"));
        assert!(text.contains("Back to year view"));
        assert!(text.contains("Press ? to close"));
    }
}
