//! Color scheme for the year grid

use ratatui::style::Color;

/// How a month reads in the grid, independent of the color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthTone {
    /// Inside the selectable range
    Selectable,
    /// The delegate's current selection
    Selected,
    /// Outside the selectable range; never clickable
    OutOfRange,
}

impl MonthTone {
    pub fn new(is_selected: bool, selectable: bool) -> Self {
        match (selectable, is_selected) {
            (false, _) => Self::OutOfRange,
            (true, true) => Self::Selected,
            (true, false) => Self::Selectable,
        }
    }
}

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Guess the scheme from the terminal background.
    /// Must run before raw mode is entered; Dark when the terminal does not answer.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Body text
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Cursor, selection and keybinding keys
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Borders, weekday headers and hints
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Year and section headings
    pub fn title(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange (ANSI 256)
        }
    }

    /// "Has data" marker next to a month name
    pub fn data_marker(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    pub fn month_title(self, tone: MonthTone) -> Color {
        match tone {
            MonthTone::Selectable => self.title(),
            MonthTone::Selected => self.accent(),
            MonthTone::OutOfRange => self.muted(),
        }
    }

    pub fn month_border(self, tone: MonthTone, focused: bool) -> Color {
        match (focused, tone) {
            (true, _) => self.accent(),
            (false, MonthTone::Selected) => self.title(),
            (false, _) => self.muted(),
        }
    }

    pub fn day(self, tone: MonthTone) -> Color {
        match tone {
            MonthTone::OutOfRange => self.muted(),
            _ => self.text(),
        }
    }
}
