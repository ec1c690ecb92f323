//! Application state and event loop

use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};
use tracing::debug;

use crate::services::year_grid::GRID_COLUMNS;
use crate::services::{
    CellsChanged, GridRenderer, MonthDataLookup, SharedDelegate, SharedLookup, YearGridController,
};
use crate::types::{MonthCell, Result, MONTHS_PER_YEAR};

use super::theme::Theme;
use super::widgets::{
    help::HelpPopup,
    month_grid::{MonthGrid, MONTH_NAMES},
    year_grid::{hit_test, YearGridView},
};

/// Largest month view: 7 columns of 8 plus borders
const MONTH_VIEW_WIDTH: u16 = 58;

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// 4x3 grid of the whole year
    #[default]
    Year,
    /// Single selected month
    Month,
}

/// Redraw request shared by the app and the year grid renderer hook
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    pub fn request(&self) {
        self.0.set(true);
    }

    /// Whether a redraw was requested since the last call
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl GridRenderer for RedrawFlag {
    fn cells_changed(&mut self, change: &CellsChanged, _cells: &[MonthCell]) {
        // Selection passes that flipped nothing leave the screen as it is
        if matches!(change, CellsChanged::Selection(indices) if indices.is_empty()) {
            return;
        }
        debug!(?change, "year grid changed");
        self.request();
    }
}

/// Main application
pub struct App {
    delegate: SharedDelegate,
    lookup: SharedLookup,
    controller: YearGridController,
    redraw: RedrawFlag,
    year_view_done: Rc<Cell<bool>>,
    mode: ViewMode,
    cursor: usize,
    theme: Theme,
    show_help: bool,
    should_quit: bool,
    screen: Rect,
}

impl App {
    /// Create the app showing `year`, with selections written back into `delegate`
    pub fn new(
        delegate: SharedDelegate,
        lookup: SharedLookup,
        year: i32,
        theme: Theme,
    ) -> Result<Self> {
        let redraw = RedrawFlag::default();
        let year_view_done = Rc::new(Cell::new(false));

        let mut controller = YearGridController::new(Rc::clone(&delegate), lookup.clone());
        controller.set_renderer(redraw.clone());
        {
            let delegate = Rc::clone(&delegate);
            controller.set_on_month_selected(move |month| delegate.borrow_mut().select_month(month));
        }
        {
            let done = Rc::clone(&year_view_done);
            controller.set_on_year_view_change(move |changed| done.set(changed));
        }
        controller.init(year)?;

        let selected = delegate.borrow().selected();
        let cursor = if selected.year == year {
            selected.month as usize - 1
        } else {
            0
        };

        Ok(Self {
            delegate,
            lookup,
            controller,
            redraw,
            year_view_done,
            mode: ViewMode::default(),
            cursor,
            theme,
            show_help: false,
            should_quit: false,
            screen: Rect::default(),
        })
    }

    /// Area left for the grid between the header and status rows
    fn grid_area(area: Rect) -> Rect {
        Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(2),
            ..area
        }
        .intersection(area)
    }

    /// Re-measure after the terminal size changed
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.screen = Rect::new(0, 0, width, height);
        let grid = Self::grid_area(self.screen);
        self.controller
            .on_resize(grid.width as i32, grid.height as i32)?;
        self.redraw.request();
        Ok(())
    }

    /// Handle keyboard, mouse and resize events
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row)
            }
            Event::Resize(width, height) => self.resize(width, height),
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                self.redraw.request();
                Ok(())
            }
            _ if self.show_help => Ok(()),
            _ => match self.mode {
                ViewMode::Year => self.handle_year_key(code),
                ViewMode::Month => self.handle_month_key(code),
            },
        }
    }

    fn handle_year_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-(GRID_COLUMNS as isize)),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(GRID_COLUMNS as isize),
            KeyCode::Enter | KeyCode::Char(' ') => self.select(self.cursor)?,
            KeyCode::Char('[') => self.change_year(-1)?,
            KeyCode::Char(']') => self.change_year(1)?,
            KeyCode::Char('w') => self.cycle_week_start()?,
            KeyCode::Char('t') => {
                self.theme = self.theme.toggle();
                self.controller.update_style()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_month_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.step_selection(false),
            KeyCode::Right | KeyCode::Char('l') => self.step_selection(true),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('y') => self.back_to_year()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Result<()> {
        if self.mode != ViewMode::Year || self.show_help {
            return Ok(());
        }
        let Some(size) = self.controller.cell_size() else {
            return Ok(());
        };
        let style = self.delegate.borrow().style();
        if let Some(index) = hit_test(Self::grid_area(self.screen), size, style, column, row) {
            self.cursor = index;
            self.redraw.request();
            self.select(index)?;
        }
        Ok(())
    }

    /// Horizontal moves wrap around the year, vertical moves stop at the edges
    fn move_cursor(&mut self, delta: isize) {
        let next = self.cursor as isize + delta;
        let months = MONTHS_PER_YEAR as isize;
        if delta.abs() == 1 {
            self.cursor = next.rem_euclid(months) as usize;
        } else if (0..months).contains(&next) {
            self.cursor = next as usize;
        }
        self.redraw.request();
    }

    /// Click on grid position `index`; accepted months open the month view
    fn select(&mut self, index: usize) -> Result<()> {
        let Some(month) = self.controller.resolve_click(index)? else {
            return Ok(());
        };
        // The selection listener already wrote the delegate
        self.controller.update()?;
        self.cursor = index;
        if self.year_view_done.replace(false) {
            self.mode = ViewMode::Month;
            self.redraw.request();
        }
        debug!(%month, "month selected");
        Ok(())
    }

    /// Show the previous/next year, staying within the selectable years
    fn change_year(&mut self, delta: i32) -> Result<()> {
        let Some(year) = self.controller.year() else {
            return Ok(());
        };
        let (min_year, max_year) = {
            let delegate = self.delegate.borrow();
            (delegate.min().year, delegate.max().year)
        };
        let target = (year + delta).clamp(min_year, max_year);
        if target != year {
            self.controller.init(target)?;
        }
        Ok(())
    }

    fn cycle_week_start(&mut self) -> Result<()> {
        {
            let mut delegate = self.delegate.borrow_mut();
            let next = delegate.week_start().succ();
            delegate.set_week_start(next);
        }
        self.controller.update_week_start()
    }

    /// Month view navigation: moves the shared selection directly
    fn step_selection(&mut self, forward: bool) {
        let mut delegate = self.delegate.borrow_mut();
        let current = delegate.selected();
        let next = if forward { current.succ() } else { current.pred() };
        if delegate.is_selectable(next) {
            delegate.select_month(next);
            self.redraw.request();
        }
    }

    /// Return to the year grid and resynchronize it with the shared selection
    fn back_to_year(&mut self) -> Result<()> {
        let selected = self.delegate.borrow().selected();
        if self.controller.year() == Some(selected.year) {
            self.controller.update()?;
        } else {
            self.controller.init(selected.year)?;
        }
        self.mode = ViewMode::Year;
        self.cursor = selected.month as usize - 1;
        self.redraw.request();
        Ok(())
    }

    /// Whether the screen needs repainting
    pub fn take_redraw(&self) -> bool {
        self.redraw.take()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.mode {
            ViewMode::Year => match self.controller.year() {
                Some(year) => format!("◀ {} ▶", year),
                None => String::new(),
            },
            ViewMode::Month => {
                let selected = self.delegate.borrow().selected();
                format!("{} {}", MONTH_NAMES[selected.month as usize], selected.year)
            }
        };
        let line = Line::from(Span::styled(
            title,
            Style::default()
                .fg(self.theme.title())
                .add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let (selected, week_start) = {
            let delegate = self.delegate.borrow();
            (delegate.selected(), delegate.week_start())
        };
        let hints = match self.mode {
            ViewMode::Year => "Enter select · [ ] year · w week start · ? help · q quit",
            ViewMode::Month => "←/→ month · Esc back · ? help · q quit",
        };
        let line = Line::from(vec![
            Span::styled(
                format!("{}  ", selected),
                Style::default().fg(self.theme.accent()),
            ),
            Span::styled(
                format!("week starts {}  ", week_start),
                Style::default().fg(self.theme.muted()),
            ),
            Span::styled(hints, Style::default().fg(self.theme.muted())),
        ]);
        Paragraph::new(line).render(area, buf);
    }

    fn render_year(&self, area: Rect, buf: &mut Buffer) {
        let Ok(cells) = self.controller.cells() else {
            return;
        };
        let delegate = self.delegate.borrow();
        YearGridView::new(
            cells,
            self.controller.cell_size().unwrap_or_default(),
            delegate.style(),
            delegate.week_start(),
            (delegate.min(), delegate.max()),
            self.theme,
        )
        .with_cursor(self.cursor)
        .render(area, buf);
    }

    fn render_month(&self, area: Rect, buf: &mut Buffer) {
        let (selected, week_start) = {
            let delegate = self.delegate.borrow();
            (delegate.selected(), delegate.week_start())
        };
        let Ok(mut cell) = MonthCell::new(selected.year, selected.month, week_start) else {
            return;
        };
        cell.has_data = self
            .lookup
            .has_data(selected.year, selected.month)
            .unwrap_or(false);
        cell.is_selected = true;

        let width = area.width.min(MONTH_VIEW_WIDTH);
        // Borders and weekday header around the week rows
        let height = area.height.min(3 + cell.week_rows() as u16);
        let month_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        MonthGrid::new(&cell, week_start, self.theme)
            .title_with_year(true)
            .render(month_area, buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let header = Rect { height: 1, ..area };
        self.render_header(header, buf);

        let grid = App::grid_area(area);
        match self.mode {
            ViewMode::Year => self.render_year(grid, buf),
            ViewMode::Month => self.render_month(grid, buf),
        }

        if area.height >= 2 {
            let status = Rect {
                y: area.bottom() - 1,
                height: 1,
                ..area
            };
            self.render_status(status, buf);
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(mut app: App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    app.resize(size.width, size.height)?;

    loop {
        if app.take_redraw() {
            terminal.draw(|frame| app.draw(frame))?;
        }

        if app.should_quit() {
            break;
        }

        app.handle_event(event::read()?)?;
    }

    Ok(())
}
