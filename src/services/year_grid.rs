//! Year grid controller: twelve month cells laid out 4x3
//!
//! Owns the month view-models for one year, keeps their selection flags in
//! sync with the shared [`CalendarDelegate`](super::delegate::CalendarDelegate),
//! derives the per-cell size from the container's measured size, and turns
//! clicks into range-checked month selections.

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::calendar::{is_month_in_range, leading_offset};
use crate::services::data_lookup::MonthDataLookup;
use crate::services::delegate::SharedDelegate;
use crate::types::{CellSize, MonthCell, Result, YearGridError, YearMonth, MONTHS_PER_YEAR};

/// Grid columns
pub const GRID_COLUMNS: i32 = 4;
/// Grid rows
pub const GRID_ROWS: i32 = 3;

/// What changed in the cell set since the last notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellsChanged {
    /// All twelve cells were rebuilt by `init`
    Rebuilt,
    /// Only the selection flag changed, at these grid indices
    Selection(Vec<usize>),
    /// Leading offsets were recomputed for a new week start
    WeekStart,
    /// Every cell now has this size
    Resized(CellSize),
    /// No model change; styling must be reapplied to every cell
    Style,
}

/// Visual layer that draws the cells
pub trait GridRenderer {
    fn cells_changed(&mut self, change: &CellsChanged, cells: &[MonthCell]);
}

type MonthSelectedListener = Box<dyn FnMut(YearMonth)>;
type YearViewChangeListener = Box<dyn FnMut(bool)>;

enum GridState {
    Uninitialized,
    Built { year: i32, cells: Vec<MonthCell> },
}

/// Selection and layout controller for one year of month cells
pub struct YearGridController {
    delegate: SharedDelegate,
    lookup: Box<dyn MonthDataLookup>,
    state: GridState,
    cell_size: Option<CellSize>,
    renderer: Option<Box<dyn GridRenderer>>,
    on_month_selected: Option<MonthSelectedListener>,
    on_year_view_change: Option<YearViewChangeListener>,
}

impl fmt::Debug for YearGridController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YearGridController")
            .field("year", &self.year())
            .field("cell_size", &self.cell_size)
            .finish_non_exhaustive()
    }
}

impl YearGridController {
    pub fn new(delegate: SharedDelegate, lookup: impl MonthDataLookup + 'static) -> Self {
        Self {
            delegate,
            lookup: Box::new(lookup),
            state: GridState::Uninitialized,
            cell_size: None,
            renderer: None,
            on_month_selected: None,
            on_year_view_change: None,
        }
    }

    pub fn set_renderer(&mut self, renderer: impl GridRenderer + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    /// Listener for accepted (in-range) month clicks
    pub fn set_on_month_selected(&mut self, listener: impl FnMut(YearMonth) + 'static) {
        self.on_month_selected = Some(Box::new(listener));
    }

    /// Listener told that the year view is done (always `true`) after an accepted click
    pub fn set_on_year_view_change(&mut self, listener: impl FnMut(bool) + 'static) {
        self.on_year_view_change = Some(Box::new(listener));
    }

    /// Detach both selection listeners
    pub fn clear_listeners(&mut self) {
        self.on_month_selected = None;
        self.on_year_view_change = None;
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, GridState::Built { .. })
    }

    /// Year being displayed, if initialized
    pub fn year(&self) -> Option<i32> {
        match &self.state {
            GridState::Built { year, .. } => Some(*year),
            GridState::Uninitialized => None,
        }
    }

    pub fn cells(&self) -> Result<&[MonthCell]> {
        match &self.state {
            GridState::Built { cells, .. } => Ok(cells),
            GridState::Uninitialized => Err(YearGridError::NotInitialized),
        }
    }

    /// Size from the last `on_resize`, if any
    pub fn cell_size(&self) -> Option<CellSize> {
        self.cell_size
    }

    fn cells_mut(&mut self) -> Result<&mut Vec<MonthCell>> {
        match &mut self.state {
            GridState::Built { cells, .. } => Ok(cells),
            GridState::Uninitialized => Err(YearGridError::NotInitialized),
        }
    }

    fn notify(&mut self, change: CellsChanged) {
        if let (Some(renderer), GridState::Built { cells, .. }) = (&mut self.renderer, &self.state)
        {
            renderer.cells_changed(&change, cells);
        }
    }

    /// Build the twelve month cells for `year`, replacing any previous set
    #[instrument(skip(self))]
    pub fn init(&mut self, year: i32) -> Result<()> {
        let (week_start, selected) = {
            let delegate = self.delegate.borrow();
            (delegate.week_start(), delegate.selected())
        };

        let mut cells = Vec::with_capacity(MONTHS_PER_YEAR);
        for month in 1..=MONTHS_PER_YEAR as u32 {
            let has_data = match self.lookup.has_data(year, month) {
                Ok(has_data) => has_data,
                Err(e) => {
                    warn!(year, month, error = %e, "month data lookup failed, treating as empty");
                    false
                }
            };
            let mut cell = MonthCell::new(year, month, week_start)?;
            cell.has_data = has_data;
            cell.is_selected = selected == cell.year_month();
            cells.push(cell);
        }

        debug!(
            with_data = cells.iter().filter(|c| c.has_data).count(),
            "built year grid"
        );
        self.state = GridState::Built { year, cells };
        self.notify(CellsChanged::Rebuilt);
        Ok(())
    }

    /// Re-derive selection flags from the delegate's current selection
    pub fn update(&mut self) -> Result<()> {
        let selected = self.delegate.borrow().selected();
        let cells = self.cells_mut()?;

        let mut changed = Vec::new();
        for (index, cell) in cells.iter_mut().enumerate() {
            let is_selected = cell.year_month() == selected;
            if cell.is_selected != is_selected {
                cell.is_selected = is_selected;
                changed.push(index);
            }
        }

        self.notify(CellsChanged::Selection(changed));
        Ok(())
    }

    /// Recompute leading offsets after the delegate's week start changed
    pub fn update_week_start(&mut self) -> Result<()> {
        let week_start = self.delegate.borrow().week_start();
        let cells = self.cells_mut()?;

        let offsets = cells
            .iter()
            .map(|cell| leading_offset(cell.year, cell.month, week_start))
            .collect::<Result<Vec<_>>>()?;
        for (cell, offset) in cells.iter_mut().zip(offsets) {
            cell.leading_offset = offset;
        }

        self.notify(CellsChanged::WeekStart);
        Ok(())
    }

    /// Ask the renderer to reapply styling to every cell
    pub fn update_style(&mut self) -> Result<()> {
        self.cells()?;
        self.notify(CellsChanged::Style);
        Ok(())
    }

    /// Derive the per-cell size from the container's measured size
    pub fn on_resize(&mut self, width: i32, height: i32) -> Result<CellSize> {
        self.cells()?;
        let style = self.delegate.borrow().style();

        // Style values come from user config; saturate instead of overflowing
        let horizontal_padding = style.padding_left.saturating_add(style.padding_right);
        let horizontal_margin = style
            .month_margin_left
            .saturating_add(style.month_margin_right);
        let cell_width = (width.saturating_sub(horizontal_padding) / GRID_COLUMNS)
            .saturating_sub(horizontal_margin);
        let cell_height = (height / GRID_ROWS)
            .saturating_sub(style.month_margin_top)
            .saturating_sub(style.month_margin_bottom);
        let size = CellSize {
            width: cell_width.max(0),
            height: cell_height.max(0),
        };
        debug!(
            width,
            height,
            cell_width = size.width,
            cell_height = size.height,
            "measured year grid"
        );

        self.cell_size = Some(size);
        self.notify(CellsChanged::Resized(size));
        Ok(size)
    }

    /// Resolve a click on grid position `index` (0..=11).
    ///
    /// Returns the month only if it is inside the delegate's range; the caller
    /// propagates it into the delegate. Out-of-range clicks and positions
    /// outside the grid are ignored.
    pub fn resolve_click(&mut self, index: usize) -> Result<Option<YearMonth>> {
        let Some(cell) = self.cells()?.get(index) else {
            debug!(index, "click outside the year grid");
            return Ok(None);
        };
        let month = cell.year_month();

        let in_range = {
            let delegate = self.delegate.borrow();
            let (min, max) = (delegate.min(), delegate.max());
            is_month_in_range(month.year, month.month, min.year, min.month, max.year, max.month)
        };
        if !in_range {
            debug!(%month, "ignoring click on month outside selectable range");
            return Ok(None);
        }

        if let Some(listener) = self.on_month_selected.as_mut() {
            listener(month);
        }
        if let Some(listener) = self.on_year_view_change.as_mut() {
            listener(true);
        }
        Ok(Some(month))
    }
}
