//! Services backing the year grid: delegate, data lookup, config, controller

pub mod config;
pub mod data_lookup;
pub mod delegate;
pub mod year_grid;

pub use config::{CalendarConfig, ConfigService};
pub use data_lookup::{MonthDataLookup, MonthDataMap, NoMonthData, SharedLookup};
pub use delegate::{CalendarDelegate, SharedDelegate, YearViewStyle};
pub use year_grid::{CellsChanged, GridRenderer, YearGridController};
